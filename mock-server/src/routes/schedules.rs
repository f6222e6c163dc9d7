use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{merge, rows};
use crate::error::{not_found, MockError, MockResult};
use crate::store::Row;
use crate::Db;

fn parse_time(value: Option<&Value>) -> Option<NaiveTime> {
    match value? {
        Value::String(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .ok(),
        Value::Array(parts) => {
            let part = |i: usize| parts.get(i).and_then(Value::as_u64).map(|v| v as u32);
            NaiveTime::from_hms_opt(part(0)?, part(1).unwrap_or(0), part(2).unwrap_or(0))
        }
        _ => None,
    }
}

fn validate(body: &Row) -> MockResult<()> {
    let start = parse_time(body.get("startTime"));
    let end = parse_time(body.get("endTime"));
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(()),
        (Some(_), Some(_)) => Err(MockError::BadRequest(
            "End time must be after start time".to_string(),
        )),
        _ => Err(MockError::BadRequest(
            "startTime and endTime are required".to_string(),
        )),
    }
}

pub async fn provider_schedules(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Vec<Value>>> {
    let store = db.read().await;
    if store.providers.get(id).is_none() {
        return Err(not_found("Service provider", id));
    }
    Ok(Json(rows(
        store.schedules.filter_by_ref("serviceProvider", "providerId", id),
    )))
}

pub async fn provider_schedules_by_day(
    State(db): State<Db>,
    Path((id, day)): Path<(i64, String)>,
) -> MockResult<Json<Vec<Value>>> {
    let store = db.read().await;
    if store.providers.get(id).is_none() {
        return Err(not_found("Service provider", id));
    }
    let list = store
        .schedules
        .filter_by_ref("serviceProvider", "providerId", id)
        .into_iter()
        .filter(|row| row.get("dayOfWeek").and_then(Value::as_str) == Some(day.as_str()))
        .collect();
    Ok(Json(rows(list)))
}

pub async fn create_schedule(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(mut body): Json<Row>,
) -> MockResult<(axum::http::StatusCode, Json<Row>)> {
    validate(&body)?;
    let mut store = db.write().await;
    if store.providers.get(id).is_none() {
        return Err(not_found("Service provider", id));
    }
    body.insert("serviceProvider".to_string(), json!({ "providerId": id }));
    body.entry("isAvailable".to_string()).or_insert(json!(true));
    Ok((axum::http::StatusCode::CREATED, Json(store.schedules.insert(body))))
}

pub async fn update_schedule(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Row>,
) -> MockResult<Json<Row>> {
    validate(&body)?;
    let mut store = db.write().await;
    let row = store
        .schedules
        .get_mut(id)
        .ok_or_else(|| not_found("Schedule", id))?;
    merge(row, body, "scheduleId");
    Ok(Json(row.clone()))
}

pub async fn delete_schedule(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<String> {
    db.write()
        .await
        .schedules
        .remove(id)
        .map(|_| "Schedule deleted successfully".to_string())
        .ok_or_else(|| not_found("Schedule", id))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    provider_id: i64,
    date: NaiveDate,
    time: String,
}

pub async fn check_availability(
    State(db): State<Db>,
    Query(query): Query<AvailabilityQuery>,
) -> MockResult<Json<bool>> {
    let at = parse_time(Some(&json!(query.time)))
        .ok_or_else(|| MockError::BadRequest(format!("Invalid time: {}", query.time)))?;
    let day = query.date.weekday().to_string().to_uppercase();
    let day = full_day_name(&day);

    let store = db.read().await;
    let free = store
        .schedules
        .filter_by_ref("serviceProvider", "providerId", query.provider_id)
        .iter()
        .filter(|row| row.get("dayOfWeek").and_then(Value::as_str) == Some(day))
        .filter(|row| row.get("isAvailable").and_then(Value::as_bool).unwrap_or(true))
        .any(|row| {
            matches!(
                (parse_time(row.get("startTime")), parse_time(row.get("endTime"))),
                (Some(start), Some(end)) if start <= at && at < end
            )
        });
    Ok(Json(free))
}

// chrono's `Weekday` displays the three-letter form.
fn full_day_name(short: &str) -> &'static str {
    match short {
        "MON" => "MONDAY",
        "TUE" => "TUESDAY",
        "WED" => "WEDNESDAY",
        "THU" => "THURSDAY",
        "FRI" => "FRIDAY",
        "SAT" => "SATURDAY",
        _ => "SUNDAY",
    }
}
