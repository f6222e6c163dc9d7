//! Bookings and the reviews left on them.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{required_ref, rows};
use crate::error::{not_found, MockError, MockResult};
use crate::store::{now_parts, ref_id, Row};
use crate::Db;

const STATUSES: [&str; 5] = ["Pending", "Confirmed", "In Progress", "Completed", "Cancelled"];

pub async fn list_bookings(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.bookings.all()))
}

pub async fn get_booking(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    let store = db.read().await;
    store
        .bookings
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Booking", id))
}

pub async fn customer_bookings(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(rows(store.bookings.filter_by_ref("customer", "customerId", id)))
}

pub async fn provider_bookings(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    let list = store
        .bookings
        .rows()
        .filter(|row| {
            row.get("service")
                .and_then(|s| s.get("provider"))
                .and_then(|p| p.get("providerId"))
                .and_then(Value::as_i64)
                == Some(id)
        })
        .cloned()
        .collect();
    Json(rows(list))
}

pub async fn create_booking(State(db): State<Db>, Json(mut body): Json<Row>) -> MockResult<Json<Row>> {
    let service_id = required_ref(&body, "service", "serviceId")?;
    let customer_id = required_ref(&body, "customer", "customerId")?;

    let mut store = db.write().await;
    let service = store
        .services
        .get(service_id)
        .cloned()
        .ok_or_else(|| not_found("Service", service_id))?;
    let customer = store
        .customers
        .get(customer_id)
        .cloned()
        .ok_or_else(|| not_found("Customer", customer_id))?;

    body.insert("service".to_string(), Value::Object(service));
    body.insert("customer".to_string(), Value::Object(customer));
    body.entry("status".to_string()).or_insert(json!("Pending"));
    let booking = store.bookings.insert(body);
    let booking_id = booking.get("bookingId").and_then(serde_json::Value::as_i64);
    tracing::info!(
        booking_id,
        service_id,
        customer_id,
        "booking created"
    );
    Ok(Json(booking))
}

async fn set_status(db: &Db, id: i64, status: &str) -> MockResult<Row> {
    let mut store = db.write().await;
    let row = store
        .bookings
        .get_mut(id)
        .ok_or_else(|| not_found("Booking", id))?;
    row.insert("status".to_string(), json!(status));
    Ok(row.clone())
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    status: Option<String>,
}

pub async fn update_status(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<StatusUpdate>,
) -> MockResult<Json<Row>> {
    let status = input
        .status
        .ok_or_else(|| MockError::BadRequest("Status is required".to_string()))?;
    if !STATUSES.contains(&status.as_str()) {
        return Err(MockError::BadRequest(format!("Unknown booking status: {status}")));
    }
    set_status(&db, id, &status).await.map(Json)
}

pub async fn complete_booking(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    set_status(&db, id, "Completed").await.map(Json)
}

pub async fn cancel_booking(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    set_status(&db, id, "Cancelled").await.map(Json)
}

pub async fn provider_reviews(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(rows(store.reviews.filter_by_ref("provider", "providerId", id)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanReviewQuery {
    customer_id: i64,
    booking_id: i64,
}

pub async fn can_review(State(db): State<Db>, Query(query): Query<CanReviewQuery>) -> String {
    let store = db.read().await;
    let reviewed = store.reviews.rows().any(|row| {
        ref_id(row, "customer", "customerId") == Some(query.customer_id)
            && ref_id(row, "booking", "bookingId") == Some(query.booking_id)
    });
    (!reviewed).to_string()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    customer_id: i64,
    provider_id: i64,
    booking_id: i64,
    rating: u8,
    #[serde(default)]
    comment: String,
}

pub async fn create_review(
    State(db): State<Db>,
    Query(query): Query<ReviewQuery>,
) -> MockResult<Json<Row>> {
    if !(1..=5).contains(&query.rating) {
        return Err(MockError::BadRequest("Rating must be between 1 and 5".to_string()));
    }
    let mut store = db.write().await;
    let customer = store
        .customers
        .get(query.customer_id)
        .cloned()
        .ok_or_else(|| not_found("Customer", query.customer_id))?;
    let provider = store
        .providers
        .get(query.provider_id)
        .cloned()
        .ok_or_else(|| not_found("Service provider", query.provider_id))?;
    let booking = store
        .bookings
        .get(query.booking_id)
        .cloned()
        .ok_or_else(|| not_found("Booking", query.booking_id))?;

    let mut review = Row::new();
    review.insert("rating".to_string(), json!(query.rating));
    review.insert("comment".to_string(), json!(query.comment));
    review.insert("reviewDate".to_string(), now_parts());
    review.insert("customer".to_string(), Value::Object(customer));
    review.insert("provider".to_string(), Value::Object(provider));
    review.insert("booking".to_string(), Value::Object(booking));
    Ok(Json(store.reviews.insert(review)))
}
