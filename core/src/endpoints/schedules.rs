//! Provider availability slots.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::datetime::{self, normalize_booking_time};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Schedule;

const DAYS: [&str; 7] = [
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

/// Uppercase a day name and check it is one the backend's `DayOfWeek` knows.
fn day_of_week(raw: &str) -> Result<String, ApiError> {
    let day = raw.trim().to_ascii_uppercase();
    if DAYS.contains(&day.as_str()) {
        Ok(day)
    } else {
        Err(ApiError::Validation(format!("unknown day of week: {raw}")))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScheduleBody {
    day_of_week: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    #[serde(rename = "isAvailable")]
    available: bool,
}

fn schedule_body(schedule: &Schedule) -> Result<Option<String>, ApiError> {
    if schedule.end_time <= schedule.start_time {
        return Err(ApiError::Validation(
            "schedule must end after it starts".to_string(),
        ));
    }
    json_body(&ScheduleBody {
        day_of_week: day_of_week(&schedule.day_of_week)?,
        start_time: schedule.start_time,
        end_time: schedule.end_time,
        available: schedule.available,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSchedules {
    pub provider_id: i64,
}

impl Endpoint for ProviderSchedules {
    type Output = Vec<Schedule>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/schedules/provider/{}", self.provider_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSchedulesByDay {
    pub provider_id: i64,
    pub day_of_week: String,
}

impl Endpoint for ProviderSchedulesByDay {
    type Output = Vec<Schedule>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        // Bad day names are caught in `body`, which runs before the path is used.
        format!(
            "api/schedules/provider/{}/day/{}",
            self.provider_id,
            self.day_of_week.trim().to_ascii_uppercase()
        )
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        day_of_week(&self.day_of_week)?;
        Ok(None)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    pub provider_id: i64,
    pub schedule: Schedule,
}

impl Endpoint for CreateSchedule {
    type Output = Schedule;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        format!("api/schedules/provider/{}", self.provider_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        schedule_body(&self.schedule)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedule {
    pub schedule_id: i64,
    pub schedule: Schedule,
}

impl Endpoint for UpdateSchedule {
    type Output = Schedule;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/schedules/{}", self.schedule_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        schedule_body(&self.schedule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSchedule {
    pub schedule_id: i64,
}

impl Endpoint for DeleteSchedule {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("api/schedules/{}", self.schedule_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}

/// Whether the provider has a free slot covering `time` on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailability {
    pub provider_id: i64,
    pub date: NaiveDate,
    #[serde(deserialize_with = "datetime::booking_time")]
    pub time: NaiveTime,
}

impl CheckAvailability {
    /// Accepts the same time spellings as a booking; anything else is a
    /// `Validation` error.
    pub fn new(provider_id: i64, date: NaiveDate, time: &str) -> Result<Self, ApiError> {
        Ok(Self {
            provider_id,
            date,
            time: normalize_booking_time(time)?,
        })
    }
}

impl Endpoint for CheckAvailability {
    type Output = bool;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/schedules/check-availability".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![
            ("providerId".to_string(), self.provider_id.to_string()),
            ("date".to_string(), self.date.format("%Y-%m-%d").to_string()),
            ("time".to_string(), self.time.format("%H:%M").to_string()),
        ]
    }
}
