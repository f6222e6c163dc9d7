use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::datetime::normalize_booking_time;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Booking, BookingStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBookings;

impl Endpoint for ListBookings {
    type Output = Vec<Booking>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/bookings/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBooking {
    pub booking_id: i64,
}

impl Endpoint for GetBooking {
    type Output = Booking;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/bookings/getById/{}", self.booking_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBookings {
    pub customer_id: i64,
}

impl Endpoint for CustomerBookings {
    type Output = Vec<Booking>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/bookings/customer/{}", self.customer_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderBookings {
    pub provider_id: i64,
}

impl Endpoint for ProviderBookings {
    type Output = Vec<Booking>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/bookings/provider/{}", self.provider_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

/// A customer's booking request.
///
/// `booking_time` is the raw picker value; it is normalized to `HH:MM:SS`
/// when the body is built and rejected if it cannot be read as a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub service_id: i64,
    pub customer_id: i64,
    pub booking_date: NaiveDate,
    pub booking_time: String,
    pub total_cost: f64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default = "full_payment_default")]
    pub full_payment: bool,
}

fn full_payment_default() -> bool {
    true
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingBody<'a> {
    service: IdRef,
    customer: CustomerIdRef,
    booking_date: NaiveDate,
    booking_time: NaiveTime,
    status: BookingStatus,
    total_cost: f64,
    note: Option<&'a str>,
    payment_method: Option<&'a str>,
    full_payment: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdRef {
    service_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomerIdRef {
    customer_id: i64,
}

impl Endpoint for CreateBooking {
    type Output = Booking;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/bookings/postBooking".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if !self.total_cost.is_finite() || self.total_cost < 0.0 {
            return Err(ApiError::Validation(format!(
                "invalid total cost: {}",
                self.total_cost
            )));
        }
        json_body(&BookingBody {
            service: IdRef {
                service_id: self.service_id,
            },
            customer: CustomerIdRef {
                customer_id: self.customer_id,
            },
            booking_date: self.booking_date,
            booking_time: normalize_booking_time(&self.booking_time)?,
            status: BookingStatus::Pending,
            total_cost: self.total_cost,
            note: self.note.as_deref(),
            payment_method: self.payment_method.as_deref(),
            full_payment: self.full_payment,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatus {
    pub booking_id: i64,
    pub status: BookingStatus,
}

impl Endpoint for UpdateBookingStatus {
    type Output = Booking;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/bookings/updateStatus/{}", self.booking_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&serde_json::json!({ "status": self.status.as_str() }))
    }
}

/// Mark a booking completed and release the provider's schedule slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBooking {
    pub booking_id: i64,
}

impl Endpoint for CompleteBooking {
    type Output = Booking;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/bookings/complete/{}", self.booking_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        Ok(Some("{}".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBooking {
    pub booking_id: i64,
}

impl Endpoint for CancelBooking {
    type Output = Booking;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/bookings/cancel/{}", self.booking_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        Ok(Some("{}".to_string()))
    }
}
