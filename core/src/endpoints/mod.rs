//! Typed `Endpoint` values for every backend operation, grouped by resource.
//!
//! Each struct carries exactly the inputs its route needs. They derive serde
//! so hosts that drive the client through the C ABI can name an operation and
//! its arguments as JSON.

pub mod addresses;
pub mod auth;
pub mod bookings;
pub mod customers;
pub mod messages;
pub mod notifications;
pub mod payments;
pub mod providers;
pub mod psgc;
pub mod reviews;
pub mod schedules;
pub mod services;

use crate::client::decode_text;
use crate::error::ApiError;

/// Decoder for operations whose success body carries nothing the caller needs.
pub(crate) fn ignore_body(_body: &str) -> Result<(), ApiError> {
    Ok(())
}

/// Decoder for operations the backend answers with a status sentence.
pub(crate) fn text(body: &str) -> Result<String, ApiError> {
    decode_text(body)
}
