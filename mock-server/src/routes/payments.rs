use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::{required_ref, rows};
use crate::error::{not_found, MockError, MockResult};
use crate::store::{now_parts, Row, Store};
use crate::Db;

pub async fn list_transactions(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.transactions.all()))
}

pub async fn create_transaction(
    State(db): State<Db>,
    Json(mut body): Json<Row>,
) -> MockResult<Json<Row>> {
    let booking_id = required_ref(&body, "booking", "bookingId")?;
    let mut store = db.write().await;
    let booking = store
        .bookings
        .get(booking_id)
        .cloned()
        .ok_or_else(|| not_found("Booking", booking_id))?;
    body.insert("booking".to_string(), Value::Object(booking));
    body.entry("transactionDate".to_string())
        .or_insert_with(now_parts);
    Ok(Json(store.transactions.insert(body)))
}

/// Record a completed cash transaction for `booking_id`.
fn record_cash_payment(store: &mut Store, booking_id: i64) -> MockResult<Row> {
    let booking = store
        .bookings
        .get(booking_id)
        .cloned()
        .ok_or_else(|| not_found("Booking", booking_id))?;

    let mut transaction = Row::new();
    transaction.insert(
        "amount".to_string(),
        booking.get("totalCost").cloned().unwrap_or(json!(0.0)),
    );
    transaction.insert("paymentMethod".to_string(), json!("Cash"));
    transaction.insert("status".to_string(), json!("Completed"));
    transaction.insert("transactionDate".to_string(), now_parts());
    transaction.insert("booking".to_string(), Value::Object(booking));
    Ok(store.transactions.insert(transaction))
}

pub async fn confirm_cash_payment(
    State(db): State<Db>,
    Path(booking_id): Path<i64>,
) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    record_cash_payment(&mut store, booking_id).map(Json)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashCode {
    #[serde(default)]
    verification_code: String,
}

pub async fn verify_cash_payment(
    State(db): State<Db>,
    Path(booking_id): Path<i64>,
    Json(input): Json<CashCode>,
) -> MockResult<Json<Row>> {
    if input.verification_code.trim().is_empty() {
        return Err(MockError::BadRequest("Verification code is required".to_string()));
    }
    let mut store = db.write().await;
    record_cash_payment(&mut store, booking_id).map(Json)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    amount: f64,
    #[serde(default)]
    description: String,
    success_url: String,
    cancel_url: String,
}

pub async fn create_checkout(Json(input): Json<CheckoutInput>) -> MockResult<Json<Value>> {
    if !(input.amount.is_finite() && input.amount > 0.0) {
        return Err(MockError::Payment("Amount must be greater than zero".to_string()));
    }
    if input.success_url.is_empty() || input.cancel_url.is_empty() {
        return Err(MockError::Payment("Redirect URLs are required".to_string()));
    }
    tracing::info!(amount = input.amount, description = %input.description, "checkout session created");
    Ok(Json(json!({
        "checkout_url": format!("https://checkout.paymongo.com/cs_{}", Uuid::new_v4().simple()),
    })))
}
