//! Transactions and the GCash checkout redirect.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{CheckoutSession, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTransactions;

impl Endpoint for ListTransactions {
    type Output = Vec<Transaction>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/transactions/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub booking_id: i64,
    pub amount: f64,
    pub payment_method: String,
    #[serde(default = "completed")]
    pub status: String,
    #[serde(default)]
    pub transaction_date: Option<NaiveDateTime>,
}

fn completed() -> String {
    "Completed".to_string()
}

impl Endpoint for CreateTransaction {
    type Output = Transaction;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/transactions/postTransaction".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        let mut body = serde_json::json!({
            "booking": { "bookingId": self.booking_id },
            "amount": self.amount,
            "paymentMethod": self.payment_method,
            "status": self.status,
        });
        if let Some(at) = self.transaction_date {
            body["transactionDate"] = serde_json::json!(at);
        }
        json_body(&body)
    }
}

/// Provider confirms a cash booking was paid; the backend records the
/// transaction and answers with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmCashPayment {
    pub booking_id: i64,
}

impl Endpoint for ConfirmCashPayment {
    type Output = Transaction;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        format!("api/transactions/confirm-cash-payment/{}", self.booking_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        Ok(Some("{}".to_string()))
    }
}

/// Provider enters the code the customer shows when paying cash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCashPayment {
    pub booking_id: i64,
    pub verification_code: String,
}

impl Endpoint for VerifyCashPayment {
    type Output = Transaction;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        format!("api/transactions/verify-cash-payment/{}", self.booking_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        let code = self.verification_code.trim();
        if code.is_empty() {
            return Err(ApiError::Validation("payment code is required".to_string()));
        }
        json_body(&serde_json::json!({ "verificationCode": code }))
    }
}

/// Start a PayMongo GCash checkout. The returned URL is opened by the host;
/// completion comes back through `success_url` / `cancel_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckout {
    pub amount: f64,
    pub description: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl Endpoint for CreateCheckout {
    type Output = CheckoutSession;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/create-gcash-checkout".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if !(self.amount.is_finite() && self.amount > 0.0) {
            return Err(ApiError::Validation(format!(
                "checkout amount must be positive, got {}",
                self.amount
            )));
        }
        json_body(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::http::HttpResponse;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:8080")
    }

    fn checkout(amount: f64) -> CreateCheckout {
        CreateCheckout {
            amount,
            description: "Booking #12".to_string(),
            success_url: "serbisyo://payment/success".to_string(),
            cancel_url: "serbisyo://payment/cancel".to_string(),
        }
    }

    #[test]
    fn checkout_body_and_response() {
        let req = client().build(&checkout(650.0), Some("tok")).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["successUrl"], "serbisyo://payment/success");
        assert_eq!(body["amount"], 650.0);

        let session = client()
            .parse(
                &checkout(650.0),
                HttpResponse::new(200, r#"{"checkout_url":"https://checkout.paymongo.com/cs_1"}"#),
            )
            .unwrap();
        assert_eq!(session.checkout_url, "https://checkout.paymongo.com/cs_1");
    }

    #[test]
    fn checkout_error_envelope() {
        let err = client()
            .parse(
                &checkout(650.0),
                HttpResponse::new(500, r#"{"error":"Failed to create checkout session"}"#),
            )
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to create checkout session");
    }

    #[test]
    fn checkout_rejects_zero_amount() {
        let err = client().build(&checkout(0.0), Some("tok")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn transaction_body_references_booking() {
        let create = CreateTransaction {
            booking_id: 12,
            amount: 650.0,
            payment_method: "GCash".to_string(),
            status: completed(),
            transaction_date: None,
        };
        let req = client().build(&create, Some("tok")).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["booking"]["bookingId"], 12);
        assert_eq!(body["status"], "Completed");
        assert!(body.get("transactionDate").is_none());
    }

    #[test]
    fn cash_verification_sends_trimmed_code() {
        let verify = VerifyCashPayment {
            booking_id: 12,
            verification_code: " 4821 ".to_string(),
        };
        let req = client().build(&verify, Some("tok")).unwrap();
        assert!(req.path.ends_with("api/transactions/verify-cash-payment/12"));
        assert_eq!(req.body.as_deref(), Some(r#"{"verificationCode":"4821"}"#));

        let blank = VerifyCashPayment {
            booking_id: 12,
            verification_code: "   ".to_string(),
        };
        assert!(matches!(
            client().build(&blank, Some("tok")).unwrap_err(),
            ApiError::Validation(_)
        ));
    }
}
