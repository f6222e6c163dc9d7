use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReviews {
    pub provider_id: i64,
}

impl Endpoint for ProviderReviews {
    type Output = Vec<Review>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/reviews/provider/{}", self.provider_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

/// Whether the customer may still review the booking (no review on file yet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanReview {
    pub customer_id: i64,
    pub booking_id: i64,
}

impl Endpoint for CanReview {
    type Output = bool;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/reviews/can-review".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![
            ("customerId".to_string(), self.customer_id.to_string()),
            ("bookingId".to_string(), self.booking_id.to_string()),
        ]
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        match body.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ApiError::Deserialization(format!(
                "expected a boolean, got {other:?}"
            ))),
        }
    }
}

/// Submit a review. All fields travel as query parameters; the body is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReview {
    pub customer_id: i64,
    pub provider_id: i64,
    pub booking_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub review_date: Option<NaiveDateTime>,
}

impl Endpoint for SubmitReview {
    type Output = ();

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/reviews/createWithIDs".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("customerId".to_string(), self.customer_id.to_string()),
            ("providerId".to_string(), self.provider_id.to_string()),
            ("bookingId".to_string(), self.booking_id.to_string()),
            ("rating".to_string(), self.rating.to_string()),
            ("comment".to_string(), self.comment.clone()),
        ];
        if let Some(at) = self.review_date {
            query.push((
                "reviewDate".to_string(),
                at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            ));
        }
        query
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::Validation(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        Ok(None)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::ignore_body(body)
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

    #[test]
    fn can_review_reads_bare_boolean() {
        let check = CanReview {
            customer_id: 5,
            booking_id: 12,
        };
        let req = client().build(&check, Some("tok")).unwrap();
        assert_eq!(
            req.url(),
            "http://localhost:8080/api/reviews/can-review?customerId=5&bookingId=12"
        );
        assert!(client().parse(&check, HttpResponse::new(200, "true")).unwrap());
        assert!(!client().parse(&check, HttpResponse::new(200, "false")).unwrap());
        assert!(client().parse(&check, HttpResponse::new(200, "maybe")).is_err());
    }

    #[test]
    fn can_review_error_is_not_treated_as_yes() {
        let check = CanReview {
            customer_id: 5,
            booking_id: 12,
        };
        let err = client().parse(&check, HttpResponse::new(500, "")).unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn submit_encodes_comment() {
        let submit = SubmitReview {
            customer_id: 5,
            provider_id: 2,
            booking_id: 12,
            rating: 5,
            comment: "Great & fast".to_string(),
            review_date: None,
        };
        let req = client().build(&submit, Some("tok")).unwrap();
        assert!(req.body.is_none());
        assert!(req.url().ends_with("rating=5&comment=Great%20%26%20fast"));
    }

    #[test]
    fn submit_rejects_out_of_range_rating() {
        let submit = SubmitReview {
            customer_id: 5,
            provider_id: 2,
            booking_id: 12,
            rating: 6,
            comment: String::new(),
            review_date: None,
        };
        assert!(matches!(
            client().build(&submit, Some("tok")).unwrap_err(),
            ApiError::Validation(_)
        ));
    }
}
