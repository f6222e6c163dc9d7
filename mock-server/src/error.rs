use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Payment failures use the `{"error": ...}` envelope like the real
    /// checkout controller.
    #[error("{0}")]
    Payment(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = match &self {
            MockError::Unauthorized => StatusCode::UNAUTHORIZED,
            MockError::Forbidden(_) => StatusCode::FORBIDDEN,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MockError::Payment(_) => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(%status, error = %self, "request rejected");

        let body = match &self {
            MockError::Payment(msg) => json!({ "error": msg }),
            other => json!({ "message": other.to_string() }),
        };
        (status, axum::Json(body)).into_response()
    }
}

pub type MockResult<T> = Result<T, MockError>;

pub fn not_found(what: &str, id: impl std::fmt::Display) -> MockError {
    MockError::NotFound(format!("{what} not found with ID: {id}"))
}
