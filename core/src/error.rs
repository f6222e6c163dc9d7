//! Error types for the SerbisYo API client.
//!
//! # Design
//! One enum covers every failure a call can end in, from the missing-token
//! precondition through HTTP status mapping to transport faults. `Display`
//! is the human-readable text a screen shows the user, so each variant's
//! message is resolved when the error is built, including any `{message}`
//! the server put in the error envelope.

use serde_json::Value;

use crate::http::HttpResponse;

const FORBIDDEN_FALLBACK: &str = "Permission denied: you don't have access to this resource";

/// Longest plain-text error body surfaced verbatim.
const MAX_PLAIN_MESSAGE: usize = 200;

/// Errors returned by the API client and its transports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// An authenticated endpoint was called with a blank token. Nothing was sent.
    #[error("Authentication token is required")]
    MissingToken,

    /// The server returned 401.
    #[error("Authentication failed: please log in again")]
    Unauthorized,

    /// The server returned 403.
    #[error("{0}")]
    Forbidden(String),

    /// The server returned 404, optionally with its own message.
    #[error("{}", not_found_text(.0.as_deref()))]
    NotFound(Option<String>),

    /// Any other non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The transport gave up waiting on the server.
    #[error("Connection timed out. The server might be slow or unavailable.")]
    Timeout,

    /// Connection refused, DNS failure, reset, TLS error and friends.
    #[error("Failed to connect to server: {0}")]
    Network(String),

    /// The caller cancelled the call before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The response body could not be decoded into the expected type.
    #[error("Invalid response from server: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("Failed to encode request: {0}")]
    Serialization(String),

    /// Caller input rejected before a request was built.
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ApiError {
    /// Map a non-2xx response to the matching variant.
    pub fn from_response(response: &HttpResponse) -> Self {
        let server_message = extract_message(&response.body);
        match response.status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(
                server_message.unwrap_or_else(|| FORBIDDEN_FALLBACK.to_string()),
            ),
            404 => ApiError::NotFound(server_message),
            status => ApiError::Http {
                status,
                message: server_message.unwrap_or_else(|| format!("Request failed: {status}")),
            },
        }
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the session should be dropped and the user sent back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::MissingToken | ApiError::Unauthorized)
    }
}

fn not_found_text(message: Option<&str>) -> String {
    match message {
        Some(message) => format!("Not found: {message}"),
        None => "Resource not found".to_string(),
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks for the `{"message": ...}` envelope first, then the `{"error": ...}`
/// envelope the payment endpoint uses. A short single-line plain-text body is
/// taken as-is since several backend handlers answer errors with a bare
/// string.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => ["message", "error"].iter().find_map(|key| {
            map.get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        }),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) => {
            let plain = trimmed.len() <= MAX_PLAIN_MESSAGE
                && !trimmed.starts_with('<')
                && !trimmed.contains('\n');
            plain.then(|| trimmed.to_string())
        }
    }
}
