//! Generic request builder and response parser for the SerbisYo API.
//!
//! # Design
//! Every backend operation is a value implementing `Endpoint`: it knows its
//! method, path, query, body and how its success payload decodes. `ApiClient`
//! holds only configuration and turns any endpoint into an `HttpRequest`
//! (`build`) and any `HttpResponse` back into the endpoint's output (`parse`).
//! The caller executes the round trip in between, so this crate never touches
//! the network.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// One backend operation.
pub trait Endpoint {
    /// Typed payload of a successful response.
    type Output: DeserializeOwned;

    fn method(&self) -> HttpMethod;

    /// Path relative to the base URL, e.g. `api/bookings/getAll`.
    fn path(&self) -> String;

    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// Serialized JSON body, if the operation sends one.
    fn body(&self) -> Result<Option<String>, ApiError> {
        Ok(None)
    }

    /// Whether a bearer token must accompany the request.
    fn requires_auth(&self) -> bool {
        true
    }

    /// Value to report when a 2xx response has an empty body. `None` makes an
    /// empty body a decoding error.
    fn empty_output(&self) -> Option<Self::Output> {
        None
    }

    /// Decode a non-empty 2xx body.
    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        decode_json(body)
    }
}

/// Stateless client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Shorthand for `ApiClient::new(ClientConfig::new(base_url))`.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(ClientConfig::new(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build the request for `endpoint`.
    ///
    /// Fails with `ApiError::MissingToken` before anything else when the
    /// endpoint needs auth and `token` is absent or blank. Tokens passed to
    /// public endpoints are not attached.
    pub fn build<E: Endpoint>(&self, endpoint: &E, token: Option<&str>) -> Result<HttpRequest, ApiError> {
        let mut headers = Vec::new();
        if endpoint.requires_auth() {
            let token = token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or(ApiError::MissingToken)?;
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }

        let body = endpoint.body()?;
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        Ok(HttpRequest {
            method: endpoint.method(),
            path: format!(
                "{}/{}",
                self.config.base_url,
                endpoint.path().trim_start_matches('/')
            ),
            query: endpoint.query(),
            headers,
            body,
        })
    }

    /// Parse the response to a request built from `endpoint`.
    pub fn parse<E: Endpoint>(&self, endpoint: &E, response: HttpResponse) -> Result<E::Output, ApiError> {
        if !response.is_success() {
            return Err(ApiError::from_response(&response));
        }
        if response.body.trim().is_empty() {
            return endpoint
                .empty_output()
                .ok_or_else(|| ApiError::Deserialization("empty response body".to_string()));
        }
        endpoint.decode(&response.body)
    }
}

/// Serialize a request payload.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Option<String>, ApiError> {
    serde_json::to_string(value)
        .map(Some)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

pub fn decode_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Decoder for endpoints the backend answers with a bare string. Accepts a
/// JSON string literal too.
pub fn decode_text(body: &str) -> Result<String, ApiError> {
    let trimmed = body.trim();
    if trimmed.starts_with('"') {
        if let Ok(text) = serde_json::from_str::<String>(trimmed) {
            return Ok(text);
        }
    }
    Ok(trimmed.to_string())
}
