use std::time::Instant;

use serbisyo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Timeouts get their own variant so the user sees a different message from
/// a refused or dropped connection.
pub(crate) fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.without_url().to_string())
    }
}

/// Execute a built request. Non-2xx statuses come back as data for
/// `ApiClient::parse` to map.
pub(crate) async fn execute(http: &reqwest::Client, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let started = Instant::now();
    let mut builder = http
        .request(method(request.method), &request.path)
        .query(&request.query);
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await.map_err(|e| {
        tracing::warn!(method = %request.method, path = %request.path, error = %e, "request failed");
        transport_error(e)
    })?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response.text().await.map_err(transport_error)?;

    tracing::debug!(
        method = %request.method,
        path = %request.path,
        status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
