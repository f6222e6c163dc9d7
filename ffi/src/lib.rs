//! C-ABI wrapper around `serbisyo-core`.
//!
//! # Overview
//! Mobile hosts execute HTTP themselves. They ask this library to build the
//! request for an operation, run it with their own stack, then hand the
//! response back to be parsed. Each build or parse call returns exactly one
//! `FfiResult`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Operations are named in JSON (`{"op": "get_booking", "bookingId": 7}`)
//!   rather than one symbol per endpoint; see `ops`.
//! - Parsed outputs cross back as JSON strings. Errors carry a stable
//!   `FfiErrorCode` plus the user-facing message.
//! - The C caller owns all returned pointers and must call the matching
//!   `serbisyo_free_*` function to release them.

pub mod ops;
pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use serbisyo_core::{ApiClient, ApiError, HttpResponse};

use ops::Operation;
use types::*;

/// Borrow a C string as `&str`. `None` for null or invalid UTF-8.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated string that outlives the
/// returned borrow.
unsafe fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8. Free with
/// `serbisyo_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn serbisyo_client_new(base_url: *const c_char) -> *mut FfiClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { borrow_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let client = ApiClient::with_base_url(url);
        Box::into_raw(Box::new(FfiClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `serbisyo_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn serbisyo_client_free(client: *mut FfiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// Read `client` and `operation`, or produce the error result to return.
fn prepare<'a>(
    client: *const FfiClient,
    operation: *const c_char,
) -> Result<(&'a FfiClient, Operation), *mut FfiResult> {
    if client.is_null() {
        return Err(FfiResult::null_arg("client"));
    }
    if operation.is_null() {
        return Err(FfiResult::null_arg("operation"));
    }
    let client = unsafe { &*client };
    let raw = unsafe { borrow_str(operation) }
        .ok_or_else(|| FfiResult::invalid_operation("not valid UTF-8"))?;
    let op = Operation::from_json(raw).map_err(|e| FfiResult::invalid_operation(&e.to_string()))?;
    Ok((client, op))
}

// ---------------------------------------------------------------------------
// Build / parse
// ---------------------------------------------------------------------------

/// Build the HTTP request for `operation` (JSON).
///
/// `token` may be null for public operations. On success `data_tag` is
/// `Request` and `data` points to an `FfiHttpRequest` owned by the result.
/// An authenticated operation with a null or blank token fails with
/// `MissingToken`.
#[unsafe(no_mangle)]
pub extern "C" fn serbisyo_build(
    client: *const FfiClient,
    operation: *const c_char,
    token: *const c_char,
) -> *mut FfiResult {
    catch_unwind(|| {
        let (client, op) = match prepare(client, operation) {
            Ok(ready) => ready,
            Err(result) => return result,
        };
        let token = unsafe { borrow_str(token) };
        match op.build(&client.inner, token) {
            Ok(req) => FfiResult::ok_request(req),
            Err(e) => FfiResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in serbisyo_build"))
}

/// Parse the host's `response` to a request built for `operation`.
///
/// On success `data_tag` is `Json` and `data` is a C string with the
/// operation's output (`null` for operations without one).
#[unsafe(no_mangle)]
pub extern "C" fn serbisyo_parse(
    client: *const FfiClient,
    operation: *const c_char,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    catch_unwind(|| {
        let (client, op) = match prepare(client, operation) {
            Ok(ready) => ready,
            Err(result) => return result,
        };
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            ""
        } else {
            match unsafe { CStr::from_ptr(resp.body) }.to_str() {
                Ok(body) => body,
                Err(_) => {
                    return FfiResult::from_error(&ApiError::Deserialization(
                        "response body is not valid UTF-8".to_string(),
                    ))
                }
            }
        };
        let parsed = op
            .parse(&client.inner, HttpResponse::new(resp.status, body))
            .and_then(|value| {
                serde_json::to_string(&value)
                    .map_err(|e| ApiError::Serialization(e.to_string()))
            });
        match parsed {
            Ok(json) => FfiResult::ok_json(json),
            Err(e) => FfiResult::from_error(&e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in serbisyo_parse"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a result from `serbisyo_build` or `serbisyo_parse`, including its
/// payload. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn serbisyo_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Request => unsafe { FfiHttpRequest::free(result.data as *mut FfiHttpRequest) },
            FfiDataTag::Json => free_c_string(result.data as *mut c_char),
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn serbisyo_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiClient {
        let url = CString::new("http://localhost:8080").unwrap();
        serbisyo_client_new(url.as_ptr())
    }

    fn build(client: *const FfiClient, op: &str, token: Option<&str>) -> *mut FfiResult {
        let op = CString::new(op).unwrap();
        let token = token.map(|t| CString::new(t).unwrap());
        serbisyo_build(
            client,
            op.as_ptr(),
            token.as_ref().map_or(std::ptr::null(), |t| t.as_ptr()),
        )
    }

    fn parse(client: *const FfiClient, op: &str, status: u16, body: &str) -> *mut FfiResult {
        let op = CString::new(op).unwrap();
        let body = CString::new(body).unwrap();
        let response = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        serbisyo_parse(client, op.as_ptr(), &response)
    }

    fn text(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
    }

    fn request(result: *mut FfiResult) -> &'static FfiHttpRequest {
        let result = unsafe { &*result };
        assert_eq!(result.error_code, FfiErrorCode::Ok);
        assert_eq!(result.data_tag, FfiDataTag::Request);
        unsafe { &*(result.data as *const FfiHttpRequest) }
    }

    fn headers(req: &FfiHttpRequest) -> Vec<(String, String)> {
        if req.headers.is_null() {
            return Vec::new();
        }
        unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) }
            .iter()
            .map(|h| (text(h.key), text(h.value)))
            .collect()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        serbisyo_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        assert!(serbisyo_client_new(std::ptr::null()).is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        serbisyo_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_authenticated_get() {
        let client = new_client();
        let result = build(client, r#"{"op":"get_booking","bookingId":7}"#, Some("tok"));
        let req = request(result);
        assert_eq!(req.method, FfiHttpMethod::Get);
        assert_eq!(text(req.url), "http://localhost:8080/api/bookings/getById/7");
        assert!(req.body.is_null());
        assert_eq!(
            headers(req),
            vec![("authorization".to_string(), "Bearer tok".to_string())]
        );
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn build_puts_query_into_url() {
        let client = new_client();
        let result = build(
            client,
            r#"{"op":"can_review","customerId":5,"bookingId":41}"#,
            Some("tok"),
        );
        let req = request(result);
        assert_eq!(
            text(req.url),
            "http://localhost:8080/api/reviews/can-review?customerId=5&bookingId=41"
        );
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn build_public_post_with_body() {
        let client = new_client();
        let result = build(
            client,
            r#"{"op":"login","userName":"ana","password":"secret123"}"#,
            None,
        );
        let req = request(result);
        assert_eq!(req.method, FfiHttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(&text(req.body)).unwrap();
        assert_eq!(body["userName"], "ana");
        assert_eq!(
            headers(req),
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn build_without_token_is_missing_token() {
        let client = new_client();
        for token in [None, Some("  ")] {
            let result = build(client, r#"{"op":"list_bookings"}"#, token);
            let r = unsafe { &*result };
            assert_eq!(r.error_code, FfiErrorCode::MissingToken);
            assert_eq!(text(r.error_message), "Authentication token is required");
            assert!(r.data.is_null());
            serbisyo_free_result(result);
        }
        serbisyo_client_free(client);
    }

    #[test]
    fn build_rejects_bad_operation_json() {
        let client = new_client();
        let result = build(client, r#"{"op":"nope"}"#, Some("tok"));
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::InvalidOperation);
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn build_validation_error() {
        let client = new_client();
        let result = build(
            client,
            r#"{"op":"submit_review","customerId":1,"providerId":2,"bookingId":3,"rating":9}"#,
            Some("tok"),
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Validation);
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_list_as_json() {
        let client = new_client();
        let result = parse(
            client,
            r#"{"op":"list_bookings"}"#,
            200,
            r#"[{"bookingId":1,"totalCost":100.0},{"bookingId":2,"totalCost":250.0}]"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(r.data_tag, FfiDataTag::Json);
        let value: serde_json::Value = serde_json::from_str(&text(r.data as *const c_char)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["bookingId"], 2);
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_not_found_carries_status_and_message() {
        let client = new_client();
        let result = parse(
            client,
            r#"{"op":"get_booking","bookingId":99}"#,
            404,
            r#"{"message":"Booking not found with ID: 99"}"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NotFound);
        assert_eq!(r.http_status, 404);
        assert!(text(r.error_message).contains("Booking not found with ID: 99"));
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_update_failure_is_not_swallowed() {
        let client = new_client();
        let result = parse(
            client,
            r#"{"op":"update_customer","customerId":3,"customer":{"firstName":"Ana"}}"#,
            500,
            r#"{"message":"db error"}"#,
        );
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 500);
        assert_eq!(text(r.error_message), "db error");
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_unauthorized() {
        let client = new_client();
        let result = parse(client, r#"{"op":"validate_token"}"#, 401, "");
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Unauthorized);
        assert_eq!(r.http_status, 401);
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_rejects_body_that_is_not_utf8() {
        let client = new_client();
        let op = CString::new(r#"{"op":"list_bookings"}"#).unwrap();
        for (status, raw) in [(200, &b"[\xFF]"[..]), (500, &b"{\"m\xFF\"}"[..])] {
            let body = CString::new(raw).unwrap();
            let response = FfiHttpResponse {
                status,
                body: body.as_ptr(),
            };
            let result = serbisyo_parse(client, op.as_ptr(), &response);
            let r = unsafe { &*result };
            assert_eq!(r.error_code, FfiErrorCode::Deserialization);
            assert_eq!(r.data_tag, FfiDataTag::None);
            assert!(r.data.is_null());
            assert!(text(r.error_message).contains("not valid UTF-8"));
            serbisyo_free_result(result);
        }
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_null_body_is_empty() {
        let client = new_client();
        let op = CString::new(r#"{"op":"list_bookings"}"#).unwrap();
        let response = FfiHttpResponse {
            status: 200,
            body: std::ptr::null(),
        };
        let result = serbisyo_parse(client, op.as_ptr(), &response);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(text(r.data as *const c_char), "[]");
        serbisyo_free_result(result);
        serbisyo_client_free(client);
    }

    #[test]
    fn parse_null_args() {
        let client = new_client();
        let op = CString::new(r#"{"op":"list_bookings"}"#).unwrap();

        let result = serbisyo_parse(std::ptr::null(), op.as_ptr(), std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        serbisyo_free_result(result);

        let result = serbisyo_parse(client, op.as_ptr(), std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(text(r.error_message), "null argument: response");
        serbisyo_free_result(result);

        let result = serbisyo_build(client, std::ptr::null(), std::ptr::null());
        assert_eq!(unsafe { &*result }.error_code, FfiErrorCode::NullArg);
        serbisyo_free_result(result);

        serbisyo_client_free(client);
    }

    #[test]
    fn free_result_null_is_safe() {
        serbisyo_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        serbisyo_free_string(std::ptr::null_mut());
    }
}
