//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversions live here so `lib.rs`
//! stays focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use serbisyo_core::{ApiClient, ApiError, HttpMethod, HttpRequest};

/// Opaque handle to an `ApiClient`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiClient {
    pub(crate) inner: ApiClient,
}

/// Owned C string. Interior NULs cannot cross the boundary and are dropped.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let s: String = s.into();
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request for the host to execute.
///
/// `url` already carries the percent-encoded query string. `body` is null
/// when the request has none.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = c_string(req.url());
        let body = match req.body {
            Some(b) => c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
        }))
    }

    /// Release everything `from_core` allocated.
    ///
    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-owned)
// ---------------------------------------------------------------------------

/// A response the host received. The FFI layer reads but never frees it.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result envelope
// ---------------------------------------------------------------------------

/// Stable error codes. Values never change once shipped.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    MissingToken = 1,
    Unauthorized = 2,
    Forbidden = 3,
    NotFound = 4,
    Http = 5,
    Timeout = 6,
    Network = 7,
    Cancelled = 8,
    Deserialization = 9,
    Serialization = 10,
    Validation = 11,
    InvalidOperation = 12,
    NullArg = 13,
    Panic = 14,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::MissingToken => FfiErrorCode::MissingToken,
            ApiError::Unauthorized => FfiErrorCode::Unauthorized,
            ApiError::Forbidden(_) => FfiErrorCode::Forbidden,
            ApiError::NotFound(_) => FfiErrorCode::NotFound,
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::Timeout => FfiErrorCode::Timeout,
            ApiError::Network(_) => FfiErrorCode::Network,
            ApiError::Cancelled => FfiErrorCode::Cancelled,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Serialization(_) => FfiErrorCode::Serialization,
            ApiError::Validation(_) => FfiErrorCode::Validation,
        }
    }
}

/// What `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    /// `*mut FfiHttpRequest`
    Request = 1,
    /// `*mut c_char` holding the operation's output as JSON.
    Json = 2,
}

/// Envelope for every build and parse call.
///
/// On success `error_code` is `Ok`, `error_message` is null and `data` is
/// tagged by `data_tag`. On failure `error_message` is the user-facing text,
/// `http_status` is set when the error came from a response, and `data` is
/// null. Free with `serbisyo_free_result`.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        http_status: u16,
        data_tag: FfiDataTag,
        data: *mut c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message,
            http_status,
            data_tag,
            data,
        }))
    }

    pub(crate) fn ok_request(req: HttpRequest) -> *mut Self {
        let data = FfiHttpRequest::from_core(req) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::Request, data)
    }

    pub(crate) fn ok_json(json: String) -> *mut Self {
        let data = c_string(json) as *mut c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), 0, FfiDataTag::Json, data)
    }

    pub(crate) fn from_error(err: &ApiError) -> *mut Self {
        Self::boxed(
            err.into(),
            c_string(err.to_string()),
            err.status().unwrap_or(0),
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    pub(crate) fn invalid_operation(reason: &str) -> *mut Self {
        Self::failure(FfiErrorCode::InvalidOperation, format!("invalid operation: {reason}"))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string())
    }

    fn failure(code: FfiErrorCode, message: String) -> *mut Self {
        Self::boxed(code, c_string(message), 0, FfiDataTag::None, std::ptr::null_mut())
    }
}
