//! Typed client core for the SerbisYo marketplace API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, so the core stays deterministic and testable. The
//! async transport lives in `serbisyo-client`; the C ABI in `serbisyo-ffi`.
//!
//! # Design
//! - `ApiClient` holds only a `ClientConfig`. Every backend operation is a
//!   value implementing `Endpoint` (see `endpoints`), so one `build` / `parse`
//!   pair serves the whole API.
//! - `ApiError` carries one status-to-message policy for every endpoint.
//! - DTOs in `types` are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod datetime;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod reconcile;
pub mod types;

pub use client::{ApiClient, Endpoint};
pub use config::{ApiEnvironment, ClientConfig};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
