//! Async transport for the SerbisYo API.
//!
//! # Overview
//! `serbisyo-core` builds requests and parses responses; this crate moves the
//! bytes with `reqwest` and keeps the session token. Every call is one future
//! resolving once to `Result<T, ApiError>`.
//!
//! # Design
//! - `SerbisYoClient` is `Clone` and shares one connection pool between
//!   clones. The token sits behind a `tokio::sync::RwLock` inside the client,
//!   never in a global.
//! - Dropping a call's future cancels it. `send_until` and
//!   `send_with_deadline` make cancellation and deadlines explicit for callers
//!   that need a result either way.

mod client;
mod transport;

pub use client::SerbisYoClient;
pub use serbisyo_core::{ApiError, ClientConfig};
