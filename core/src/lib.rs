//! Synchronous verb wrapper for exercising a JSON REST API.
//!
//! # Overview
//! `ApiClient` exposes the four verbs a test suite needs — GET, POST,
//! PATCH, DELETE — as blocking operations that hide the transport and
//! serialization boilerplate. Each call performs exactly one round trip
//! and reports its result as an [`Outcome`]: a success flag derived from
//! the status code, plus the full response text (failure bodies included,
//! since tests diagnose server rejections from them).
//!
//! # Design
//! - `ApiClient` holds a configured `ureq::Agent` and a base URL; it
//!   carries no mutable state between calls.
//! - Request bodies come in two forms: pre-serialized JSON text, or any
//!   `Serialize` value wrapped in [`Json`]. Both funnel through one
//!   conversion point so every verb encodes identically.
//! - Non-2xx statuses are data (`succeeded = false`), never errors.
//!   [`ClientError`] is reserved for failures of the exchange itself and
//!   for JSON encode/decode failures.
//! - The `post_json`/`patch_json` forms parse the body only on success
//!   and yield `None` otherwise, so callers that only care about success
//!   payloads never touch failure bodies.

pub mod body;
pub mod client;
pub mod error;
pub mod http;

pub use body::{IntoJsonBody, Json};
pub use client::ApiClient;
pub use error::ClientError;
pub use http::{is_success, Outcome};
