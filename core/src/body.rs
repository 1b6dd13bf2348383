//! Request-body conversion.
//!
//! # Design
//! Body-carrying verbs accept either pre-serialized JSON text or a
//! structured value. Both are expressed through [`IntoJsonBody`], so the
//! conversion to wire text happens at exactly one point and every verb
//! encodes structured values the same way.

use serde::Serialize;

use crate::error::ClientError;

/// Marker wrapper for a structured request body.
///
/// `client.post(uri, Json(&payload))` serializes `payload` with
/// `serde_json` before transmission; `client.post(uri, text)` sends the
/// text verbatim. The two forms produce identical requests when `text`
/// is the serialization of `payload`.
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

/// Conversion of a caller-supplied body into JSON text.
pub trait IntoJsonBody {
    fn into_json_body(self) -> Result<String, ClientError>;
}

impl IntoJsonBody for &str {
    fn into_json_body(self) -> Result<String, ClientError> {
        Ok(self.to_owned())
    }
}

impl IntoJsonBody for String {
    fn into_json_body(self) -> Result<String, ClientError> {
        Ok(self)
    }
}

impl IntoJsonBody for &String {
    fn into_json_body(self) -> Result<String, ClientError> {
        Ok(self.clone())
    }
}

impl<T: Serialize> IntoJsonBody for Json<T> {
    fn into_json_body(self) -> Result<String, ClientError> {
        serde_json::to_string(&self.0).map_err(|e| ClientError::Serialization(e.to_string()))
    }
}
