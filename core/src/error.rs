//! Error types for the verb wrapper.
//!
//! # Design
//! Only failures of the machinery itself are errors: the exchange not
//! completing, or JSON encode/decode going wrong. A response with an
//! unsuccessful status is a normal outcome (`Outcome::succeeded` is
//! false) and never surfaces here.

use std::fmt;

/// Errors returned by `ApiClient` operations.
#[derive(Debug)]
pub enum ClientError {
    /// The HTTP exchange could not be completed (connection refused,
    /// DNS failure, timeout, protocol error).
    Transport(String),

    /// A structured request body could not be encoded to JSON. Raised
    /// before any network traffic happens.
    Serialization(String),

    /// A parsed-result operation received a successful response whose
    /// body is not valid JSON.
    Deserialization(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ClientError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ClientError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ClientError {}
