//! Exchange-level types: the outcome returned to callers and the
//! success classifier.

/// Result of one completed HTTP exchange.
///
/// `succeeded` is derived solely from the status code via [`is_success`].
/// `body` always carries the full response text, including on failure —
/// test callers read server rejection messages out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub succeeded: bool,
    pub body: String,
}

/// Classify a status code as success or failure.
///
/// Strictly 2xx counts as success. The agent follows redirects itself,
/// so a 3xx reaching the caller means the redirect could not be
/// followed, and it classifies as failure along with 4xx and 5xx.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
