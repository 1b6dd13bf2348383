//! Blocking verb operations over a configured `ureq` agent.
//!
//! # Design
//! `ApiClient` holds an agent plus a `base_url` and carries no mutable
//! state between calls, so operations issued from different threads do
//! not interfere. The agent is configured with status-as-error disabled:
//! 4xx/5xx responses come back as ordinary data and are classified by
//! `is_success`, while `Err` from the agent always means the exchange
//! itself failed. Each operation performs exactly one round trip — no
//! retries, no verb-specific timeouts.

use std::time::Duration;

use serde_json::Value;
use ureq::http::{Method, Request};

use crate::body::IntoJsonBody;
use crate::error::ClientError;
use crate::http::{is_success, Outcome};

/// Synchronous client exposing GET/POST/PATCH/DELETE against a JSON API.
///
/// Operations accept either an absolute URI or a path relative to the
/// client's base URL. Deadlines come from the underlying agent (see
/// [`ApiClient::with_timeout`]); the wrapper adds none of its own.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    /// Client with no transport deadline.
    pub fn new(base_url: &str) -> Self {
        Self::build(base_url, None)
    }

    /// Client whose agent aborts any exchange running longer than
    /// `timeout`. The timeout surfaces as [`ClientError::Transport`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self::build(base_url, Some(timeout))
    }

    fn build(base_url: &str, timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Issue a GET. No body is sent.
    pub fn get(&self, uri: &str) -> Result<Outcome, ClientError> {
        let response = self
            .agent
            .get(&self.url(uri))
            .call()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_outcome(response)
    }

    /// Issue a POST with a JSON body (raw text or a [`Json`] wrapper).
    ///
    /// [`Json`]: crate::body::Json
    pub fn post(&self, uri: &str, body: impl IntoJsonBody) -> Result<Outcome, ClientError> {
        let body = body.into_json_body()?;
        let response = self
            .agent
            .post(&self.url(uri))
            .content_type("application/json")
            .send(body.as_bytes())
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_outcome(response)
    }

    /// POST and parse the response body, but only on success.
    ///
    /// Returns `None` when the status classifies as failure; a
    /// successful response whose body is not valid JSON is a
    /// [`ClientError::Deserialization`].
    pub fn post_json(&self, uri: &str, body: impl IntoJsonBody) -> Result<Option<Value>, ClientError> {
        parse_success(self.post(uri, body)?)
    }

    /// Issue a PATCH with a JSON body.
    ///
    /// The agent has no first-class PATCH helper, so the request is
    /// built generically with the `PATCH` method token and run through
    /// the agent directly.
    pub fn patch(&self, uri: &str, body: impl IntoJsonBody) -> Result<Outcome, ClientError> {
        let body = body.into_json_body()?;
        let request = Request::builder()
            .method(Method::PATCH)
            .uri(self.url(uri))
            .header("content-type", "application/json")
            .body(body)
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let response = self
            .agent
            .run(request)
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_outcome(response)
    }

    /// PATCH and parse the response body, but only on success. Same
    /// contract as [`ApiClient::post_json`].
    pub fn patch_json(&self, uri: &str, body: impl IntoJsonBody) -> Result<Option<Value>, ClientError> {
        parse_success(self.patch(uri, body)?)
    }

    /// Issue a DELETE. No body is sent and the response body is
    /// discarded; only the success classification is returned.
    pub fn delete(&self, uri: &str) -> Result<bool, ClientError> {
        let response = self
            .agent
            .delete(&self.url(uri))
            .call()
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(is_success(response.status().as_u16()))
    }

    fn url(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_owned()
        } else {
            format!("{}/{}", self.base_url, uri.trim_start_matches('/'))
        }
    }
}

/// Drain the response into an `Outcome`. The body is read fully even on
/// failure statuses, since callers diagnose rejections from it.
fn read_outcome(mut response: ureq::http::Response<ureq::Body>) -> Result<Outcome, ClientError> {
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    Ok(Outcome {
        succeeded: is_success(status),
        body,
    })
}

/// Gate for the `*_json` convenience forms: parse only successful
/// bodies, map failure outcomes to `None`.
fn parse_success(outcome: Outcome) -> Result<Option<Value>, ClientError> {
    if !outcome.succeeded {
        return Ok(None);
    }
    serde_json::from_str(&outcome.body)
        .map(Some)
        .map_err(|e| ClientError::Deserialization(e.to_string()))
}
