//! Provider failure taxonomy.
//!
//! Every failure demotes the request to the next tier; nothing here is ever
//! surfaced to the caller as an error response.

use thiserror::Error;

/// Why a provider call failed.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network problem, timeout, auth rejection, or non-2xx status.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered, but the body did not match the expected schema.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Classify a transport-level reqwest error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Unavailable(format!("request timeout: {err}"))
        } else if err.is_connect() {
            ProviderError::Unavailable(format!("connection failed: {err}"))
        } else {
            ProviderError::Unavailable(format!("request failed: {err}"))
        }
    }

    /// Build an error from a non-success HTTP status.
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let snippet: String = body.chars().take(200).collect();
        ProviderError::Unavailable(format!("HTTP {status}: {snippet}"))
    }
}
