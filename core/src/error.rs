//! Error types for the equipment registry client.
//!
//! # Design
//! Every failure reaches the caller through the single `ApiError` channel —
//! there is no silent recovery and no automatic retry. The one local
//! concession is diagnostic: when the server answers with a non-success
//! status, the response body is captured best-effort for the `Http` variant,
//! and a failure to read it degrades to `None` rather than producing a
//! secondary error.

use thiserror::Error;

/// Errors returned by [`EquipmentClient`](crate::EquipmentClient) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not complete within the configured wait bound.
    #[error("request timed out")]
    Timeout,

    /// Transport-level failure before any response arrived (DNS, connection
    /// refused, broken stream).
    #[error("network failure: {0}")]
    Network(String),

    /// The server responded with a non-success status code. The body text is
    /// captured on a best-effort basis.
    #[error("HTTP {status}{}", .body.as_deref().map(|b| format!(": {b}")).unwrap_or_default())]
    Http { status: u16, body: Option<String> },

    /// A success response's body could not be parsed as the expected JSON
    /// shape, or a body was missing where one is required.
    #[error("decoding failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the server reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }
}
