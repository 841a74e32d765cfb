//! Error types for SILTA
//!
//! Every fault that can abort an inbound request maps to an HTTP status at
//! the request boundary: client-shaped input faults become 400, relay
//! transport faults become 502. Faults are scoped to the request that raised
//! them and never affect other in-flight requests.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

/// Result type alias for SILTA operations
pub type Result<T> = std::result::Result<T, SiltaError>;

/// Main error type for SILTA
#[derive(Error, Debug)]
pub enum SiltaError {
    /// Inbound body is not a valid collectd JSON batch
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A sample's values and dsnames differ in length
    #[error("sample {sample}: {values} values but {names} value names")]
    Shape {
        sample: usize,
        values: usize,
        names: usize,
    },

    /// Outbound request could not be issued at the transport level
    #[error("relay error: {0}")]
    Relay(#[from] reqwest::Error),
}

impl SiltaError {
    /// HTTP status this fault maps to at the inbound boundary
    pub fn status(&self) -> StatusCode {
        match self {
            SiltaError::Decode(_) | SiltaError::Shape { .. } => StatusCode::BAD_REQUEST,
            SiltaError::Relay(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for SiltaError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Request aborted");
        (self.status(), self.to_string()).into_response()
    }
}
