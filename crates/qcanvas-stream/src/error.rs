//! Error types for stream consumption.

use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that end a stream.
///
/// Malformed frames are not errors: they are logged and skipped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StreamError {
    /// A request field is not valid JSON.
    #[error("Invalid {field}: {source}")]
    InvalidRequest {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// Connecting or reading failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Stream endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The byte stream broke for a reason other than HTTP.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl StreamError {
    /// Whether the failure happened on the wire rather than in the request.
    pub fn is_transport(&self) -> bool {
        !matches!(self, StreamError::InvalidRequest { .. })
    }
}
