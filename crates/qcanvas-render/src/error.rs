//! Error types for frame decoding.

use thiserror::Error;

/// Errors produced while decoding a circuit frame.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// The payload is not valid JSON or does not have the frame shape.
    #[error("Malformed frame: {0}")]
    Json(#[from] serde_json::Error),

    /// `total_epochs` must be positive for progress to be defined.
    #[error("Frame has total_epochs = 0 (epoch {epoch})")]
    InvalidTotalEpochs {
        /// Epoch carried by the rejected frame.
        epoch: u64,
    },
}

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_total_epochs_display() {
        let err = FrameError::InvalidTotalEpochs { epoch: 7 };
        let msg = err.to_string();
        assert!(msg.contains("total_epochs"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn test_json_error_display() {
        let err: FrameError = serde_json::from_str::<u64>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("Malformed frame"));
    }
}
