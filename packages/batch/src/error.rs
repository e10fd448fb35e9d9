//! Error types for the batch runner.

use thiserror::Error;

use eurlex_extractor::ExtractError;

/// Main error type for the batch library.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Input or output path is missing or of the wrong kind.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error surfaced from the extraction pipeline.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A year partition could not be persisted.
    ///
    /// The partition's artifact was never written, so a restart will
    /// reprocess the whole partition.
    #[error("Partition {year} failed: {message}")]
    Partition { year: u16, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_error_display() {
        let err = BatchError::Partition {
            year: 2019,
            message: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Partition 2019 failed: disk full");
    }
}
