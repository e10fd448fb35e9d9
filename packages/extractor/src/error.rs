//! Error types for the extractor.
//!
//! Only genuine failures are errors: a document without a regulatory
//! span and a sentence without a deontic phrase are normal outcomes,
//! represented as enum variants and `Option` respectively.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Input or output path is missing or of the wrong kind.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Document content could not be decoded or parsed.
    ///
    /// Callers treat this as "skip this document", not as a run abort.
    #[error("Failed to load document {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// A configured phrase could not be compiled into a match pattern.
    #[error("Invalid phrase pattern '{phrase}': {source}")]
    Pattern {
        phrase: String,
        #[source]
        source: regex::Error,
    },

    /// Phrase configuration file could not be parsed.
    #[error("Failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing failed.
    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
