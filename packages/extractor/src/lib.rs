//! EUR-Lex Regulatory Sentence Extractor.
//!
//! This crate extracts candidate regulatory obligation sentences from
//! EU legislative documents (PDF/HTML as published on EUR-Lex) and
//! computes per-document statistics, producing one CSV row per
//! qualifying sentence.
//!
//! # Example
//!
//! ```
//! use eurlex_extractor::config::{celex_year, PhraseConfig};
//!
//! // Year is derived from the CELEX identifier
//! assert_eq!(celex_year("32019R0817"), Some(2019));
//!
//! // Phrase dictionaries ship with usable defaults
//! let config = PhraseConfig::default();
//! assert!(config.deontic_phrases.contains(&"shall".to_string()));
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Phrase dictionaries and CELEX helpers
//! - [`types`]: Core data types (Document, OutputRecord, etc.)
//! - [`error`]: Error types and Result alias
//! - [`source`]: Directory scanning and PDF/HTML text extraction
//! - [`span`]: Regulatory span extraction
//! - [`segment`]: Sentence segmentation and cleanup
//! - [`stats`]: Document-level word/sentence statistics
//! - [`deontic`]: Deontic phrase classification
//! - [`pipeline`]: Record builder and pipeline driver
//! - [`output`]: CSV output writer
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod deontic;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod source;
pub mod span;
pub mod stats;
pub mod types;

// Re-export the pipeline entry points
pub use pipeline::{DocumentOutcome, Pipeline, RunSummary};

// Re-export commonly used items
pub use config::{celex_year, PhraseConfig};
pub use error::{ExtractError, Result};
pub use types::{DocFormat, Document, DocumentStats, OutputRecord, SpanOutcome};
