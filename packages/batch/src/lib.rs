//! Resumable batch runner for the EUR-Lex sentence extractor.
//!
//! Partitions a document corpus by the year embedded in each CELEX
//! identifier and runs the extraction pipeline one partition at a
//! time, persisting a CSV artifact per year. Artifact presence is the
//! completion manifest: a restart skips completed years and
//! reprocesses interrupted ones in full.
//!
//! # Architecture
//!
//! - [`partition`]: Year grouping of document paths
//! - [`orchestrator`]: Partition state machine and artifact handling
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod error;
pub mod orchestrator;
pub mod partition;

// Re-export commonly used items
pub use error::{BatchError, Result};
pub use orchestrator::{BatchSummary, Orchestrator, PartitionState};
pub use partition::partition_by_year;
