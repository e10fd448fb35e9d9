//! Resumable batch orchestration over year partitions.
//!
//! Each year is a resumable unit. The on-disk manifest is the set of
//! per-year artifacts themselves: a partition whose artifact exists is
//! complete and is never reprocessed; a crash mid-partition leaves no
//! artifact (the CSV writer renames atomically), so a restart
//! reprocesses that whole partition. At-least-once per partition,
//! never partially persisted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use eurlex_extractor::output::write_records;
use eurlex_extractor::source::{scan_directory, TextExtractor};
use eurlex_extractor::{DocumentOutcome, Pipeline};

use crate::error::{BatchError, Result};
use crate::partition::partition_by_year;

/// Lifecycle of a year partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionState {
    /// Not yet processed; no artifact on disk.
    Pending,

    /// Pipeline currently running over the partition's documents.
    InProgress,

    /// Artifact persisted (this run or a previous one).
    Complete,
}

/// Result of processing one partition.
#[derive(Debug, Clone, Copy)]
pub struct PartitionReport {
    pub year: u16,
    pub documents: usize,
    pub skipped_documents: usize,
    pub records: usize,
}

/// Counters for a whole batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Partitions processed to completion in this run.
    pub completed: usize,

    /// Partitions skipped because their artifact already existed.
    pub resumed: usize,

    /// Partitions that failed to persist (only non-zero with
    /// `keep_going`).
    pub failed: usize,

    /// Records written in this run.
    pub records: usize,

    /// Documents seen in partitions processed this run. Resumed
    /// partitions contribute nothing.
    pub documents: usize,

    /// Documents skipped because loading failed.
    pub skipped_documents: usize,

    /// Documents without a usable CELEX year.
    pub unpartitioned: usize,

    /// Final state per year.
    pub states: BTreeMap<u16, PartitionState>,
}

/// Drives the extraction pipeline partition by partition.
pub struct Orchestrator<'a> {
    pipeline: &'a Pipeline,
    extractor: &'a dyn TextExtractor,
    output_dir: PathBuf,
    keep_going: bool,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator writing per-year artifacts into
    /// `output_dir`.
    pub fn new(
        pipeline: &'a Pipeline,
        extractor: &'a dyn TextExtractor,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pipeline,
            extractor,
            output_dir: output_dir.into(),
            keep_going: false,
        }
    }

    /// Continue with the next partition after an unexpected partition
    /// failure instead of aborting the run.
    #[must_use]
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Artifact path for a year partition.
    #[must_use]
    pub fn artifact_path(&self, year: u16) -> PathBuf {
        self.output_dir.join(format!("sentences_{year}.csv"))
    }

    /// Run the batch over all documents in `input`.
    pub fn run(&self, input: &Path) -> Result<BatchSummary> {
        if !self.output_dir.is_dir() {
            return Err(BatchError::InvalidInput(format!(
                "output directory does not exist: {}",
                self.output_dir.display()
            )));
        }

        let paths = scan_directory(input)?;
        let (partitions, unpartitioned) = partition_by_year(&paths);

        for path in &unpartitioned {
            warn!(path = %path.display(), "no CELEX year in filename, document not processed");
        }

        let mut summary = BatchSummary {
            unpartitioned: unpartitioned.len(),
            ..BatchSummary::default()
        };

        for (year, partition_paths) in &partitions {
            let year = *year;
            summary.states.insert(year, PartitionState::Pending);

            if self.artifact_path(year).exists() {
                info!(year, "artifact exists, skipping partition");
                summary.states.insert(year, PartitionState::Complete);
                summary.resumed += 1;
                continue;
            }

            summary.states.insert(year, PartitionState::InProgress);
            match self.process_partition(year, partition_paths) {
                Ok(report) => {
                    info!(
                        year,
                        documents = report.documents,
                        records = report.records,
                        "partition complete"
                    );
                    summary.states.insert(year, PartitionState::Complete);
                    summary.completed += 1;
                    summary.records += report.records;
                    summary.documents += report.documents;
                    summary.skipped_documents += report.skipped_documents;
                }
                Err(e) if self.keep_going => {
                    warn!(year, error = %e, "partition failed, continuing");
                    // No artifact was written; the partition stays
                    // pending and will be reprocessed on restart
                    summary.states.insert(year, PartitionState::Pending);
                    summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(summary)
    }

    /// Run the pipeline over one partition and persist its artifact.
    ///
    /// Per-document failures are isolated: the document is skipped
    /// with a warning and the partition still completes.
    fn process_partition(&self, year: u16, paths: &[PathBuf]) -> Result<PartitionReport> {
        info!(year, documents = paths.len(), "processing partition");

        let mut records = Vec::new();
        let mut skipped_documents = 0;

        for path in paths {
            match self.pipeline.process_path(path, self.extractor) {
                Ok(DocumentOutcome::Extracted(mut document_records)) => {
                    records.append(&mut document_records);
                }
                Ok(DocumentOutcome::NoSpan) => {
                    debug!(path = %path.display(), "no regulatory span");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable document");
                    skipped_documents += 1;
                }
            }
        }

        let record_count = records.len();
        write_records(&self.artifact_path(year), &records).map_err(|e| {
            BatchError::Partition {
                year,
                message: e.to_string(),
            }
        })?;

        Ok(PartitionReport {
            year,
            documents: paths.len(),
            skipped_documents,
            records: record_count,
        })
    }
}
