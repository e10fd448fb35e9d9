//! Record builder and pipeline driver.
//!
//! Ties the stages together: span extraction, sentence segmentation,
//! statistics, deontic filtering, record assembly. One document in,
//! zero or more output records out; a document without a regulatory
//! span or with unreadable content contributes nothing and never
//! aborts the run.

use std::path::Path;

use tracing::{debug, warn};

use crate::config::PhraseConfig;
use crate::deontic::DeonticFilter;
use crate::error::Result;
use crate::segment::{unique_sentences, RuleSegmenter, SentenceSegmenter};
use crate::source::{load_document, scan_directory, TextExtractor};
use crate::span::SpanExtractor;
use crate::stats::document_stats;
use crate::types::{Document, OutputRecord, SpanOutcome};

/// Per-document pipeline outcome.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// Records for every qualifying sentence, in discovery order.
    /// May be empty when no sentence qualifies.
    Extracted(Vec<OutputRecord>),

    /// No regulatory span found; the document yields zero rows.
    NoSpan,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents seen in the input directory.
    pub documents: usize,

    /// Documents with a regulatory span.
    pub extracted: usize,

    /// Documents skipped because no span was found.
    pub no_span: usize,

    /// Documents skipped because loading failed.
    pub load_failures: usize,

    /// Output records produced.
    pub records: usize,
}

/// The assembled extraction pipeline.
///
/// Built once from configuration; processing borrows it immutably, so
/// running the same pipeline twice over the same input produces
/// identical output.
pub struct Pipeline {
    config: PhraseConfig,
    span: SpanExtractor,
    filter: DeonticFilter,
    segmenter: Box<dyn SentenceSegmenter>,
}

impl Pipeline {
    /// Build a pipeline with the default rule-based segmenter.
    pub fn new(config: PhraseConfig) -> Result<Self> {
        let span = SpanExtractor::new(&config)?;
        let filter = DeonticFilter::new(&config)?;
        Ok(Self {
            config,
            span,
            filter,
            segmenter: Box::new(RuleSegmenter),
        })
    }

    /// Replace the sentence segmenter.
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: Box<dyn SentenceSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Run the full per-document pipeline.
    #[must_use]
    pub fn process_document(&self, document: &Document) -> DocumentOutcome {
        let span_text = match self.span.extract(&document.raw_text) {
            SpanOutcome::Found(text) => text,
            SpanOutcome::NotFound => {
                debug!(celex = %document.celex, "no regulatory span found");
                return DocumentOutcome::NoSpan;
            }
        };

        let sentences = unique_sentences(&span_text, self.segmenter.as_ref(), &self.config);
        let stats = document_stats(&span_text, &sentences, &self.config);

        let records = sentences
            .iter()
            .filter_map(|sentence| {
                self.filter
                    .classify(sentence)
                    .map(|matched| OutputRecord::new(document, sentence, &matched, stats))
            })
            .collect();

        DocumentOutcome::Extracted(records)
    }

    /// Load and process a single document file.
    pub fn process_path(
        &self,
        path: &Path,
        extractor: &dyn TextExtractor,
    ) -> Result<DocumentOutcome> {
        let document = load_document(path, extractor)?;
        Ok(self.process_document(&document))
    }

    /// Process every document in a directory, in deterministic order.
    ///
    /// Load failures are skipped with a warning; the run never aborts
    /// because of one malformed document.
    pub fn process_directory(
        &self,
        dir: &Path,
        extractor: &dyn TextExtractor,
    ) -> Result<(Vec<OutputRecord>, RunSummary)> {
        self.process_directory_with(dir, extractor, |_| {})
    }

    /// Like [`Pipeline::process_directory`], invoking `progress` with
    /// each path as it is about to be processed.
    pub fn process_directory_with(
        &self,
        dir: &Path,
        extractor: &dyn TextExtractor,
        mut progress: impl FnMut(&Path),
    ) -> Result<(Vec<OutputRecord>, RunSummary)> {
        let paths = scan_directory(dir)?;
        let mut records = Vec::new();
        let mut summary = RunSummary::default();

        for path in &paths {
            progress(path);
            summary.documents += 1;
            match self.process_path(path, extractor) {
                Ok(DocumentOutcome::Extracted(mut document_records)) => {
                    summary.extracted += 1;
                    summary.records += document_records.len();
                    records.append(&mut document_records);
                }
                Ok(DocumentOutcome::NoSpan) => {
                    summary.no_span += 1;
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable document");
                    summary.load_failures += 1;
                }
            }
        }

        Ok((records, summary))
    }
}
