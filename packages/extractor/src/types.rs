//! Core data types for the extractor.
//!
//! Every stage of the pipeline produces new immutable values; nothing
//! here is mutated after construction.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source format of a legislative document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    Pdf,
    Html,
}

impl DocFormat {
    /// Lower-case format tag used in the output table.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
        }
    }

    /// Detect format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// A loaded legislative document.
#[derive(Debug, Clone)]
pub struct Document {
    /// CELEX identifier, taken from the filename stem.
    pub celex: String,

    /// Raw extracted text, before span isolation.
    pub raw_text: String,

    /// Source format tag.
    pub format: DocFormat,
}

/// Outcome of regulatory span extraction.
///
/// Span-not-found is a skip condition, not an error: the document
/// simply contributes no output rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanOutcome {
    /// Text strictly between the start and end markers.
    Found(String),

    /// No start marker, or no end marker after it.
    NotFound,
}

/// Document-level statistics, attached identically to every output
/// record of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    /// Unique non-stopword tokens in the regulatory span.
    pub word_count: usize,

    /// Unique sentences in the regulatory span.
    pub sent_count: usize,
}

/// Deontic phrases found in a sentence, in order of first appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeonticMatch {
    pub phrases: Vec<String>,
}

impl DeonticMatch {
    /// Pipe-delimited field value for the output table.
    #[must_use]
    pub fn to_field(&self) -> String {
        self.phrases.join(" | ")
    }
}

/// One row of the output table: a candidate regulatory sentence with
/// its document context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub celex: String,
    pub sent: String,
    pub deontic: String,
    pub word_count: usize,
    pub sent_count: usize,
    pub doc_format: String,
}

impl OutputRecord {
    /// Assemble a record for one qualifying sentence.
    #[must_use]
    pub fn new(
        document: &Document,
        sentence: impl Into<String>,
        deontic: &DeonticMatch,
        stats: DocumentStats,
    ) -> Self {
        Self {
            celex: document.celex.clone(),
            sent: sentence.into(),
            deontic: deontic.to_field(),
            word_count: stats.word_count,
            sent_count: stats.sent_count,
            doc_format: document.format.as_str().to_string(),
        }
    }
}
