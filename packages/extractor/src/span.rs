//! Regulatory span extraction.
//!
//! EU legislative documents carry the legally operative text between a
//! standard enactment phrase ("HAS ADOPTED THIS REGULATION") and the
//! signature block ("Done at Brussels, ..."). Everything outside those
//! markers is preamble or boilerplate and never produces output rows.

use regex::Regex;
use tracing::debug;

use crate::config::PhraseConfig;
use crate::error::{ExtractError, Result};
use crate::types::SpanOutcome;

/// Soft hyphen left behind by PDF line breaking.
const SOFT_HYPHEN: char = '\u{00AD}';

/// Locates the regulatory span using configured marker phrases.
///
/// Marker patterns are compiled once at construction; matching is
/// case-insensitive against the original text so byte offsets stay
/// valid for slicing.
#[derive(Debug)]
pub struct SpanExtractor {
    start_markers: Vec<Regex>,
    end_markers: Vec<Regex>,
}

impl SpanExtractor {
    /// Compile marker phrases from configuration.
    pub fn new(config: &PhraseConfig) -> Result<Self> {
        Ok(Self {
            start_markers: compile_markers(&config.start_markers)?,
            end_markers: compile_markers(&config.end_markers)?,
        })
    }

    /// Extract the text strictly between the first start marker and
    /// the first end marker occurring after it.
    #[must_use]
    pub fn extract(&self, raw_text: &str) -> SpanOutcome {
        let Some(span_start) = first_match_end(&self.start_markers, raw_text, 0) else {
            debug!("no start marker found");
            return SpanOutcome::NotFound;
        };

        let Some(span_end) = first_match_start(&self.end_markers, raw_text, span_start) else {
            debug!("no end marker found after start marker");
            return SpanOutcome::NotFound;
        };

        SpanOutcome::Found(flatten(&raw_text[span_start..span_end]))
    }
}

/// Compile phrases into case-insensitive literal patterns.
fn compile_markers(phrases: &[String]) -> Result<Vec<Regex>> {
    phrases
        .iter()
        .map(|phrase| {
            Regex::new(&format!("(?i){}", regex::escape(phrase))).map_err(|source| {
                ExtractError::Pattern {
                    phrase: phrase.clone(),
                    source,
                }
            })
        })
        .collect()
}

/// Byte offset just past the earliest match of any pattern at or after
/// `from`, or `None` when nothing matches.
fn first_match_end(patterns: &[Regex], text: &str, from: usize) -> Option<usize> {
    patterns
        .iter()
        .filter_map(|p| p.find_at(text, from))
        .min_by_key(|m| m.start())
        .map(|m| m.end())
}

/// Byte offset of the earliest match of any pattern at or after `from`.
fn first_match_start(patterns: &[Regex], text: &str, from: usize) -> Option<usize> {
    patterns
        .iter()
        .filter_map(|p| p.find_at(text, from))
        .min_by_key(|m| m.start())
        .map(|m| m.start())
}

/// Flatten extracted text: newlines become spaces, soft hyphens from
/// PDF line wrapping are removed.
fn flatten(span: &str) -> String {
    let mut text = span.replace('\n', " ");
    if text.contains(SOFT_HYPHEN) {
        text = text.replace(&format!("{SOFT_HYPHEN} "), "");
        text = text.replace(SOFT_HYPHEN, "");
    }
    text
}
