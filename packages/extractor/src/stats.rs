//! Document-level statistics.
//!
//! Word and sentence counts characterise the document, not the
//! individual sentence: every output record of a document carries the
//! same pair.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::PhraseConfig;
use crate::types::DocumentStats;

/// Tokens shorter than this carry no meaning for word counts.
const MIN_TOKEN_CHARS: usize = 3;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PUNCTUATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Count unique substantive word tokens in a span.
///
/// Tokens are lowercased, stripped of punctuation, and dropped when
/// they are stopwords or shorter than three characters.
#[must_use]
pub fn word_count(span_text: &str, config: &PhraseConfig) -> usize {
    let mut unique: HashSet<String> = HashSet::new();

    for token in span_text.split_whitespace() {
        let token = PUNCTUATION_PATTERN.replace_all(token, "").to_lowercase();
        if token.chars().count() < MIN_TOKEN_CHARS {
            continue;
        }
        if config.stopwords.contains(token.as_str()) {
            continue;
        }
        unique.insert(token);
    }

    unique.len()
}

/// Compute statistics for a document's regulatory span.
///
/// `sentences` must already be deduplicated (see
/// [`crate::segment::unique_sentences`]); an empty span yields zero
/// for both counts.
#[must_use]
pub fn document_stats(
    span_text: &str,
    sentences: &[String],
    config: &PhraseConfig,
) -> DocumentStats {
    DocumentStats {
        word_count: word_count(span_text, config),
        sent_count: sentences.len(),
    }
}
