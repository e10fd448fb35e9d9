//! Phrase dictionaries and configuration for the extractor.
//!
//! All phrase sets are configuration, not hard-coded per call: the
//! defaults below match the dictionaries used to build the EUR-Lex
//! sentence corpus, and every set can be overridden from a YAML file
//! without code changes.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Minimum number of non-space characters for a string to count as a
/// sentence. Shorter fragments are almost always headings or page
/// furniture.
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 15;

/// CELEX year: four digits following the one-character sector of the
/// CELEX number, with an optional two-letter language prefix (as used
/// in downloaded filenames, e.g. `EN_32019R0817`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CELEX_YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]{2}[_-])?[0-9CE](\d{4})[A-Z]").expect("valid regex"));

/// Extract the year from a CELEX identifier.
///
/// Returns `None` when the identifier does not follow the CELEX
/// numbering convention or the year is implausible.
///
/// # Examples
/// ```
/// use eurlex_extractor::config::celex_year;
///
/// assert_eq!(celex_year("32019R0817"), Some(2019));
/// assert_eq!(celex_year("EN_31995L0046"), Some(1995));
/// assert_eq!(celex_year("not-a-celex"), None);
/// ```
#[must_use]
pub fn celex_year(celex: &str) -> Option<u16> {
    let captures = CELEX_YEAR_PATTERN.captures(celex)?;
    let year: u16 = captures.get(1)?.as_str().parse().ok()?;
    (1900..=2100).contains(&year).then_some(year)
}

/// Phrase dictionaries driving span extraction, sentence filtering and
/// deontic classification.
///
/// Loaded once at process start and passed by reference to the
/// pipeline stages; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConfig {
    /// Enactment phrases marking the start of the regulatory span.
    pub start_markers: Vec<String>,

    /// Closing phrases marking the end of the regulatory span.
    pub end_markers: Vec<String>,

    /// Modal phrases signalling legal obligation or prohibition.
    pub deontic_phrases: Vec<String>,

    /// Phrases that mark a sentence as non-obligatory boilerplate even
    /// when it contains a deontic phrase.
    pub exclusion_phrases: Vec<String>,

    /// Phrases that disqualify a sentence when they occur at its start.
    pub excluded_start_phrases: Vec<String>,

    /// Structural heading tokens stripped from sentence starts.
    pub heading_tokens: Vec<String>,

    /// Tokens ignored when computing document word counts.
    pub stopwords: HashSet<String>,

    /// Minimum non-space character length for a valid sentence.
    pub min_sentence_chars: usize,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            start_markers: default_start_markers(),
            end_markers: default_end_markers(),
            deontic_phrases: default_deontic_phrases(),
            exclusion_phrases: default_exclusion_phrases(),
            excluded_start_phrases: default_excluded_start_phrases(),
            heading_tokens: default_heading_tokens(),
            stopwords: default_stopwords(),
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
        }
    }
}

impl PhraseConfig {
    /// Load configuration from a YAML file.
    ///
    /// Fields absent from the file keep their defaults, so a config
    /// file may override a single phrase set.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content).map_err(|source| ExtractError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn default_start_markers() -> Vec<String> {
    [
        "has adopted this regulation",
        "have adopted this regulation",
        "has decided as follows",
        "have adopted this decision",
        "has adopted this decision",
        "has adopted this directive",
    ]
    .map(String::from)
    .to_vec()
}

fn default_end_markers() -> Vec<String> {
    [
        "done at brussels",
        "done at luxembourg",
        "done at strasbourg",
        "done at frankfurt",
    ]
    .map(String::from)
    .to_vec()
}

fn default_deontic_phrases() -> Vec<String> {
    [
        "shall",
        "shall not",
        "must",
        "must not",
        "is required to",
        "are required to",
        "is prohibited from",
        "are prohibited from",
    ]
    .map(String::from)
    .to_vec()
}

fn default_exclusion_phrases() -> Vec<String> {
    [
        "shall apply",
        "shall mean",
        "this regulation shall apply",
        "shall be binding in its entirety and directly applicable in the member states",
        "shall be binding in its entirety and directly applicable in all member states",
        "shall enter into force",
        "shall be based",
        "within the meaning",
        "shall be construed",
        "shall take effect",
    ]
    .map(String::from)
    .to_vec()
}

fn default_excluded_start_phrases() -> Vec<String> {
    [
        "amendments to decision",
        "amendments to implementing decision",
        "in this case,",
        "in such a case,",
        "in such cases,",
        "in all other cases,",
    ]
    .map(String::from)
    .to_vec()
}

fn default_heading_tokens() -> Vec<String> {
    [
        "Article", "Chapter", "Section", "Paragraph", "ARTICLE", "CHAPTER", "SECTION", "PARAGRAPH",
    ]
    .map(String::from)
    .to_vec()
}

fn default_stopwords() -> HashSet<String> {
    [
        "the", "and", "this", "that", "for", "with", "are", "its", "which", "have", "has", "these",
        "those", "from", "was", "were", "had", "into", "then",
    ]
    .map(String::from)
    .into_iter()
    .collect()
}
