//! Deontic phrase classification.
//!
//! A sentence is a regulatory candidate when it contains at least one
//! deontic phrase (whole-word, case-insensitive) and no exclusion
//! phrase. Exclusions cover legal boilerplate that reads like an
//! obligation but is not one ("shall enter into force", "shall be
//! binding in its entirety...").
//!
//! This is explicitly a heuristic to reduce the search space for a
//! downstream classifier. False positives and negatives are accepted;
//! ambiguous text never raises an error.

use regex::Regex;

use crate::config::PhraseConfig;
use crate::error::{ExtractError, Result};
use crate::types::DeonticMatch;

/// Classifies sentences against configured deontic and exclusion
/// phrase sets. Patterns are compiled once at construction.
#[derive(Debug)]
pub struct DeonticFilter {
    /// Deontic phrase paired with its whole-word matcher.
    patterns: Vec<(String, Regex)>,

    /// Exclusion phrases, lowercased for substring matching.
    exclusions: Vec<String>,
}

impl DeonticFilter {
    /// Compile phrase sets from configuration.
    pub fn new(config: &PhraseConfig) -> Result<Self> {
        let patterns = config
            .deontic_phrases
            .iter()
            .map(|phrase| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(phrase));
                Regex::new(&pattern)
                    .map(|re| (phrase.clone(), re))
                    .map_err(|source| ExtractError::Pattern {
                        phrase: phrase.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let exclusions = config
            .exclusion_phrases
            .iter()
            .map(|phrase| phrase.to_lowercase())
            .collect();

        Ok(Self {
            patterns,
            exclusions,
        })
    }

    /// Classify a sentence as a regulatory candidate.
    ///
    /// Returns the matched deontic phrases in order of first
    /// appearance (each phrase once, longer phrases shadowing their
    /// prefixes), or `None` when the sentence does not qualify.
    #[must_use]
    pub fn classify(&self, sentence: &str) -> Option<DeonticMatch> {
        let normalized = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
        let lowered = normalized.to_lowercase();

        if self.exclusions.iter().any(|e| lowered.contains(e)) {
            return None;
        }

        // All whole-word matches of all phrases
        let mut spans: Vec<(usize, usize, &str)> = Vec::new();
        for (phrase, pattern) in &self.patterns {
            for found in pattern.find_iter(&normalized) {
                spans.push((found.start(), found.end(), phrase.as_str()));
            }
        }
        if spans.is_empty() {
            return None;
        }

        // A match contained in a longer match is shadowed by it:
        // "shall" inside "shall not" reports only "shall not"
        let kept: Vec<(usize, &str)> = spans
            .iter()
            .filter(|&&(start, end, _)| {
                !spans
                    .iter()
                    .any(|&(s, e, _)| s <= start && end <= e && (e - s) > (end - start))
            })
            .map(|&(start, _, phrase)| (start, phrase))
            .collect();

        // First surviving occurrence per phrase, ordered by position
        let mut ordered: Vec<(usize, &str)> = Vec::new();
        for &(start, phrase) in &kept {
            match ordered.iter_mut().find(|(_, p)| *p == phrase) {
                Some(entry) => entry.0 = entry.0.min(start),
                None => ordered.push((start, phrase)),
            }
        }
        ordered.sort_by_key(|&(start, _)| start);

        Some(DeonticMatch {
            phrases: ordered.into_iter().map(|(_, p)| p.to_string()).collect(),
        })
    }
}
