//! Sentence segmentation and cleanup.
//!
//! Boundary detection itself sits behind the [`SentenceSegmenter`]
//! trait so a different tokenizer can be plugged in; this module's own
//! job is the cleanup around it: stripping heading tokens and inline
//! article references, rejecting page furniture, and deduplicating
//! while preserving first-occurrence order. Legal documents repeat
//! boilerplate sentences across articles, and duplicates must neither
//! double-count in statistics nor appear twice in output.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::PhraseConfig;

/// Opaque sentence-boundary detection capability.
pub trait SentenceSegmenter {
    /// Split text into candidate sentences, in document order.
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Common abbreviations in legal citations that never end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "no", "nos", "art", "arts", "para", "paras", "p", "pp", "etc", "cf", "vol", "approx", "incl",
];

/// Default rule-based segmenter.
///
/// Splits on `.`, `?` and `!` followed by whitespace and an upper-case
/// or numeric continuation, with guards for citation abbreviations,
/// single-letter initials and decimal numbers. Deliberately
/// approximate; downstream validity rules catch most fragments.
#[derive(Debug, Default)]
pub struct RuleSegmenter;

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut start = 0usize;

        for (i, &(pos, c)) in chars.iter().enumerate() {
            if !matches!(c, '.' | '?' | '!') {
                continue;
            }
            if !is_boundary(text, &chars, i) {
                continue;
            }
            let end = pos + c.len_utf8();
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = end;
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }
}

/// Decide whether the terminator at `chars[i]` ends a sentence.
fn is_boundary(text: &str, chars: &[(usize, char)], i: usize) -> bool {
    // Terminator must be followed by whitespace (or end of text)
    match chars.get(i + 1) {
        None => return true,
        Some(&(_, next)) if !next.is_whitespace() => return false,
        _ => {}
    }

    // Continuation must not start lower-case
    let continuation = chars[i + 1..]
        .iter()
        .map(|&(_, c)| c)
        .find(|c| !c.is_whitespace());
    match continuation {
        None => return true,
        Some(c) if c.is_lowercase() => return false,
        _ => {}
    }

    // Abbreviation guards only apply to full stops
    if chars[i].1 != '.' {
        return true;
    }

    let token = preceding_token(text, chars[i].0);
    if token.len() == 1 && token.chars().all(char::is_alphabetic) {
        return false; // Initial or "e.g."-style fragment
    }
    !ABBREVIATIONS.contains(&token.to_lowercase().as_str())
}

/// Alphanumeric run immediately before byte position `pos`.
fn preceding_token(text: &str, pos: usize) -> &str {
    let head = &text[..pos];
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric())
        .last()
        .map_or(pos, |(i, _)| i);
    &head[start..]
}

/// Inline article reference followed by the capital that begins the
/// real sentence, e.g. "Article 12a The operator...".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_REF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bArticle \s*\d{1,3}[a-z]?\s*[A-Z]").expect("valid regex"));

/// First cleanup pass: strip the leading colon carried over from the
/// enactment phrase and collapse inline "Article N" references down to
/// the capital letter that follows them.
#[must_use]
pub fn clean_sentence_pass1(sentence: &str) -> String {
    let mut text = sentence.trim().to_string();
    if let Some(stripped) = text.strip_prefix(':') {
        text = stripped.trim().to_string();
    }

    // Each replacement strictly shrinks the string, so this terminates
    loop {
        let Some((range, capital)) = ARTICLE_REF_PATTERN.find(&text).map(|found| {
            let capital = found
                .as_str()
                .chars()
                .next_back()
                .map(String::from)
                .unwrap_or_default();
            (found.range(), capital)
        }) else {
            break;
        };
        text.replace_range(range, &capital);
    }

    text.trim().to_string()
}

/// Validity rules for candidate sentences.
///
/// Rejects fragments that cannot be regulatory sentences: strings
/// starting with punctuation or a digit, page headers from the
/// Official Journal layout, strings below the minimum length, and
/// sentences opening with a configured non-regulatory lead-in.
#[must_use]
pub fn is_valid_sentence(sentence: &str, config: &PhraseConfig) -> bool {
    let Some(first) = sentence.chars().next() else {
        return false;
    };
    if first.is_ascii_punctuation() || first.is_ascii_digit() {
        return false;
    }

    let trimmed = sentence.trim();
    if trimmed.to_lowercase().starts_with("en official journal") || trimmed.starts_with("PAGE") {
        return false;
    }

    let non_space = sentence.chars().filter(|c| !c.is_whitespace()).count();
    if non_space < config.min_sentence_chars {
        return false;
    }

    let lowered = sentence.to_lowercase();
    if config
        .excluded_start_phrases
        .iter()
        .any(|phrase| lowered.starts_with(&phrase.to_lowercase()))
    {
        return false;
    }

    true
}

/// Second cleanup pass: drop a structural heading from the start of a
/// sentence, e.g. "Article 4 Reporting The operator shall..." becomes
/// "The operator shall...". Also normalises internal whitespace.
#[must_use]
pub fn clean_sentence_pass2(sentence: &str, heading_tokens: &[String]) -> String {
    let tokens: Vec<&str> = sentence.split_whitespace().collect();
    let Some(first) = tokens.first() else {
        return String::new();
    };

    if !heading_tokens.iter().any(|t| t == first) {
        return tokens.join(" ");
    }

    let numbered = tokens
        .get(1)
        .is_some_and(|t| t.chars().all(|c| c.is_ascii_digit()) && !t.is_empty());
    if !numbered {
        return tokens.join(" ");
    }

    let heading_follows = tokens
        .get(2)
        .is_some_and(|t| t.chars().next().is_some_and(char::is_uppercase));
    if heading_follows {
        // The heading text runs until the next capitalised token,
        // which starts the real sentence
        let next_upper = (3..tokens.len())
            .find(|&i| tokens[i].chars().next().is_some_and(char::is_uppercase));
        let from = next_upper.unwrap_or(3);
        tokens[from..].join(" ")
    } else {
        tokens[2..].join(" ")
    }
}

/// Segment a regulatory span into cleaned, unique, non-empty
/// sentences, preserving first-occurrence order.
#[must_use]
pub fn unique_sentences(
    span_text: &str,
    segmenter: &dyn SentenceSegmenter,
    config: &PhraseConfig,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut sentences = Vec::new();

    for raw in segmenter.segment(span_text) {
        let cleaned = clean_sentence_pass1(&raw);
        if !is_valid_sentence(&cleaned, config) {
            continue;
        }
        let sentence = clean_sentence_pass2(&cleaned, &config.heading_tokens);
        if sentence.is_empty() {
            continue;
        }
        if seen.insert(sentence.clone()) {
            sentences.push(sentence);
        }
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> PhraseConfig {
        PhraseConfig::default()
    }

    #[test]
    fn test_segment_basic() {
        let sentences =
            RuleSegmenter.segment("Member states shall comply. The Commission shall report.");
        assert_eq!(
            sentences,
            vec![
                "Member states shall comply.",
                "The Commission shall report."
            ]
        );
    }

    #[test]
    fn test_segment_keeps_abbreviations_together() {
        let sentences =
            RuleSegmenter.segment("See Regulation No. 45 for details. Operators shall register.");
        assert_eq!(
            sentences,
            vec![
                "See Regulation No. 45 for details.",
                "Operators shall register."
            ]
        );
    }

    #[test]
    fn test_segment_decimal_numbers() {
        let sentences = RuleSegmenter.segment("The threshold is 1.5 tonnes. It shall apply.");
        assert_eq!(
            sentences,
            vec!["The threshold is 1.5 tonnes.", "It shall apply."]
        );
    }

    #[test]
    fn test_segment_initials() {
        let sentences = RuleSegmenter.segment("Signed by J. Borrell. The annex follows.");
        assert_eq!(sentences, vec!["Signed by J. Borrell.", "The annex follows."]);
    }

    #[test]
    fn test_segment_lowercase_continuation() {
        let sentences = RuleSegmenter.segment("The act of 1992. eur-lex numbering applies.");
        assert_eq!(sentences, vec!["The act of 1992. eur-lex numbering applies."]);
    }

    #[test]
    fn test_segment_question_and_exclamation() {
        let sentences = RuleSegmenter.segment("Does it apply? It shall apply!");
        assert_eq!(sentences, vec!["Does it apply?", "It shall apply!"]);
    }

    #[test]
    fn test_clean_pass1_leading_colon() {
        assert_eq!(
            clean_sentence_pass1(": Member states shall comply."),
            "Member states shall comply."
        );
    }

    #[test]
    fn test_clean_pass1_article_reference() {
        assert_eq!(
            clean_sentence_pass1("Article 12 The operator shall notify."),
            "The operator shall notify."
        );
        assert_eq!(
            clean_sentence_pass1("Article 3a Member states shall comply."),
            "Member states shall comply."
        );
    }

    #[test]
    fn test_clean_pass1_multiple_references() {
        assert_eq!(
            clean_sentence_pass1("Article 1 Scope Article 2 Definitions apply."),
            "Scope Definitions apply."
        );
    }

    #[test]
    fn test_is_valid_sentence_rejects_punctuation_and_digit_start() {
        let config = config();
        assert!(!is_valid_sentence("(a) the operator shall notify", &config));
        assert!(!is_valid_sentence("1. The operator shall notify.", &config));
        assert!(is_valid_sentence("The operator shall notify.", &config));
    }

    #[test]
    fn test_is_valid_sentence_rejects_page_furniture() {
        let config = config();
        assert!(!is_valid_sentence(
            "EN Official Journal of the European Union L 135/27",
            &config
        ));
        assert!(!is_valid_sentence("PAGE 27 of the annex text", &config));
    }

    #[test]
    fn test_is_valid_sentence_rejects_short_fragments() {
        let config = config();
        assert!(!is_valid_sentence("Scope and aims", &config));
        assert!(!is_valid_sentence("", &config));
    }

    #[test]
    fn test_is_valid_sentence_rejects_excluded_start_phrases() {
        let config = config();
        assert!(!is_valid_sentence(
            "In this case, the operator shall notify the authority.",
            &config
        ));
        assert!(!is_valid_sentence(
            "Amendments to Decision 2011/292/EU shall be adopted.",
            &config
        ));
    }

    #[test]
    fn test_clean_pass2_strips_heading() {
        let config = config();
        assert_eq!(
            clean_sentence_pass2(
                "Article 4 Reporting The operator shall report annually.",
                &config.heading_tokens
            ),
            "The operator shall report annually."
        );
    }

    #[test]
    fn test_clean_pass2_heading_without_title() {
        let config = config();
        assert_eq!(
            clean_sentence_pass2(
                "Article 4 the operator shall report annually.",
                &config.heading_tokens
            ),
            "the operator shall report annually."
        );
    }

    #[test]
    fn test_clean_pass2_no_heading() {
        let config = config();
        assert_eq!(
            clean_sentence_pass2("The  operator shall   report.", &config.heading_tokens),
            "The operator shall report."
        );
    }

    #[test]
    fn test_clean_pass2_unnumbered_heading_token() {
        let config = config();
        assert_eq!(
            clean_sentence_pass2(
                "Article thresholds shall be reviewed.",
                &config.heading_tokens
            ),
            "Article thresholds shall be reviewed."
        );
    }

    #[test]
    fn test_unique_sentences_dedupes_preserving_order() {
        let config = config();
        let span = "Member states shall comply fully. The Commission shall report annually. \
                    Member states shall comply fully.";
        let sentences = unique_sentences(span, &RuleSegmenter, &config);
        assert_eq!(
            sentences,
            vec![
                "Member states shall comply fully.",
                "The Commission shall report annually."
            ]
        );
    }

    #[test]
    fn test_unique_sentences_scenario() {
        let config = config();
        let span = ": Member states shall comply fully. This Regulation shall enter into force. ";
        let sentences = unique_sentences(span, &RuleSegmenter, &config);
        assert_eq!(
            sentences,
            vec![
                "Member states shall comply fully.",
                "This Regulation shall enter into force."
            ]
        );
    }

    #[test]
    fn test_unique_sentences_empty_span() {
        let config = config();
        assert!(unique_sentences("", &RuleSegmenter, &config).is_empty());
        assert!(unique_sentences("   ", &RuleSegmenter, &config).is_empty());
    }
}
