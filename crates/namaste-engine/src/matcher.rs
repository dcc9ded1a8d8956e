//! Field-level text similarity between a query term and record text.
//!
//! Scores are in `[0, 1]`. A case-insensitive substring hit scores 1.0;
//! otherwise the score is the fraction of term words found in the text.

use namaste_types::{TerminologyRecord, TextField};

/// Minimum length (in chars) of a term word that can count as matched.
const MIN_WORD_LEN: usize = 3;

/// Weight applied to title fields relative to description/definition fields.
pub const TITLE_WEIGHT: f64 = 0.8;

/// Scores how well `term` matches `text`.
///
/// # Examples
///
/// ```
/// use namaste_engine::matcher::score;
///
/// assert_eq!(score("fever", "Intermittent FEVER with chills"), 1.0);
/// assert_eq!(score("high fever", "fever at night"), 0.5);
/// assert_eq!(score("fever", ""), 0.0);
/// ```
pub fn score(term: &str, text: &str) -> f64 {
    if term.trim().is_empty() || text.trim().is_empty() {
        return 0.0;
    }

    let term = term.to_lowercase();
    let text = text.to_lowercase();
    if text.contains(&term) {
        return 1.0;
    }

    let text_words: Vec<&str> = text.split_whitespace().collect();
    let term_words: Vec<&str> = term.split_whitespace().collect();

    let matched = term_words
        .iter()
        .filter(|word| word.chars().count() >= MIN_WORD_LEN)
        .filter(|word| {
            text_words
                .iter()
                .any(|candidate| candidate.contains(**word) || word.contains(*candidate))
        })
        .count();

    (matched as f64 / term_words.len() as f64).min(1.0)
}

/// Like [`score`], treating an absent value as a zero score.
pub fn score_opt(term: Option<&str>, text: Option<&str>) -> f64 {
    match (term, text) {
        (Some(term), Some(text)) => score(term, text),
        _ => 0.0,
    }
}

/// Best weighted score of `term` over the symptom fields of `record`.
pub fn best_field_score(term: &str, record: &TerminologyRecord) -> f64 {
    field_score(term, record, &TextField::SYMPTOM_FIELDS)
}

/// Best weighted score of `term` over `fields` of `record`.
///
/// Title fields are discounted by [`TITLE_WEIGHT`].
pub fn field_score(term: &str, record: &TerminologyRecord, fields: &[TextField]) -> f64 {
    fields
        .iter()
        .map(|&field| {
            let weight = if field.is_title() { TITLE_WEIGHT } else { 1.0 };
            score_opt(Some(term), record.text_field(field)) * weight
        })
        .fold(0.0, f64::max)
}
