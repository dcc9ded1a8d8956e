//! Compiled AND-of-ORs predicate for multi-term text search.

use namaste_types::{TerminologyRecord, TextField};
use regex::{Regex, RegexBuilder};

use crate::types::StoreResult;

/// A set of search terms compiled into case-insensitive literal patterns.
///
/// A record matches when, for every term, at least one of the configured
/// fields contains the term. Regex metacharacters in terms are escaped, so
/// `"fever (acute)"` matches the literal text.
#[derive(Debug, Clone)]
pub struct TermPredicate {
    patterns: Vec<Regex>,
    fields: Vec<TextField>,
}

impl TermPredicate {
    /// Compiles `terms` against `fields`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidPattern`](crate::StoreError::InvalidPattern)
    /// if a term exceeds the regex size limits.
    pub fn compile(terms: &[String], fields: &[TextField]) -> StoreResult<Self> {
        let patterns = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            fields: fields.to_vec(),
        })
    }

    /// Returns true if the predicate has no terms.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if every term matches at least one field of `record`.
    pub fn matches(&self, record: &TerminologyRecord) -> bool {
        self.patterns.iter().all(|pattern| {
            self.fields
                .iter()
                .filter_map(|&field| record.text_field(field))
                .any(|text| pattern.is_match(text))
        })
    }
}
