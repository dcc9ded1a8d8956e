//! Engine configuration.

use std::fmt::Display;
use std::str::FromStr;

/// Environment variable overriding [`EngineConfig::min_confidence`].
pub const MIN_CONFIDENCE_VAR: &str = "NAMASTE_MIN_CONFIDENCE";
/// Environment variable overriding [`EngineConfig::max_groups`].
pub const MAX_GROUPS_VAR: &str = "NAMASTE_MAX_GROUPS";
/// Environment variable overriding [`EngineConfig::max_code_results`].
pub const MAX_CODE_RESULTS_VAR: &str = "NAMASTE_MAX_CODE_RESULTS";
/// Environment variable overriding [`EngineConfig::min_term_len`].
pub const MIN_TERM_LEN_VAR: &str = "NAMASTE_MIN_TERM_LEN";

/// Tunables for the matching engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Records must score strictly above this to be returned.
    pub min_confidence: f64,
    /// Maximum disease groups a symptom search may produce.
    pub max_groups: usize,
    /// Cap on single-field code lookups (target-only, traditional-only).
    pub max_code_results: usize,
    /// Search terms shorter than this (after trimming) are dropped.
    pub min_term_len: usize,
    /// Number of suggestions offered when a disease name is not found.
    pub suggestion_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            max_groups: 20,
            max_code_results: 6,
            min_term_len: 2,
            suggestion_limit: 3,
        }
    }
}

impl EngineConfig {
    /// Builds a config from `NAMASTE_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparsable values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            min_confidence: parse_var(&lookup, MIN_CONFIDENCE_VAR, defaults.min_confidence),
            max_groups: parse_var(&lookup, MAX_GROUPS_VAR, defaults.max_groups),
            max_code_results: parse_var(&lookup, MAX_CODE_RESULTS_VAR, defaults.max_code_results),
            min_term_len: parse_var(&lookup, MIN_TERM_LEN_VAR, defaults.min_term_len),
            suggestion_limit: defaults.suggestion_limit,
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}
