//! Store-specific error and configuration types.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store cannot be reached.
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// A query ran past the configured timeout.
    #[error("Store query timed out after {elapsed_ms} ms (limit {limit_ms} ms)")]
    Timeout {
        /// Time spent before the query was abandoned.
        elapsed_ms: u64,
        /// Configured limit.
        limit_ms: u64,
    },

    /// A stored record could not be interpreted.
    #[error("Malformed record {id}: {reason}")]
    Malformed {
        /// Identifier of the offending record.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A search term could not be compiled into a pattern.
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Configuration for the in-memory store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on a single scan query (`None` = unbounded).
    pub query_timeout: Option<Duration>,
    /// Records scanned between timeout checks.
    pub batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            query_timeout: None,
            batch_size: 10_000,
        }
    }
}

impl StoreConfig {
    /// Creates a config with the given query timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            query_timeout: Some(timeout),
            ..Self::default()
        }
    }
}
