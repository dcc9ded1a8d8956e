//! Engine error type.
//!
//! Blank queries and lookups without a match are not errors: they come back
//! as empty results or `None`.

use namaste_store::StoreError;
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The record store failed; propagated unchanged.
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// A symptom search produced more disease groups than allowed.
    #[error("Too many results: {group_count} disease groups exceed the limit of {limit}, refine the query")]
    TooManyResults {
        /// Number of disease groups the search would have produced.
        group_count: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation finished.
    #[error("Operation deadline exceeded")]
    DeadlineExceeded,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_results_message() {
        let err = EngineError::TooManyResults {
            group_count: 27,
            limit: 20,
        };
        assert_eq!(
            err.to_string(),
            "Too many results: 27 disease groups exceed the limit of 20, refine the query"
        );
    }

    #[test]
    fn test_store_error_converts() {
        let err: EngineError = StoreError::Unavailable("connection refused".to_string()).into();
        assert!(matches!(err, EngineError::Store(StoreError::Unavailable(_))));
        assert_eq!(
            err.to_string(),
            "Record store error: Record store unavailable: connection refused"
        );
    }
}
