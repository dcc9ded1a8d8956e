//! The query interface the engine consumes.
//!
//! Any backing store (a document database, a relational table, the in-memory
//! [`TerminologyStore`](crate::TerminologyStore)) is plugged into the engine by
//! implementing [`RecordStore`]. Legacy field translation belongs in the
//! implementation, never in the engine.

use namaste_types::{ExactField, TerminologyRecord, TextField};

use crate::types::StoreResult;

/// Read-only query interface over terminology records.
///
/// Implementations must be safe for concurrent reads. Result order is the
/// store's natural order and must be stable across calls without mutation.
pub trait RecordStore: Send + Sync {
    /// Returns records where any of `fields` equals `value` exactly.
    fn find_exact(&self, fields: &[ExactField], value: &str) -> StoreResult<Vec<TerminologyRecord>>;

    /// Returns the highest-confidence record whose traditional code equals `value`.
    ///
    /// Records without a confidence score rank below every scored record.
    fn find_top_by_traditional_code(&self, value: &str) -> StoreResult<Option<TerminologyRecord>>;

    /// Returns records where every term matches at least one of `fields`.
    ///
    /// Matching is a case-insensitive substring test; terms are literal text,
    /// never patterns.
    fn find_all_matching_all_terms(
        &self,
        terms: &[String],
        fields: &[TextField],
    ) -> StoreResult<Vec<TerminologyRecord>>;

    /// Returns every record in store order.
    fn find_all(&self) -> StoreResult<Vec<TerminologyRecord>>;
}
