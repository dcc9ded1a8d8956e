//! In-memory NAMASTE terminology store.
//!
//! Holds records in insertion order (the store order every query preserves)
//! with hash indexes on the exact-match fields. Multi-term text scans run in
//! batches and use rayon when the `parallel` feature is enabled.
//!
//! ```ignore
//! let store = TerminologyStore::from_records(records);
//!
//! let siblings = store.find_exact(&[ExactField::TargetCode], "XM4KH5")?;
//! let hits = store.find_all_matching_all_terms(&terms, &TextField::SYMPTOM_FIELDS)?;
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use namaste_types::{ExactField, TerminologyRecord, TextField};

use crate::pattern::TermPredicate;
use crate::query::RecordStore;
use crate::types::{StoreConfig, StoreError, StoreResult};

/// In-memory store for terminology records.
///
/// Immutable once shared, so concurrent reads need no locking.
///
/// # Example
///
/// ```
/// use namaste_store::{RecordStore, TerminologyStore};
/// use namaste_types::{ExactField, TerminologyRecord};
///
/// let store = TerminologyStore::from_records([TerminologyRecord {
///     category: "ayurveda".to_string(),
///     traditional_code: "NAM001".to_string(),
///     target_code: Some("XM4KH5".to_string()),
///     confidence_score: Some(0.9),
///     ..Default::default()
/// }]);
///
/// let found = store.find_exact(&[ExactField::TargetCode], "XM4KH5").unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, "rec-1");
/// ```
pub struct TerminologyStore {
    /// Records in store order.
    records: Vec<TerminologyRecord>,
    /// Record positions indexed by traditional code.
    by_traditional_code: HashMap<String, Vec<usize>>,
    /// Record positions indexed by ICD-11 TM2 code.
    by_target_code: HashMap<String, Vec<usize>>,
    /// Record positions indexed by ICD-11 biomedicine code.
    by_biomedicine_code: HashMap<String, Vec<usize>>,
    /// Record positions indexed by category.
    by_category: HashMap<String, Vec<usize>>,
    /// Record positions indexed by traditional title.
    by_traditional_title: HashMap<String, Vec<usize>>,
    config: StoreConfig,
}

impl Default for TerminologyStore {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl std::fmt::Debug for TerminologyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminologyStore")
            .field("records", &self.records.len())
            .field("by_traditional_code", &self.by_traditional_code.len())
            .field("by_target_code", &self.by_target_code.len())
            .field("by_biomedicine_code", &self.by_biomedicine_code.len())
            .field("by_category", &self.by_category.len())
            .field("by_traditional_title", &self.by_traditional_title.len())
            .field("config", &self.config)
            .finish()
    }
}

impl TerminologyStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            records: Vec::new(),
            by_traditional_code: HashMap::new(),
            by_target_code: HashMap::new(),
            by_biomedicine_code: HashMap::new(),
            by_category: HashMap::new(),
            by_traditional_title: HashMap::new(),
            config,
        }
    }

    /// Creates a store holding `records`, in iteration order.
    pub fn from_records(records: impl IntoIterator<Item = TerminologyRecord>) -> Self {
        let mut store = Self::new();
        store.insert_records(records);
        store
    }

    /// Appends records, assigning `rec-<n>` ids to records without one.
    pub fn insert_records(&mut self, records: impl IntoIterator<Item = TerminologyRecord>) {
        for mut record in records {
            let position = self.records.len();
            if record.id.is_empty() {
                record.id = format!("rec-{}", position + 1);
            }

            index_value(&mut self.by_traditional_code, Some(&record.traditional_code), position);
            index_value(&mut self.by_target_code, record.target_code.as_deref(), position);
            index_value(&mut self.by_biomedicine_code, record.biomedicine_code.as_deref(), position);
            index_value(&mut self.by_category, Some(&record.category), position);
            index_value(&mut self.by_traditional_title, record.traditional_title.as_deref(), position);

            self.records.push(record);
        }
    }

    /// Returns the record with the given id.
    pub fn get(&self, id: &str) -> Option<&TerminologyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns all records in store order.
    pub fn records(&self) -> impl Iterator<Item = &TerminologyRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn index(&self, field: ExactField) -> &HashMap<String, Vec<usize>> {
        match field {
            ExactField::TraditionalCode => &self.by_traditional_code,
            ExactField::TargetCode => &self.by_target_code,
            ExactField::BiomedicineCode => &self.by_biomedicine_code,
            ExactField::Category => &self.by_category,
            ExactField::TraditionalTitle => &self.by_traditional_title,
        }
    }

    /// Returns positions of records matching any field, in store order.
    fn exact_positions(&self, fields: &[ExactField], value: &str) -> Vec<usize> {
        let mut positions: Vec<usize> = fields
            .iter()
            .filter_map(|&field| self.index(field).get(value))
            .flatten()
            .copied()
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }

    fn check_timeout(&self, started: Instant) -> StoreResult<()> {
        if let Some(limit) = self.config.query_timeout {
            let elapsed = started.elapsed();
            if elapsed >= limit {
                return Err(StoreError::Timeout {
                    elapsed_ms: millis(elapsed),
                    limit_ms: millis(limit),
                });
            }
        }
        Ok(())
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl RecordStore for TerminologyStore {
    fn find_exact(&self, fields: &[ExactField], value: &str) -> StoreResult<Vec<TerminologyRecord>> {
        Ok(self
            .exact_positions(fields, value)
            .into_iter()
            .filter_map(|position| self.records.get(position))
            .cloned()
            .collect())
    }

    fn find_top_by_traditional_code(&self, value: &str) -> StoreResult<Option<TerminologyRecord>> {
        let mut best: Option<&TerminologyRecord> = None;
        for record in self
            .exact_positions(&[ExactField::TraditionalCode], value)
            .into_iter()
            .filter_map(|position| self.records.get(position))
        {
            // Ties keep the earlier record.
            let better = best.map_or(true, |current| {
                confidence_rank(record.confidence_score) > confidence_rank(current.confidence_score)
            });
            if better {
                best = Some(record);
            }
        }
        Ok(best.cloned())
    }

    /// An empty term list matches nothing.
    fn find_all_matching_all_terms(
        &self,
        terms: &[String],
        fields: &[TextField],
    ) -> StoreResult<Vec<TerminologyRecord>> {
        let predicate = TermPredicate::compile(terms, fields)?;
        if predicate.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let mut results = Vec::new();

        for batch in self.records.chunks(self.config.batch_size.max(1)) {
            #[cfg(feature = "parallel")]
            let hits: Vec<&TerminologyRecord> =
                batch.par_iter().filter(|r| predicate.matches(r)).collect();
            #[cfg(not(feature = "parallel"))]
            let hits: Vec<&TerminologyRecord> =
                batch.iter().filter(|r| predicate.matches(r)).collect();

            results.extend(hits.into_iter().cloned());
            self.check_timeout(started)?;
        }

        tracing::debug!(
            "Term scan matched {} of {} records for {} term(s)",
            results.len(),
            self.records.len(),
            terms.len()
        );

        Ok(results)
    }

    fn find_all(&self) -> StoreResult<Vec<TerminologyRecord>> {
        Ok(self.records.clone())
    }
}

fn index_value(index: &mut HashMap<String, Vec<usize>>, value: Option<&str>, position: usize) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        index.entry(value.to_string()).or_default().push(position);
    }
}

/// Absent scores rank below every present score.
fn confidence_rank(score: Option<f64>) -> f64 {
    score.unwrap_or(f64::NEG_INFINITY)
}
