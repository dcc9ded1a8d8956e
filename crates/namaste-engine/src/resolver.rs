//! Exact code lookup with confidence filtering and per-category dedup.
//!
//! In [`ResolveMode::Any`] a traditional code first resolves to its anchor
//! record, the highest-confidence record carrying that code. The lookup then
//! pivots to the anchor's target code and fans out to every sibling record
//! sharing it. The anchor always keeps its own category slot.

use std::collections::HashMap;

use namaste_store::RecordStore;
use namaste_types::{ExactField, TerminologyRecord};

use crate::config::EngineConfig;
use crate::error::EngineResult;

/// Which code fields a lookup matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveMode {
    /// Traditional or target code, pivoting through the anchor record.
    Any,
    /// ICD-11 TM2 code only.
    TargetOnly,
    /// NAMASTE code only.
    TraditionalOnly,
}

impl ResolveMode {
    fn fields(self) -> &'static [ExactField] {
        match self {
            Self::Any => &[ExactField::TargetCode, ExactField::TraditionalCode],
            Self::TargetOnly => &[ExactField::TargetCode],
            Self::TraditionalOnly => &[ExactField::TraditionalCode],
        }
    }

    fn cap(self, config: &EngineConfig) -> Option<usize> {
        match self {
            Self::Any => None,
            Self::TargetOnly | Self::TraditionalOnly => Some(config.max_code_results),
        }
    }
}

/// Resolves a code to at most one confident record per category.
///
/// # Example
///
/// ```
/// use namaste_engine::{CodeResolver, EngineConfig, ResolveMode};
/// use namaste_store::TerminologyStore;
/// use namaste_types::TerminologyRecord;
///
/// let record = |category: &str, code: &str, score: f64| TerminologyRecord {
///     category: category.to_string(),
///     traditional_code: code.to_string(),
///     target_code: Some("XM4KH5".to_string()),
///     confidence_score: Some(score),
///     ..Default::default()
/// };
/// let store = TerminologyStore::from_records([
///     record("ayurveda", "NAM001", 0.9),
///     record("siddha", "SID014", 0.7),
///     record("unani", "UNA007", 0.8),
/// ]);
/// let config = EngineConfig::default();
///
/// let resolver = CodeResolver::new(&store, &config);
/// let siblings = resolver.resolve("NAM001", ResolveMode::Any).unwrap();
/// assert_eq!(siblings.len(), 3);
/// assert_eq!(siblings[0].traditional_code, "NAM001");
/// ```
pub struct CodeResolver<'a, S: ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: RecordStore + ?Sized> CodeResolver<'a, S> {
    /// Creates a resolver over `store`.
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Looks up `query` in the given mode.
    ///
    /// A blank query yields an empty result without touching the store.
    ///
    /// # Errors
    /// Store failures are returned as [`EngineError::Store`](crate::EngineError::Store).
    pub fn resolve(&self, query: &str, mode: ResolveMode) -> EngineResult<Vec<TerminologyRecord>> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Ignoring blank {:?} lookup", mode);
            return Ok(Vec::new());
        }

        let anchor = match mode {
            ResolveMode::Any => self.store.find_top_by_traditional_code(query)?,
            ResolveMode::TargetOnly | ResolveMode::TraditionalOnly => None,
        };

        let key = pivot(anchor.as_ref()).unwrap_or(query).to_string();
        if key != query {
            tracing::debug!("Pivoted {} to target code {}", query, key);
        }

        self.collect(&key, mode, mode.fields(), anchor)
    }

    /// Builds the disease group for `target_code` from a record that matched
    /// a symptom search.
    ///
    /// This is an [`Any`](ResolveMode::Any) resolve of the trigger's
    /// traditional code, unless that code's anchor maps elsewhere. The group
    /// is then rebuilt from the records sharing `target_code`, with the
    /// trigger as anchor.
    pub(crate) fn resolve_group(
        &self,
        trigger: &TerminologyRecord,
        target_code: &str,
    ) -> EngineResult<Vec<TerminologyRecord>> {
        let code = trigger.traditional_code.trim();
        let anchor = if code.is_empty() {
            None
        } else {
            self.store.find_top_by_traditional_code(code)?
        };

        if pivot(anchor.as_ref()) == Some(target_code) {
            return self.collect(target_code, ResolveMode::Any, ResolveMode::Any.fields(), anchor);
        }

        tracing::debug!(
            "Anchor of {} maps away from {}, grouping by target code",
            code,
            target_code
        );
        self.collect(
            target_code,
            ResolveMode::Any,
            &[ExactField::TargetCode],
            Some(trigger.clone()),
        )
    }

    fn collect(
        &self,
        key: &str,
        mode: ResolveMode,
        fields: &[ExactField],
        anchor: Option<TerminologyRecord>,
    ) -> EngineResult<Vec<TerminologyRecord>> {
        let candidates = self.store.find_exact(fields, key)?;
        let candidate_count = candidates.len();
        let confident: Vec<TerminologyRecord> = candidates
            .into_iter()
            .filter(|r| r.passes_confidence(self.config.min_confidence))
            .collect();

        let anchor = anchor.filter(|a| a.passes_confidence(self.config.min_confidence));
        let mut mappings = dedup_by_category(confident, anchor);
        if let Some(cap) = mode.cap(self.config) {
            mappings.truncate(cap);
        }

        tracing::debug!(
            "Resolved {} ({:?}): {} candidates, {} mappings",
            key,
            mode,
            candidate_count,
            mappings.len()
        );

        Ok(mappings)
    }
}

/// Trimmed, non-empty target code of the anchor.
fn pivot(anchor: Option<&TerminologyRecord>) -> Option<&str> {
    anchor
        .and_then(|a| a.target_code.as_deref())
        .map(str::trim)
        .filter(|code| !code.is_empty())
}

/// Keeps the highest-confidence record per category, in first-seen order.
///
/// The anchor, when given, takes the first slot and is never displaced from
/// its category. Other ties keep the earlier record.
fn dedup_by_category(
    records: Vec<TerminologyRecord>,
    anchor: Option<TerminologyRecord>,
) -> Vec<TerminologyRecord> {
    let mut slots: Vec<TerminologyRecord> = Vec::new();
    let mut slot_by_category: HashMap<String, usize> = HashMap::new();

    let anchored_category = anchor.as_ref().map(|a| a.category.clone());
    if let Some(anchor) = anchor {
        slot_by_category.insert(anchor.category.clone(), 0);
        slots.push(anchor);
    }

    for record in records {
        match slot_by_category.get(&record.category) {
            Some(_) if anchored_category.as_ref() == Some(&record.category) => {}
            Some(&index) => {
                if let Some(slot) = slots.get_mut(index) {
                    if rank(&record) > rank(slot) {
                        *slot = record;
                    }
                }
            }
            None => {
                slot_by_category.insert(record.category.clone(), slots.len());
                slots.push(record);
            }
        }
    }

    slots
}

fn rank(record: &TerminologyRecord) -> f64 {
    record.confidence_score.unwrap_or(f64::NEG_INFINITY)
}
