//! Symptom search: free-text terms to disease groups.

use std::collections::HashSet;

use namaste_store::RecordStore;
use namaste_types::{DiseaseGroup, TerminologyRecord, TextField};

use crate::config::EngineConfig;
use crate::context::SearchContext;
use crate::error::{EngineError, EngineResult};
use crate::resolver::CodeResolver;

/// Finds records matching every search term and clusters them by target code.
///
/// Each distinct target code among the confident matches becomes one
/// [`DiseaseGroup`]: the first matching record for that code triggers an
/// [`Any`](crate::ResolveMode::Any) resolve of its traditional code, and the
/// resulting cross-category mappings form the group. Every mapping in a group
/// shares the group's target code.
pub struct SymptomSearch<'a, S: ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: RecordStore + ?Sized> SymptomSearch<'a, S> {
    /// Creates a search over `store`.
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Trims terms and drops those shorter than the configured minimum.
    pub fn normalize_terms<T: AsRef<str>>(&self, terms: &[T]) -> Vec<String> {
        terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| t.chars().count() >= self.config.min_term_len)
            .map(str::to_string)
            .collect()
    }

    /// Runs a symptom search without a deadline.
    pub fn search_grouped<T: AsRef<str>>(&self, terms: &[T]) -> EngineResult<Vec<DiseaseGroup>> {
        self.search_grouped_with(&SearchContext::new(), terms)
    }

    /// Runs a symptom search, honouring `ctx` before each store call.
    ///
    /// # Errors
    /// - [`EngineError::TooManyResults`] if the matches span more than
    ///   `max_groups` target codes. No partial list is returned.
    /// - [`EngineError::Cancelled`] / [`EngineError::DeadlineExceeded`] from `ctx`.
    /// - [`EngineError::Store`] on store failure.
    pub fn search_grouped_with<T: AsRef<str>>(
        &self,
        ctx: &SearchContext,
        terms: &[T],
    ) -> EngineResult<Vec<DiseaseGroup>> {
        let terms = self.normalize_terms(terms);
        if terms.is_empty() {
            tracing::debug!("No usable search terms");
            return Ok(Vec::new());
        }

        ctx.check()?;
        let matches = self
            .store
            .find_all_matching_all_terms(&terms, &TextField::SYMPTOM_FIELDS)?;
        let match_count = matches.len();
        let triggers: Vec<TerminologyRecord> = matches
            .into_iter()
            .filter(|r| r.passes_confidence(self.config.min_confidence))
            .collect();

        let group_count = triggers
            .iter()
            .filter_map(group_key)
            .collect::<HashSet<_>>()
            .len();
        tracing::debug!(
            "Terms {:?}: {} matches, {} confident, {} target codes",
            terms,
            match_count,
            triggers.len(),
            group_count
        );
        if group_count > self.config.max_groups {
            tracing::warn!(
                "Rejected search {:?}: {} disease groups exceed the limit of {}",
                terms,
                group_count,
                self.config.max_groups
            );
            return Err(EngineError::TooManyResults {
                group_count,
                limit: self.config.max_groups,
            });
        }

        let resolver = CodeResolver::new(self.store, self.config);
        let mut processed: HashSet<&str> = HashSet::new();
        let mut groups = Vec::with_capacity(group_count);

        for trigger in &triggers {
            let Some(target_code) = group_key(trigger) else {
                continue;
            };
            if !processed.insert(target_code) {
                continue;
            }

            ctx.check()?;
            let mappings = resolver.resolve_group(trigger, target_code)?;
            if mappings.is_empty() {
                continue;
            }

            groups.push(DiseaseGroup {
                target_code: target_code.to_string(),
                target_title: trigger.target_title.clone(),
                target_definition: trigger.target_definition.clone(),
                similarity_score: trigger.confidence_score.unwrap_or_default(),
                mappings,
            });
        }

        tracing::info!("Symptom search {:?} produced {} disease groups", terms, groups.len());
        Ok(groups)
    }

    /// Runs a symptom search and flattens the groups into one record list.
    pub fn search_flat<T: AsRef<str>>(&self, terms: &[T]) -> EngineResult<Vec<TerminologyRecord>> {
        Ok(self
            .search_grouped(terms)?
            .into_iter()
            .flat_map(|group| group.mappings)
            .collect())
    }
}

fn group_key(record: &TerminologyRecord) -> Option<&str> {
    record
        .target_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use namaste_store::{StoreResult, TerminologyStore};
    use namaste_types::ExactField;

    use super::*;
    use crate::testing::{init_tracing, make_record, with_text, UnavailableStore};

    /// Runs a hook on every anchor lookup and counts them.
    struct HookedStore<F> {
        inner: TerminologyStore,
        on_anchor: F,
        anchor_calls: AtomicUsize,
    }

    impl<F: Fn() + Send + Sync> HookedStore<F> {
        fn new(inner: TerminologyStore, on_anchor: F) -> Self {
            Self {
                inner,
                on_anchor,
                anchor_calls: AtomicUsize::new(0),
            }
        }

        fn anchor_calls(&self) -> usize {
            self.anchor_calls.load(Ordering::SeqCst)
        }
    }

    impl<F: Fn() + Send + Sync> RecordStore for HookedStore<F> {
        fn find_exact(&self, fields: &[ExactField], value: &str) -> StoreResult<Vec<TerminologyRecord>> {
            self.inner.find_exact(fields, value)
        }

        fn find_top_by_traditional_code(&self, value: &str) -> StoreResult<Option<TerminologyRecord>> {
            self.anchor_calls.fetch_add(1, Ordering::SeqCst);
            (self.on_anchor)();
            self.inner.find_top_by_traditional_code(value)
        }

        fn find_all_matching_all_terms(
            &self,
            terms: &[String],
            fields: &[TextField],
        ) -> StoreResult<Vec<TerminologyRecord>> {
            self.inner.find_all_matching_all_terms(terms, fields)
        }

        fn find_all(&self) -> StoreResult<Vec<TerminologyRecord>> {
            self.inner.find_all()
        }
    }

    fn symptom_store() -> TerminologyStore {
        TerminologyStore::from_records([
            with_text(
                make_record("ayurveda", "NAM001", "XM4KH5", 0.9),
                "Fever with headache and body ache",
                "Fever disorder",
            ),
            make_record("siddha", "SID014", "XM4KH5", 0.7),
            make_record("unani", "UNA007", "XM4KH5", 0.8),
            with_text(
                make_record("ayurveda", "NAM002", "XM1AB2", 0.65),
                "Persistent fever at night",
                "Night fever",
            ),
            with_text(
                make_record("siddha", "SID020", "XM9ZZ9", 0.55),
                "Fever with headache",
                "Low-confidence fever",
            ),
            with_text(
                make_record("unani", "UNA030", "XM7CC1", 0.85),
                "Headache after meals",
                "Digestive headache",
            ),
        ])
    }

    fn group_codes(groups: &[DiseaseGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.target_code.as_str()).collect()
    }

    #[test]
    fn test_all_terms_must_match() {
        init_tracing();
        let store = symptom_store();
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let groups = search.search_grouped(&["fever", "headache"]).unwrap();
        assert_eq!(group_codes(&groups), vec!["XM4KH5"]);

        let group = &groups[0];
        assert_eq!(group.similarity_score, 0.9);
        assert_eq!(group.target_title.as_deref(), Some("Fever disorder"));
        assert_eq!(
            group.categories().collect::<Vec<_>>(),
            vec!["ayurveda", "siddha", "unani"]
        );
    }

    #[test]
    fn test_single_term_groups_in_store_order() {
        let store = symptom_store();
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let groups = search.search_grouped(&["FEVER"]).unwrap();
        assert_eq!(group_codes(&groups), vec!["XM4KH5", "XM1AB2"]);
        assert_eq!(groups[1].mappings.len(), 1);
    }

    #[test]
    fn test_short_terms_are_dropped() {
        let store = UnavailableStore::default();
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        assert_eq!(search.normalize_terms(&[" a ", "", "ache "]), vec!["ache"]);
        assert!(search.search_grouped(&["a", "  "]).unwrap().is_empty());
        assert_eq!(store.call_count(), 0);
    }

    #[test]
    fn test_group_limit_reports_true_count() {
        let records: Vec<_> = (0..21)
            .map(|i| {
                with_text(
                    make_record("ayurveda", &format!("NAM{:03}", i), &format!("XT{:04}", i), 0.9),
                    "recurring fever",
                    "Fever",
                )
            })
            .collect();
        let config = EngineConfig::default();

        let over = TerminologyStore::from_records(records.clone());
        let err = SymptomSearch::new(&over, &config)
            .search_grouped(&["fever"])
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::TooManyResults {
                group_count: 21,
                limit: 20
            }
        ));

        let at_limit = TerminologyStore::from_records(records.into_iter().take(20));
        let groups = SymptomSearch::new(&at_limit, &config)
            .search_grouped(&["fever"])
            .unwrap();
        assert_eq!(groups.len(), 20);
    }

    #[test]
    fn test_cancelled_before_store_call() {
        let store = UnavailableStore::default();
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let ctx = SearchContext::new();
        ctx.cancel_handle().cancel();
        let err = search.search_grouped_with(&ctx, &["fever"]).unwrap_err();
        assert!(matches!(err, EngineError::Cancelled));
        assert_eq!(store.call_count(), 0);
    }

    #[test]
    fn test_shared_traditional_code_keeps_groups_apart() {
        let store = TerminologyStore::from_records([
            with_text(make_record("ayurveda", "NAM001", "XA0001", 0.9), "fever", "Fever A"),
            with_text(make_record("siddha", "NAM001", "XB0002", 0.7), "fever", "Fever B"),
            make_record("unani", "UNA002", "XB0002", 0.8),
        ]);
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let groups = search.search_grouped(&["fever"]).unwrap();
        assert_eq!(group_codes(&groups), vec!["XA0001", "XB0002"]);
        for group in &groups {
            assert!(group
                .mappings
                .iter()
                .all(|m| m.target_code.as_deref() == Some(group.target_code.as_str())));
        }
        assert_eq!(
            groups[1].categories().collect::<Vec<_>>(),
            vec!["siddha", "unani"]
        );
        assert_eq!(groups[1].similarity_score, 0.7);
    }

    #[test]
    fn test_cancelled_between_groups() {
        let ctx = SearchContext::new();
        let handle = ctx.cancel_handle();
        let store = HookedStore::new(symptom_store(), move || handle.cancel());
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let err = search.search_grouped_with(&ctx, &["fever"]).unwrap_err();
        assert!(matches!(err, EngineError::Cancelled));
        assert_eq!(store.anchor_calls(), 1);
    }

    #[test]
    fn test_deadline_passes_between_groups() {
        let store = HookedStore::new(symptom_store(), || thread::sleep(Duration::from_millis(60)));
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let ctx = SearchContext::with_timeout(Duration::from_millis(30));
        let err = search.search_grouped_with(&ctx, &["fever"]).unwrap_err();
        assert!(matches!(err, EngineError::DeadlineExceeded));
        assert_eq!(store.anchor_calls(), 1);
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = UnavailableStore::default();
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let err = search.search_grouped(&["fever"]).unwrap_err();
        assert!(matches!(err, EngineError::Store(_)));
        assert_eq!(store.call_count(), 1);
    }

    #[test]
    fn test_flat_concatenates_groups() {
        let store = symptom_store();
        let config = EngineConfig::default();
        let search = SymptomSearch::new(&store, &config);

        let flat = search.search_flat(&["fever"]).unwrap();
        let codes: Vec<_> = flat.iter().map(|r| r.traditional_code.as_str()).collect();
        assert_eq!(codes, vec!["NAM001", "SID014", "UNA007", "NAM002"]);
    }
}
