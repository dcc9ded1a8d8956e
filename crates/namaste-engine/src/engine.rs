//! Shared engine handle tying the store, config and components together.

use std::sync::Arc;

use namaste_store::RecordStore;
use namaste_types::{DiseaseGroup, TerminologyRecord, TerminologyStats};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::context::SearchContext;
use crate::error::EngineResult;
use crate::lookup::{DiseaseLookup, DiseaseResolver};
use crate::resolver::{CodeResolver, ResolveMode};
use crate::search::SymptomSearch;
use crate::translate::TranslationGateway;

/// Terminology engine over a shared record store.
///
/// Cloning is cheap; clones share the store and config.
pub struct TerminologyEngine<S: ?Sized> {
    store: Arc<S>,
    config: Arc<EngineConfig>,
}

impl<S: ?Sized> Clone for TerminologyEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RecordStore> TerminologyEngine<S> {
    /// Creates an engine with the default config.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Creates an engine with an explicit config.
    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(store), config)
    }
}

impl<S: RecordStore + ?Sized> TerminologyEngine<S> {
    /// Creates an engine over an already shared store.
    pub fn from_shared(store: Arc<S>, config: EngineConfig) -> Self {
        tracing::info!(
            "Terminology engine ready (min confidence {}, max {} groups)",
            config.min_confidence,
            config.max_groups
        );
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the engine config.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Code resolver over this engine's store.
    pub fn resolver(&self) -> CodeResolver<'_, S> {
        CodeResolver::new(&*self.store, &*self.config)
    }

    /// Symptom search over this engine's store.
    pub fn search(&self) -> SymptomSearch<'_, S> {
        SymptomSearch::new(&*self.store, &*self.config)
    }

    /// Translation gateway over this engine's store.
    pub fn translator(&self) -> TranslationGateway<'_, S> {
        TranslationGateway::new(&*self.store)
    }

    /// Catalog queries over this engine's store.
    pub fn catalog(&self) -> Catalog<'_, S> {
        Catalog::new(&*self.store, &*self.config)
    }

    /// See [`CodeResolver::resolve`].
    pub fn resolve(&self, query: &str, mode: ResolveMode) -> EngineResult<Vec<TerminologyRecord>> {
        self.resolver().resolve(query, mode)
    }

    /// See [`SymptomSearch::search_grouped`].
    pub fn search_grouped<T: AsRef<str>>(&self, terms: &[T]) -> EngineResult<Vec<DiseaseGroup>> {
        self.search().search_grouped(terms)
    }

    /// See [`SymptomSearch::search_grouped_with`].
    pub fn search_grouped_with<T: AsRef<str>>(
        &self,
        ctx: &SearchContext,
        terms: &[T],
    ) -> EngineResult<Vec<DiseaseGroup>> {
        self.search().search_grouped_with(ctx, terms)
    }

    /// See [`SymptomSearch::search_flat`].
    pub fn search_flat<T: AsRef<str>>(&self, terms: &[T]) -> EngineResult<Vec<TerminologyRecord>> {
        self.search().search_flat(terms)
    }

    /// See [`TranslationGateway::to_target_code`].
    pub fn to_target_code(&self, traditional_code: &str) -> EngineResult<Option<String>> {
        self.translator().to_target_code(traditional_code)
    }

    /// See [`TranslationGateway::to_traditional`].
    pub fn to_traditional(&self, target_code: &str) -> EngineResult<Option<TerminologyRecord>> {
        self.translator().to_traditional(target_code)
    }

    /// See [`TranslationGateway::to_biomedicine_code`].
    pub fn to_biomedicine_code(&self, traditional_code: &str) -> EngineResult<Option<String>> {
        self.translator().to_biomedicine_code(traditional_code)
    }

    /// See [`TranslationGateway::from_biomedicine_code`].
    pub fn from_biomedicine_code(&self, code: &str) -> EngineResult<Option<TerminologyRecord>> {
        self.translator().from_biomedicine_code(code)
    }

    /// See [`DiseaseResolver::lookup`].
    pub fn lookup_disease(&self, name: &str) -> EngineResult<DiseaseLookup> {
        DiseaseResolver::new(&*self.store, &*self.config).lookup(name)
    }

    /// See [`Catalog::statistics`].
    pub fn statistics(&self) -> EngineResult<TerminologyStats> {
        self.catalog().statistics()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use namaste_store::TerminologyStore;

    use super::*;
    use crate::testing::{fever_store, init_tracing, make_record, with_text};

    fn engine() -> TerminologyEngine<TerminologyStore> {
        init_tracing();
        let mut store = fever_store();
        store.insert_records([with_text(
            make_record("unani", "UNA050", "XM8DD4", 0.75),
            "Headache with fever and thirst",
            "Thirst fever",
        )]);
        TerminologyEngine::new(store)
    }

    #[test]
    fn test_end_to_end() {
        let engine = engine();

        assert_eq!(engine.to_target_code("NAM001").unwrap().as_deref(), Some("XM4KH5"));
        assert_eq!(
            engine.to_traditional("XM4KH5").unwrap().map(|r| r.traditional_code),
            Some("NAM001".to_string())
        );
        assert_eq!(engine.resolve("XM4KH5", ResolveMode::TargetOnly).unwrap().len(), 3);

        let groups = engine.search_grouped(&["thirst", "fever"]).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].target_code, "XM8DD4");
        assert_eq!(groups[0].similarity_score, 0.75);

        let stats = engine.statistics().unwrap();
        assert_eq!(stats.total_records, 5);
        assert_eq!(stats.category_count("ayurveda"), 2);
    }

    #[test]
    fn test_dyn_store() {
        let store: Arc<dyn RecordStore> = Arc::new(fever_store());
        let engine = TerminologyEngine::from_shared(store, EngineConfig::default());

        let found = engine.resolve("UNA007", ResolveMode::Any).unwrap();
        assert_eq!(found[0].traditional_code, "UNA007");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_concurrent_readers() {
        let engine = engine();
        let expected = engine.resolve("NAM001", ResolveMode::Any).unwrap();

        thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let engine = engine.clone();
                    scope.spawn(move || engine.resolve("NAM001", ResolveMode::Any))
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
    }
}
