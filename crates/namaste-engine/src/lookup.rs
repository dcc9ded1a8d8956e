//! Disease-name lookup with a fallback cascade and suggestions on a miss.

use namaste_store::RecordStore;
use namaste_types::{ExactField, TerminologyRecord};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::matcher;
use crate::translate::{highest_confidence, TranslationGateway};

/// How a disease name was matched, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The name equals a traditional title.
    ExactTitle,
    /// Top hit of the comprehensive catalog search.
    ComprehensiveSearch,
    /// The name is an ICD-11 TM2 code.
    TargetCode,
    /// The name is an ICD-11 biomedicine code.
    BiomedicineCode,
    /// The name appears in an ICD-11 title or the traditional description of
    /// an active record, scanned in title order.
    DescriptiveText,
}

/// Outcome of [`DiseaseResolver::lookup`].
#[derive(Debug, Clone, PartialEq)]
pub enum DiseaseLookup {
    /// A record was found.
    Found {
        /// The matched record.
        record: TerminologyRecord,
        /// The cascade step that matched.
        strategy: MatchStrategy,
    },
    /// Nothing matched.
    NotFound {
        /// The trimmed query.
        query: String,
        /// Titles of close records, possibly empty.
        suggestions: Vec<String>,
    },
}

impl DiseaseLookup {
    /// Returns the matched record, if any.
    pub fn record(&self) -> Option<&TerminologyRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound { .. } => None,
        }
    }
}

/// Resolves a free-form disease name or code to a single record.
pub struct DiseaseResolver<'a, S: ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: RecordStore + ?Sized> DiseaseResolver<'a, S> {
    /// Creates a resolver over `store`.
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Tries each [`MatchStrategy`] in order and returns the first hit.
    ///
    /// # Errors
    /// Store failures during the cascade propagate. A failure while collecting
    /// suggestions is logged and yields no suggestions.
    pub fn lookup(&self, name: &str) -> EngineResult<DiseaseLookup> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(DiseaseLookup::NotFound {
                query: String::new(),
                suggestions: Vec::new(),
            });
        }

        if let Some((record, strategy)) = self.cascade(name)? {
            tracing::info!(
                "Disease {:?} matched {} via {:?}",
                name,
                record.traditional_code,
                strategy
            );
            return Ok(DiseaseLookup::Found { record, strategy });
        }

        let suggestions = self.suggestions(name);
        tracing::info!("Disease {:?} not found, {} suggestions", name, suggestions.len());
        Ok(DiseaseLookup::NotFound {
            query: name.to_string(),
            suggestions,
        })
    }

    fn cascade(&self, name: &str) -> EngineResult<Option<(TerminologyRecord, MatchStrategy)>> {
        let exact = self.store.find_exact(&[ExactField::TraditionalTitle], name)?;
        if let Some(record) = highest_confidence(exact) {
            return Ok(Some((record, MatchStrategy::ExactTitle)));
        }

        let catalog = Catalog::new(self.store, self.config);
        if let Some(record) = catalog.comprehensive_search(name)?.into_iter().next() {
            return Ok(Some((record, MatchStrategy::ComprehensiveSearch)));
        }

        let gateway = TranslationGateway::new(self.store);
        if let Some(record) = gateway.to_traditional(name)? {
            return Ok(Some((record, MatchStrategy::TargetCode)));
        }
        if let Some(record) = gateway.from_biomedicine_code(name)? {
            return Ok(Some((record, MatchStrategy::BiomedicineCode)));
        }

        let descriptive = catalog
            .active_records()?
            .into_iter()
            .find(|record| mentions(record, name));
        Ok(descriptive.map(|record| (record, MatchStrategy::DescriptiveText)))
    }

    /// Auto-complete titles for the whole name, then for each of its words.
    fn suggestions(&self, name: &str) -> Vec<String> {
        let catalog = Catalog::new(self.store, self.config);
        let limit = self.config.suggestion_limit;
        let mut titles: Vec<String> = Vec::new();

        for term in std::iter::once(name).chain(name.split_whitespace()) {
            if titles.len() >= limit {
                break;
            }
            match catalog.autocomplete(term, limit) {
                Ok(records) => {
                    for title in records.into_iter().filter_map(|r| r.traditional_title) {
                        if titles.len() < limit && !titles.contains(&title) {
                            titles.push(title);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Could not collect suggestions for {:?}: {}", name, e);
                    break;
                }
            }
        }
        titles
    }
}

fn mentions(record: &TerminologyRecord, name: &str) -> bool {
    [
        record.target_title.as_deref(),
        record.biomedicine_title.as_deref(),
        record.traditional_description.as_deref(),
    ]
    .into_iter()
    .any(|text| matcher::score_opt(Some(name), text) >= 1.0)
}
