//! Read-only catalog queries over the whole terminology.

use std::cmp::Ordering;

use namaste_store::RecordStore;
use namaste_types::{well_known, ExactField, TerminologyRecord, TerminologyStats, TextField};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::matcher;

/// Category listings, mapping-coverage filters, statistics and term lookup.
pub struct Catalog<'a, S: ?Sized> {
    store: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: RecordStore + ?Sized> Catalog<'a, S> {
    /// Creates a catalog over `store`.
    pub fn new(store: &'a S, config: &'a EngineConfig) -> Self {
        Self { store, config }
    }

    /// Active records of one category, in store order.
    pub fn records_by_category(&self, category: &str) -> EngineResult<Vec<TerminologyRecord>> {
        let category = category.trim();
        if category.is_empty() {
            return Ok(Vec::new());
        }
        Ok(active_only(self.store.find_exact(&[ExactField::Category], category)?))
    }

    /// Active records ordered by traditional title; untitled records come last.
    pub fn active_records(&self) -> EngineResult<Vec<TerminologyRecord>> {
        let mut records = active_only(self.store.find_all()?);
        records.sort_by(|a, b| match (&a.traditional_title, &b.traditional_title) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        Ok(records)
    }

    /// Active records that carry an ICD-11 TM2 code.
    pub fn records_with_target_mapping(&self) -> EngineResult<Vec<TerminologyRecord>> {
        self.filtered(TerminologyRecord::has_target_mapping)
    }

    /// Active records that carry an ICD-11 biomedicine code.
    pub fn records_with_biomedicine_mapping(&self) -> EngineResult<Vec<TerminologyRecord>> {
        self.filtered(TerminologyRecord::has_biomedicine_mapping)
    }

    /// Active records that carry both a TM2 and a biomedicine code.
    pub fn dual_coded_records(&self) -> EngineResult<Vec<TerminologyRecord>> {
        self.filtered(TerminologyRecord::has_dual_coding)
    }

    /// Active records missing at least one ICD-11 code.
    pub fn unmapped_records(&self) -> EngineResult<Vec<TerminologyRecord>> {
        self.filtered(TerminologyRecord::is_unmapped)
    }

    /// Summary counts over active records. The three NAMASTE systems are
    /// always listed.
    pub fn statistics(&self) -> EngineResult<TerminologyStats> {
        let records = self.store.find_all()?;
        let mut stats = TerminologyStats::from_records(&records);
        for category in well_known::CATEGORIES {
            stats.by_category.entry(category.to_string()).or_insert(0);
        }
        tracing::info!(
            "Statistics: {} records, {} dual-coded, {} unmapped",
            stats.total_records,
            stats.dual_coded_records,
            stats.unmapped_records
        );
        Ok(stats)
    }

    /// Active records whose traditional title contains `term`, at most `limit`.
    pub fn autocomplete(&self, term: &str, limit: usize) -> EngineResult<Vec<TerminologyRecord>> {
        let Some(term) = self.usable_term(term) else {
            return Ok(Vec::new());
        };
        let mut records = active_only(
            self.store
                .find_all_matching_all_terms(&[term], &[TextField::TraditionalTitle])?,
        );
        records.truncate(limit);
        Ok(records)
    }

    /// Active records matching `term` in title, description or code, best first.
    ///
    /// Equal scores keep store order.
    pub fn comprehensive_search(&self, term: &str) -> EngineResult<Vec<TerminologyRecord>> {
        let Some(term) = self.usable_term(term) else {
            return Ok(Vec::new());
        };
        let records = active_only(
            self.store
                .find_all_matching_all_terms(std::slice::from_ref(&term), &TextField::CATALOG_FIELDS)?,
        );

        let mut scored: Vec<(f64, TerminologyRecord)> = records
            .into_iter()
            .map(|r| (matcher::field_score(&term, &r, &TextField::CATALOG_FIELDS), r))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        tracing::info!("Comprehensive search {:?}: {} hits", term, scored.len());
        Ok(scored.into_iter().map(|(_, r)| r).collect())
    }

    fn usable_term(&self, term: &str) -> Option<String> {
        let term = term.trim();
        (term.chars().count() >= self.config.min_term_len).then(|| term.to_string())
    }

    fn filtered(&self, keep: fn(&TerminologyRecord) -> bool) -> EngineResult<Vec<TerminologyRecord>> {
        Ok(self
            .store
            .find_all()?
            .into_iter()
            .filter(|r| r.active && keep(r))
            .collect())
    }
}

fn active_only(records: Vec<TerminologyRecord>) -> Vec<TerminologyRecord> {
    records.into_iter().filter(|r| r.active).collect()
}
