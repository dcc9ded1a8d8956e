//! Terminology statistics for dashboards and monitoring.

use std::collections::BTreeMap;

use crate::TerminologyRecord;

/// Summary counts over a set of terminology records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TerminologyStats {
    /// Number of active records; every other count covers active records only.
    pub total_records: usize,
    /// Record count per category.
    pub by_category: BTreeMap<String, usize>,
    /// Records carrying both a TM2 and a biomedicine code.
    pub dual_coded_records: usize,
    /// Records missing at least one ICD-11 mapping.
    pub unmapped_records: usize,
    /// Retired records, excluded from the counts above.
    pub inactive_records: usize,
}

impl TerminologyStats {
    /// Computes statistics for the given records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TerminologyRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            if !record.active {
                stats.inactive_records += 1;
                continue;
            }
            stats.total_records += 1;
            *stats.by_category.entry(record.category.clone()).or_default() += 1;
            if record.has_dual_coding() {
                stats.dual_coded_records += 1;
            } else {
                stats.unmapped_records += 1;
            }
        }
        stats
    }

    /// Returns the record count for a category (0 when absent).
    pub fn category_count(&self, category: &str) -> usize {
        self.by_category.get(category).copied().unwrap_or(0)
    }

    /// Returns the percentage of records with dual coding.
    pub fn dual_coding_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.dual_coded_records as f64 / self.total_records as f64) * 100.0
        }
    }
}
