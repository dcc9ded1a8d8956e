//! Point translations between traditional, ICD-11 TM2 and biomedicine codes.

use namaste_store::RecordStore;
use namaste_types::{ExactField, TerminologyRecord};

use crate::error::EngineResult;

/// Read-only code translation. "Not found" is `Ok(None)`.
pub struct TranslationGateway<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: RecordStore + ?Sized> TranslationGateway<'a, S> {
    /// Creates a gateway over `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Target code of the highest-confidence record with `traditional_code`.
    pub fn to_target_code(&self, traditional_code: &str) -> EngineResult<Option<String>> {
        let Some(record) = self.top_by_traditional_code(traditional_code)? else {
            return Ok(None);
        };
        let code = non_blank(record.target_code.as_deref());
        tracing::info!("Translated {} to target code {:?}", traditional_code.trim(), code);
        Ok(code)
    }

    /// Traditional record mapped to `target_code`.
    ///
    /// When several records share the code, the highest confidence wins and
    /// ties keep store order.
    pub fn to_traditional(&self, target_code: &str) -> EngineResult<Option<TerminologyRecord>> {
        self.best_by(ExactField::TargetCode, target_code)
    }

    /// Biomedicine code of the highest-confidence record with `traditional_code`.
    pub fn to_biomedicine_code(&self, traditional_code: &str) -> EngineResult<Option<String>> {
        Ok(self
            .top_by_traditional_code(traditional_code)?
            .and_then(|record| non_blank(record.biomedicine_code.as_deref())))
    }

    /// Traditional record dual-coded to the biomedicine `code`.
    pub fn from_biomedicine_code(&self, code: &str) -> EngineResult<Option<TerminologyRecord>> {
        self.best_by(ExactField::BiomedicineCode, code)
    }

    fn top_by_traditional_code(&self, code: &str) -> EngineResult<Option<TerminologyRecord>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        Ok(self.store.find_top_by_traditional_code(code)?)
    }

    fn best_by(&self, field: ExactField, code: &str) -> EngineResult<Option<TerminologyRecord>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        let found = highest_confidence(self.store.find_exact(&[field], code)?);
        tracing::info!(
            "Translated {:?} {} to {:?}",
            field,
            code,
            found.as_ref().map(|r| r.traditional_code.as_str())
        );
        Ok(found)
    }
}

/// Highest-confidence record; ties keep the earliest, absent scores rank lowest.
pub(crate) fn highest_confidence(
    records: impl IntoIterator<Item = TerminologyRecord>,
) -> Option<TerminologyRecord> {
    let mut best: Option<TerminologyRecord> = None;
    for record in records {
        let better = match &best {
            None => true,
            Some(current) => rank(&record) > rank(current),
        };
        if better {
            best = Some(record);
        }
    }
    best
}

fn rank(record: &TerminologyRecord) -> f64 {
    record.confidence_score.unwrap_or(f64::NEG_INFINITY)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use namaste_store::TerminologyStore;

    use super::*;
    use crate::error::EngineError;
    use crate::testing::{fever_store, make_record, UnavailableStore};

    #[test]
    fn test_round_trip() {
        let store = fever_store();
        let gateway = TranslationGateway::new(&store);

        let target = gateway.to_target_code("NAM001").unwrap();
        assert_eq!(target.as_deref(), Some("XM4KH5"));

        let back = gateway.to_traditional("XM4KH5").unwrap().unwrap();
        assert_eq!(back.traditional_code, "NAM001");
    }

    #[test]
    fn test_missing_codes() {
        let store = fever_store();
        let gateway = TranslationGateway::new(&store);

        assert_eq!(gateway.to_target_code("NAM999").unwrap(), None);
        assert_eq!(gateway.to_traditional("XX0000").unwrap(), None);
        assert_eq!(gateway.to_target_code("  ").unwrap(), None);
    }

    #[test]
    fn test_unmapped_record_has_no_target() {
        let mut unmapped = make_record("siddha", "SID900", "", 0.9);
        unmapped.target_code = None;
        let store = TerminologyStore::from_records([unmapped]);
        let gateway = TranslationGateway::new(&store);

        assert_eq!(gateway.to_target_code("SID900").unwrap(), None);
    }

    #[test]
    fn test_highest_confidence_ties_and_absent_scores() {
        let mut unscored = make_record("unani", "UNA001", "XM4KH5", 0.0);
        unscored.confidence_score = None;
        let picked = highest_confidence(vec![
            unscored,
            make_record("siddha", "SID001", "XM4KH5", 0.7),
            make_record("ayurveda", "NAM001", "XM4KH5", 0.7),
        ]);
        assert_eq!(picked.unwrap().traditional_code, "SID001");
        assert!(highest_confidence(Vec::new()).is_none());
    }

    #[test]
    fn test_biomedicine_codes() {
        let mut record = make_record("ayurveda", "NAM001", "XM4KH5", 0.9);
        record.biomedicine_code = Some("1D01".to_string());
        let store = TerminologyStore::from_records([record]);
        let gateway = TranslationGateway::new(&store);

        assert_eq!(gateway.to_biomedicine_code("NAM001").unwrap().as_deref(), Some("1D01"));
        let back = gateway.from_biomedicine_code(" 1D01 ").unwrap().unwrap();
        assert_eq!(back.traditional_code, "NAM001");
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = UnavailableStore::default();
        let gateway = TranslationGateway::new(&store);

        assert!(matches!(gateway.to_target_code("NAM001"), Err(EngineError::Store(_))));
        assert_eq!(store.call_count(), 1);
    }
}
