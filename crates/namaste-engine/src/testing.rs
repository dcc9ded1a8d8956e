//! Shared fixtures for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use namaste_store::{RecordStore, StoreError, StoreResult, TerminologyStore};
use namaste_types::{ExactField, TerminologyRecord, TextField};

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

pub(crate) fn make_record(
    category: &str,
    traditional_code: &str,
    target_code: &str,
    score: f64,
) -> TerminologyRecord {
    TerminologyRecord {
        category: category.to_string(),
        traditional_code: traditional_code.to_string(),
        traditional_title: Some(format!("Title {}", traditional_code)),
        target_code: Some(target_code.to_string()),
        target_title: Some(format!("Target {}", target_code)),
        confidence_score: Some(score),
        ..Default::default()
    }
}

pub(crate) fn with_text(
    mut record: TerminologyRecord,
    description: &str,
    title: &str,
) -> TerminologyRecord {
    record.traditional_description = Some(description.to_string());
    record.target_title = Some(title.to_string());
    record
}

/// Three categories sharing XM4KH5 plus an unrelated ayurveda record.
pub(crate) fn fever_store() -> TerminologyStore {
    TerminologyStore::from_records([
        make_record("ayurveda", "NAM001", "XM4KH5", 0.9),
        make_record("siddha", "SID014", "XM4KH5", 0.7),
        make_record("unani", "UNA007", "XM4KH5", 0.8),
        make_record("ayurveda", "NAM002", "XM1AB2", 0.65),
    ])
}

/// A store that is always unreachable and counts the calls it receives.
#[derive(Debug, Default)]
pub(crate) struct UnavailableStore {
    calls: AtomicUsize,
}

impl UnavailableStore {
    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RecordStore for UnavailableStore {
    fn find_exact(&self, _fields: &[ExactField], _value: &str) -> StoreResult<Vec<TerminologyRecord>> {
        self.fail()
    }

    fn find_top_by_traditional_code(&self, _value: &str) -> StoreResult<Option<TerminologyRecord>> {
        self.fail()
    }

    fn find_all_matching_all_terms(
        &self,
        _terms: &[String],
        _fields: &[TextField],
    ) -> StoreResult<Vec<TerminologyRecord>> {
        self.fail()
    }

    fn find_all(&self) -> StoreResult<Vec<TerminologyRecord>> {
        self.fail()
    }
}
