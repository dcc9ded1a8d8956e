//! # namaste-engine
//!
//! Matching engine mapping NAMASTE (Ayurveda, Siddha, Unani) terminology to
//! ICD-11 Traditional Medicine Module 2.
//!
//! The engine is read-only and synchronous. It runs over any
//! [`RecordStore`](namaste_store::RecordStore) and provides:
//!
//! - [`CodeResolver`]: exact code lookup with confidence filtering and one
//!   record per medicine system.
//! - [`SymptomSearch`]: AND-of-terms symptom search clustered into
//!   [`DiseaseGroup`](namaste_types::DiseaseGroup)s.
//! - [`TranslationGateway`]: point translations between NAMASTE, TM2 and
//!   biomedicine codes.
//! - [`Catalog`] and [`DiseaseResolver`]: listings, statistics, auto-complete
//!   and disease-name lookup.
//!
//! [`TerminologyEngine`] bundles them behind one cloneable handle.
//!
//! ## Usage
//!
//! ```rust
//! use namaste_engine::{ResolveMode, TerminologyEngine};
//! use namaste_store::TerminologyStore;
//! use namaste_types::TerminologyRecord;
//!
//! let record = |category: &str, code: &str, score: f64| TerminologyRecord {
//!     category: category.to_string(),
//!     traditional_code: code.to_string(),
//!     traditional_description: Some("Fever with headache".to_string()),
//!     target_code: Some("XM4KH5".to_string()),
//!     confidence_score: Some(score),
//!     ..Default::default()
//! };
//! let engine = TerminologyEngine::new(TerminologyStore::from_records([
//!     record("ayurveda", "NAM001", 0.9),
//!     record("siddha", "SID014", 0.7),
//!     record("unani", "UNA007", 0.8),
//! ]));
//!
//! assert_eq!(engine.to_target_code("NAM001").unwrap().as_deref(), Some("XM4KH5"));
//! assert_eq!(engine.resolve("XM4KH5", ResolveMode::TargetOnly).unwrap().len(), 3);
//!
//! let groups = engine.search_grouped(&["fever", "headache"]).unwrap();
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].mappings.len(), 3);
//! ```

#![warn(missing_docs)]

mod catalog;
mod config;
mod context;
mod engine;
mod error;
mod lookup;
pub mod matcher;
mod resolver;
mod search;
mod translate;

#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use config::{
    EngineConfig, MAX_CODE_RESULTS_VAR, MAX_GROUPS_VAR, MIN_CONFIDENCE_VAR, MIN_TERM_LEN_VAR,
};
pub use context::{CancelHandle, SearchContext};
pub use engine::TerminologyEngine;
pub use error::{EngineError, EngineResult};
pub use lookup::{DiseaseLookup, DiseaseResolver, MatchStrategy};
pub use resolver::{CodeResolver, ResolveMode};
pub use search::SymptomSearch;
pub use translate::TranslationGateway;

// Re-export the lower layers for convenience
pub use namaste_store;
pub use namaste_types;
