//! # namaste-types
//!
//! Type definitions for NAMASTE traditional-medicine terminology and its
//! mappings to ICD-11 (Traditional Medicine Module 2 and biomedicine).
//!
//! This crate provides the plain value types shared by the record store and
//! the matching engine: terminology records, disease groups, field selectors,
//! confidence labels and summary statistics.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde,
//!   including the legacy field names of older dataset variants.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use namaste_types::{ConfidenceLevel, TerminologyRecord};
//! use namaste_types::well_known;
//!
//! let record = TerminologyRecord {
//!     category: well_known::AYURVEDA.to_string(),
//!     traditional_code: "NAM001".to_string(),
//!     target_code: Some("XM4KH5".to_string()),
//!     confidence_score: Some(0.92),
//!     ..Default::default()
//! };
//!
//! assert_eq!(record.confidence_level(), Some(ConfidenceLevel::High));
//! assert!(record.passes_confidence(0.6));
//! ```
//!
//! ## Without Serde
//!
//! ```toml
//! [dependencies]
//! namaste-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod enums;
mod group;
mod record;
mod stats;
pub mod well_known;

// Re-export all public types at crate root
pub use enums::{ConfidenceLevel, ExactField, TextField};
pub use group::DiseaseGroup;
pub use record::TerminologyRecord;
pub use stats::TerminologyStats;
