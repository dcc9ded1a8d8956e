//! # namaste-store
//!
//! Record store boundary for the NAMASTE terminology engine.
//!
//! This crate defines [`RecordStore`], the narrow query interface the engine
//! consumes, and [`TerminologyStore`], an indexed in-memory implementation.
//! Other backends (a document database, an SQL table) implement the same
//! trait and translate their own field layout into
//! [`TerminologyRecord`](namaste_types::TerminologyRecord).
//!
//! ## Features
//!
//! - `parallel` (default): scans multi-term text queries with rayon.

#![warn(missing_docs)]

pub mod pattern;
mod query;
mod store;
mod types;

pub use pattern::TermPredicate;
pub use query::RecordStore;
pub use store::TerminologyStore;
pub use types::{StoreConfig, StoreError, StoreResult};

// Re-export namaste-types for convenience
pub use namaste_types;
