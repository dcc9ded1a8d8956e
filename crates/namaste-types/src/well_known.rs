//! Well-known NAMASTE category tags.
//!
//! # Examples
//!
//! ```
//! use namaste_types::well_known;
//!
//! assert!(well_known::CATEGORIES.contains(&"siddha"));
//! assert_eq!(well_known::UNANI, "unani");
//! ```

// =============================================================================
// Categories
// =============================================================================

/// Ayurveda category tag.
pub const AYURVEDA: &str = "ayurveda";

/// Siddha category tag.
pub const SIDDHA: &str = "siddha";

/// Unani category tag.
pub const UNANI: &str = "unani";

/// All traditional-medicine systems covered by NAMASTE.
pub const CATEGORIES: [&str; 3] = [AYURVEDA, SIDDHA, UNANI];
