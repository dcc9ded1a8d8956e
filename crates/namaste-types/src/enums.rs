//! Enumeration types for terminology queries.
//!
//! This module provides the confidence label derived from a mapping score and
//! the field selectors used by store queries.

/// Quality label for a mapping confidence score.
///
/// Derived from the score, never stored.
///
/// # Examples
///
/// ```
/// use namaste_types::ConfidenceLevel;
///
/// assert_eq!(ConfidenceLevel::from_score(0.85), ConfidenceLevel::High);
/// assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::Medium);
/// assert_eq!(ConfidenceLevel::from_score(0.59), ConfidenceLevel::Low);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ConfidenceLevel {
    /// Score below 0.6.
    Low,
    /// Score from 0.6 to 0.8 inclusive.
    Medium,
    /// Score above 0.8.
    High,
}

impl ConfidenceLevel {
    /// Lower bound (inclusive) of the medium band.
    pub const MEDIUM_THRESHOLD: f64 = 0.6;
    /// Upper bound (inclusive) of the medium band.
    pub const HIGH_THRESHOLD: f64 = 0.8;

    /// Classifies a confidence score.
    pub fn from_score(score: f64) -> Self {
        if score > Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Returns the uppercase label used in the datasets (`LOW`, `MEDIUM`, `HIGH`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Fields that support exact-match lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExactField {
    /// The NAMASTE code.
    TraditionalCode,
    /// The ICD-11 TM2 code.
    TargetCode,
    /// The ICD-11 biomedicine code.
    BiomedicineCode,
    /// The traditional-medicine system tag.
    Category,
    /// The NAMASTE title.
    TraditionalTitle,
}

/// Free-text fields searched by symptom and catalog queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextField {
    /// The NAMASTE code, searched as text.
    TraditionalCode,
    /// The NAMASTE title.
    TraditionalTitle,
    /// The NAMASTE description.
    TraditionalDescription,
    /// The ICD-11 TM2 title.
    TargetTitle,
    /// The ICD-11 TM2 definition.
    TargetDefinition,
}

impl TextField {
    /// Fields a symptom term may match (any one of them per term).
    pub const SYMPTOM_FIELDS: [TextField; 4] = [
        TextField::TraditionalDescription,
        TextField::TargetDefinition,
        TextField::TargetTitle,
        TextField::TraditionalTitle,
    ];

    /// Fields searched by the single-term comprehensive search.
    pub const CATALOG_FIELDS: [TextField; 3] = [
        TextField::TraditionalTitle,
        TextField::TraditionalDescription,
        TextField::TraditionalCode,
    ];

    /// Returns true for title fields.
    ///
    /// Title matches weigh less than description or definition matches.
    pub fn is_title(self) -> bool {
        matches!(self, Self::TraditionalTitle | Self::TargetTitle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_level_bands() {
        assert_eq!(ConfidenceLevel::from_score(1.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.81), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.6), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_level_ordering() {
        assert!(ConfidenceLevel::High > ConfidenceLevel::Medium);
        assert!(ConfidenceLevel::Medium > ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::High.as_str(), "HIGH");
    }

    #[test]
    fn test_title_fields() {
        assert!(TextField::TargetTitle.is_title());
        assert!(TextField::TraditionalTitle.is_title());
        assert!(!TextField::TargetDefinition.is_title());
        assert!(!TextField::TraditionalDescription.is_title());
    }

    #[test]
    fn test_symptom_fields_exclude_code() {
        assert!(!TextField::SYMPTOM_FIELDS.contains(&TextField::TraditionalCode));
        assert!(TextField::CATALOG_FIELDS.contains(&TextField::TraditionalCode));
    }
}
