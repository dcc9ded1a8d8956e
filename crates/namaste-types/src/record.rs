//! Terminology record type.
//!
//! This module provides the `TerminologyRecord` struct, the unit of storage
//! and matching: one traditional-medicine code and the ICD-11 code it maps to.

use crate::{ConfidenceLevel, ExactField, TextField};

/// A NAMASTE code and its ICD-11 mapping.
///
/// A traditional code is not assumed to be unique, and several records from
/// different categories usually share one `target_code`. Records sharing a
/// target code form a [`DiseaseGroup`](crate::DiseaseGroup).
///
/// With the `serde` feature, records deserialize from the canonical camelCase
/// names as well as from the field names used by older dataset variants
/// (`namasteCode`, `icd11Tm2Code`, `code_description`, `tm2_definition`, ...).
///
/// # Examples
///
/// ```
/// use namaste_types::{ExactField, TerminologyRecord, TextField};
///
/// let record = TerminologyRecord {
///     category: "siddha".to_string(),
///     traditional_code: "SID014".to_string(),
///     traditional_title: Some("Vatha suram".to_string()),
///     target_code: Some("XM4KH5".to_string()),
///     target_title: Some("Fever disorder (TM2)".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(record.exact_field(ExactField::TargetCode), Some("XM4KH5"));
/// assert_eq!(record.text_field(TextField::TraditionalTitle), Some("Vatha suram"));
/// assert_eq!(record.display_name(), "Vatha suram (SID014)");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct TerminologyRecord {
    /// Opaque identifier assigned by the store.
    #[cfg_attr(feature = "serde", serde(alias = "_id"))]
    pub id: String,
    /// Traditional-medicine system tag (e.g. "ayurveda", "siddha", "unani").
    #[cfg_attr(feature = "serde", serde(alias = "namasteCategory"))]
    pub category: String,
    /// Source-system (NAMASTE) code.
    #[cfg_attr(feature = "serde", serde(alias = "namasteCode", alias = "code"))]
    pub traditional_code: String,
    /// Source-system title.
    #[cfg_attr(feature = "serde", serde(alias = "namasteName", alias = "code_title"))]
    pub traditional_title: Option<String>,
    /// Source-system free-text description.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "namasteDescription", alias = "code_description")
    )]
    pub traditional_description: Option<String>,
    /// ICD-11 TM2 code this record maps to.
    #[cfg_attr(feature = "serde", serde(alias = "icd11Tm2Code", alias = "tm2_code"))]
    pub target_code: Option<String>,
    /// ICD-11 TM2 title.
    #[cfg_attr(feature = "serde", serde(alias = "icd11Tm2Name", alias = "tm2_title"))]
    pub target_title: Option<String>,
    /// ICD-11 TM2 definition text.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "icd11Tm2Description", alias = "tm2_definition")
    )]
    pub target_definition: Option<String>,
    /// ICD-11 TM2 reference URI.
    #[cfg_attr(feature = "serde", serde(alias = "icd11Tm2Uri", alias = "tm2_link"))]
    pub target_link: Option<String>,
    /// ICD-11 biomedicine code (dual-coding datasets only).
    #[cfg_attr(feature = "serde", serde(alias = "icd11BiomedicineCode"))]
    pub biomedicine_code: Option<String>,
    /// ICD-11 biomedicine title (dual-coding datasets only).
    #[cfg_attr(feature = "serde", serde(alias = "icd11BiomedicineName"))]
    pub biomedicine_title: Option<String>,
    /// Mapping reliability in `[0, 1]`.
    #[cfg_attr(feature = "serde", serde(alias = "confidence_score"))]
    pub confidence_score: Option<f64>,
    /// Retired records stay in the store but drop out of listings and counts.
    #[cfg_attr(feature = "serde", serde(alias = "isActive"))]
    pub active: bool,
}

impl Default for TerminologyRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            category: String::new(),
            traditional_code: String::new(),
            traditional_title: None,
            traditional_description: None,
            target_code: None,
            target_title: None,
            target_definition: None,
            target_link: None,
            biomedicine_code: None,
            biomedicine_title: None,
            confidence_score: None,
            active: true,
        }
    }
}

impl TerminologyRecord {
    /// Returns the quality label derived from the confidence score.
    ///
    /// Returns `None` if the record carries no score.
    pub fn confidence_level(&self) -> Option<ConfidenceLevel> {
        self.confidence_score.map(ConfidenceLevel::from_score)
    }

    /// Returns true if the confidence score is present and strictly above `threshold`.
    pub fn passes_confidence(&self, threshold: f64) -> bool {
        self.confidence_score.is_some_and(|score| score > threshold)
    }

    /// Returns true if this record maps to an ICD-11 biomedicine code.
    pub fn has_biomedicine_mapping(&self) -> bool {
        self.biomedicine_code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Returns true if this record maps to an ICD-11 TM2 code.
    pub fn has_target_mapping(&self) -> bool {
        self.target_code.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// Returns true if both a TM2 and a biomedicine code are available.
    pub fn has_dual_coding(&self) -> bool {
        self.has_target_mapping() && self.has_biomedicine_mapping()
    }

    /// Returns true if either ICD-11 mapping is missing.
    pub fn is_unmapped(&self) -> bool {
        !self.has_dual_coding()
    }

    /// Returns the value of an exact-match field.
    pub fn exact_field(&self, field: ExactField) -> Option<&str> {
        match field {
            ExactField::TraditionalCode => Some(self.traditional_code.as_str()),
            ExactField::TargetCode => self.target_code.as_deref(),
            ExactField::BiomedicineCode => self.biomedicine_code.as_deref(),
            ExactField::Category => Some(self.category.as_str()),
            ExactField::TraditionalTitle => self.traditional_title.as_deref(),
        }
    }

    /// Returns the value of a free-text field.
    pub fn text_field(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::TraditionalCode => Some(self.traditional_code.as_str()),
            TextField::TraditionalTitle => self.traditional_title.as_deref(),
            TextField::TraditionalDescription => self.traditional_description.as_deref(),
            TextField::TargetTitle => self.target_title.as_deref(),
            TextField::TargetDefinition => self.target_definition.as_deref(),
        }
    }

    /// Returns a label for UI lists: `"<title> (<code>)"`.
    ///
    /// Falls back to the bare code when the record has no title.
    pub fn display_name(&self) -> String {
        match self.traditional_title.as_deref() {
            Some(title) if !title.is_empty() => format!("{} ({})", title, self.traditional_code),
            _ => self.traditional_code.clone(),
        }
    }
}
