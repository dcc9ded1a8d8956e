//! Disease group type.

use crate::TerminologyRecord;

/// All traditional-medicine records that map to one ICD-11 code.
///
/// Produced by symptom search, never persisted. `mappings` holds at most one
/// record per category.
///
/// # Examples
///
/// ```
/// use namaste_types::{DiseaseGroup, TerminologyRecord};
///
/// let group = DiseaseGroup {
///     target_code: "XM4KH5".to_string(),
///     similarity_score: 0.9,
///     mappings: vec![
///         TerminologyRecord { category: "ayurveda".into(), ..Default::default() },
///         TerminologyRecord { category: "unani".into(), ..Default::default() },
///     ],
///     ..Default::default()
/// };
///
/// assert_eq!(group.categories().collect::<Vec<_>>(), vec!["ayurveda", "unani"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DiseaseGroup {
    /// The anchoring ICD-11 TM2 code.
    pub target_code: String,
    /// Title of the anchoring code.
    pub target_title: Option<String>,
    /// Definition of the anchoring code.
    pub target_definition: Option<String>,
    /// Confidence of the record whose symptom match discovered this group.
    pub similarity_score: f64,
    /// One record per category, in resolver order.
    pub mappings: Vec<TerminologyRecord>,
}

impl DiseaseGroup {
    /// Returns the categories covered by this group, in mapping order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.mappings.iter().map(|m| m.category.as_str())
    }

    /// Returns the mapping for a category, if present.
    pub fn mapping_for(&self, category: &str) -> Option<&TerminologyRecord> {
        self.mappings.iter().find(|m| m.category == category)
    }
}
