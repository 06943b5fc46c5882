use crate::models::{Detection, DetectionSet};

/// Case-insensitive substring query against class labels.
///
/// Whitespace is kept as part of the query. An empty or whitespace-only
/// keyword matches nothing, so an accidental blank query never highlights
/// the whole image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches_label(&self, label: &str) -> bool {
        !self.is_empty() && label.to_lowercase().contains(&self.0)
    }
}

/// Whether `detection`'s class label satisfies `keyword`
pub fn matches(detection: &Detection, keyword: &str) -> bool {
    Keyword::new(keyword).matches_label(&detection.class_label)
}

/// Keep the detections whose label matches, preserving detection order
pub fn filter_matches<'a>(detections: &'a DetectionSet, keyword: &Keyword) -> Vec<&'a Detection> {
    detections
        .iter()
        .filter(|d| keyword.matches_label(&d.class_label))
        .collect()
}
