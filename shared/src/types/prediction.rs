//! Ranked recognizer output

use serde::{Deserialize, Serialize};

/// Number of predictions kept from each classification
pub const TOP_K: usize = 3;

/// One recognizer guess
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub category_index: u32,
    pub category_name: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(category_index: u32, category_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            category_index,
            category_name: category_name.into(),
            confidence,
        }
    }
}

/// Predictions ordered by descending confidence, at most [`TOP_K`] long
///
/// Built fresh for every classification call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionList(Vec<Prediction>);

impl PredictionList {
    /// Wrap predictions that are already sorted and truncated
    pub fn from_ranked(predictions: Vec<Prediction>) -> Self {
        debug_assert!(predictions
            .windows(2)
            .all(|pair| pair[0].confidence >= pair[1].confidence));
        Self(predictions)
    }

    /// Highest-confidence prediction
    pub fn top(&self) -> Option<&Prediction> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prediction> {
        self.0.iter()
    }

    /// Human readable form, e.g. `cat (81%), dog (12%)`
    pub fn describe(&self) -> String {
        if self.0.is_empty() {
            return "nothing yet".to_string();
        }
        self.0
            .iter()
            .map(|p| format!("{} ({:.0}%)", p.category_name, p.confidence * 100.0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a PredictionList {
    type Item = &'a Prediction;
    type IntoIter = std::slice::Iter<'a, Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
