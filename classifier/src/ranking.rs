//! Turning raw recognizer scores into a named top-K list

use std::cmp::Ordering;
use std::collections::HashMap;

use shared::{CategoryCatalog, Prediction, PredictionList};

use crate::error::{ClassifyError, ClassifyResult};

/// Recognizer response: category index to score, unsorted and unbounded
pub type RawScores = HashMap<u32, f64>;

/// Sort scores descending, keep the best `k` and attach display names
///
/// Equal scores are ordered by ascending index so results are stable.
/// Indices missing from the catalog get an empty name.
pub fn rank(scores: &RawScores, catalog: &CategoryCatalog, k: usize) -> ClassifyResult<PredictionList> {
    if let Some((index, score)) = scores.iter().find(|(_, score)| !score.is_finite()) {
        return Err(ClassifyError::protocol(format!(
            "non-finite score {score} for category {index}"
        )));
    }

    let mut ranked: Vec<(u32, f64)> = scores.iter().map(|(i, s)| (*i, *s)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal).then(a.0.cmp(&b.0)));
    ranked.truncate(k);

    let predictions = ranked
        .into_iter()
        .map(|(index, confidence)| {
            Prediction::new(index, catalog.name_of(index).unwrap_or_default(), confidence)
        })
        .collect();

    Ok(PredictionList::from_ranked(predictions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, TOP_K};

    fn catalog() -> CategoryCatalog {
        vec![
            Category::new(0, "cat"),
            Category::new(1, "dog"),
            Category::new(2, "house"),
            Category::new(3, "tree"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_rank_sorts_and_truncates() {
        let scores: RawScores = [(0, 0.1), (1, 0.6), (2, 0.05), (3, 0.25)].into_iter().collect();

        let list = rank(&scores, &catalog(), TOP_K).unwrap();

        let names: Vec<&str> = list.iter().map(|p| p.category_name.as_str()).collect();
        assert_eq!(names, vec!["dog", "tree", "cat"]);
        assert!(list
            .iter()
            .zip(list.iter().skip(1))
            .all(|(a, b)| a.confidence >= b.confidence));
    }

    #[test]
    fn test_unknown_index_gets_empty_name() {
        let scores: RawScores = [(42, 0.9), (0, 0.1)].into_iter().collect();

        let list = rank(&scores, &catalog(), TOP_K).unwrap();

        assert_eq!(list.top().unwrap().category_index, 42);
        assert_eq!(list.top().unwrap().category_name, "");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_ties_break_on_index() {
        let scores: RawScores = [(3, 0.5), (1, 0.5), (2, 0.5), (0, 0.5)].into_iter().collect();

        let list = rank(&scores, &catalog(), TOP_K).unwrap();

        let indices: Vec<u32> = list.iter().map(|p| p.category_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_and_nan_scores() {
        assert!(rank(&RawScores::new(), &catalog(), TOP_K).unwrap().is_empty());

        let scores: RawScores = [(0, f64::NAN)].into_iter().collect();
        let err = rank(&scores, &catalog(), TOP_K).unwrap_err();
        assert!(err.is_upstream());
    }
}
