//! End-of-round feedback and end-of-session scoring

use shared::{Category, FeedbackTier, RoundOutcome, SessionSummary};

/// Message shown on the waiting screen after a round
pub fn round_feedback(category: &str, outcome: RoundOutcome) -> String {
    match outcome {
        RoundOutcome::Correct => format!("I recognized your drawing of a {category}. Well done!"),
        RoundOutcome::Timeout => {
            format!("I didn't recognize your drawing of a {category}. Better luck next time!")
        }
    }
}

/// Partition categories by outcome and pick the closing message
///
/// `categories` and `outcomes` are in round order and of equal length.
pub fn summarize(categories: &[Category], outcomes: &[RoundOutcome]) -> SessionSummary {
    let mut correct_categories = Vec::new();
    let mut wrong_categories = Vec::new();

    for (category, outcome) in categories.iter().zip(outcomes) {
        if outcome.is_correct() {
            correct_categories.push(category.name.clone());
        } else {
            wrong_categories.push(category.name.clone());
        }
    }

    let round_count = outcomes.len();
    let correct_count = correct_categories.len();
    let percent = if round_count == 0 {
        0.0
    } else {
        correct_count as f64 / round_count as f64
    };
    let tier = FeedbackTier::for_ratio(percent);

    SessionSummary {
        correct_categories,
        wrong_categories,
        message: tier.message().to_string(),
        tier,
        correct_count,
        round_count,
    }
}
