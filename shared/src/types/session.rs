//! Session-level identifiers, outcomes and summaries

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque token identifying one player's game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The top prediction matched the target before the deadline
    Correct,
    /// The deadline elapsed first
    Timeout,
}

impl RoundOutcome {
    pub fn is_correct(self) -> bool {
        matches!(self, RoundOutcome::Correct)
    }
}

/// Closing message tiers, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Nothing,
    Poor,
    Fair,
    Good,
    Outstanding,
}

impl FeedbackTier {
    /// Select the tier for a correct-round ratio in `[0, 1]`
    ///
    /// Thresholds are checked in ascending order and the first match wins.
    pub fn for_ratio(percent: f64) -> Self {
        if percent == 0.0 {
            FeedbackTier::Nothing
        } else if percent < 0.5 {
            FeedbackTier::Poor
        } else if percent < 0.75 {
            FeedbackTier::Fair
        } else if percent < 0.95 {
            FeedbackTier::Good
        } else {
            FeedbackTier::Outstanding
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn message(self) -> &'static str {
        match self {
            FeedbackTier::Nothing => "You don't even care. Do you?",
            FeedbackTier::Poor => "I'm not even mad, just disappointed",
            FeedbackTier::Fair => "All right, keep doing whatever it is you think you're doing.",
            FeedbackTier::Good => "Didn't we have some fun, though?",
            FeedbackTier::Outstanding => {
                "Unbelievable! You, <Subject Name Here>, must be the pride of <Subject Hometown Here>."
            }
        }
    }
}

/// Final scoreboard, computed once after the last round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Categories the recognizer guessed, in play order
    pub correct_categories: Vec<String>,
    /// Categories that timed out, in play order
    pub wrong_categories: Vec<String>,
    pub message: String,
    pub tier: FeedbackTier,
    pub correct_count: usize,
    pub round_count: usize,
}

impl SessionSummary {
    pub fn percent(&self) -> f64 {
        if self.round_count == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.round_count as f64
    }
}
