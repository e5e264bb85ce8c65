//! Messages exchanged with the player during a session

use serde::{Deserialize, Serialize};
use shared::{PredictionList, RoundOutcome, SessionId, SessionSummary};

/// Everything the player gets to see, in the order it happens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted {
        session: SessionId,
        rounds: usize,
        round_seconds: u64,
    },
    /// Waiting screen before a round; carries the previous round's feedback
    Waiting {
        round: usize,
        rounds: usize,
        category: String,
        feedback: Option<String>,
    },
    RoundStarted {
        round: usize,
        category: String,
        seconds: u64,
    },
    /// The drawing surface should be cleared
    ResetSurface,
    Countdown {
        round: usize,
        remaining: u64,
    },
    Predictions {
        round: usize,
        predictions: PredictionList,
    },
    /// The submission was refused by validation; the player may resubmit
    AttemptRejected {
        round: usize,
        reason: String,
    },
    /// The recognizer could not be reached; the player may resubmit
    TransientError {
        round: usize,
        message: String,
    },
    RoundFinished {
        round: usize,
        category: String,
        outcome: RoundOutcome,
        feedback: String,
    },
    Summary {
        summary: SessionSummary,
    },
    SessionFailed {
        message: String,
    },
}

/// Input from the player side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSignal {
    /// Player left the waiting screen
    Ready,
    /// The surface finished a stroke sequence and has a new image to export
    Submitted,
}
