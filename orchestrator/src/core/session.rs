//! Session state machine
//!
//! ```text
//! Created -> Waiting(i) -> Active(i) -> RoundComplete(i) -> Waiting(i+1) | Finished
//! ```
//!
//! `current_round` only moves forward, and exactly one outcome is written
//! per round before it does.

use std::fmt;

use shared::{Category, RoundOutcome, SessionId, SessionSummary};

use super::outcomes::RoundOutcomes;
use super::summary::{round_feedback, summarize};
use crate::error::{OrchestratorError, OrchestratorResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    Waiting(usize),
    Active(usize),
    RoundComplete(usize),
    Finished,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Created => write!(f, "created"),
            SessionPhase::Waiting(i) => write!(f, "waiting for round {i}"),
            SessionPhase::Active(i) => write!(f, "playing round {i}"),
            SessionPhase::RoundComplete(i) => write!(f, "completing round {i}"),
            SessionPhase::Finished => write!(f, "finished"),
        }
    }
}

/// What follows a completed round
#[derive(Debug, Clone, PartialEq)]
pub enum RoundTransition {
    Next { round: usize, feedback: String },
    Finished { feedback: String, summary: SessionSummary },
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    categories: Vec<Category>,
    current_round: usize,
    outcomes: RoundOutcomes,
    phase: SessionPhase,
}

impl Session {
    /// One round per category, in the given order
    pub fn new(id: SessionId, categories: Vec<Category>) -> OrchestratorResult<Self> {
        if categories.is_empty() {
            return Err(OrchestratorError::Provisioning {
                requested: 1,
                available: 0,
            });
        }
        let outcomes = RoundOutcomes::new(categories.len());
        Ok(Self {
            id,
            categories,
            current_round: 0,
            outcomes,
            phase: SessionPhase::Created,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn round_count(&self) -> usize {
        self.categories.len()
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn current_category(&self) -> &Category {
        &self.categories[self.current_round]
    }

    pub fn outcomes(&self) -> &RoundOutcomes {
        &self.outcomes
    }

    fn invalid(&self, operation: &'static str) -> OrchestratorError {
        OrchestratorError::InvalidTransition {
            from: self.phase.to_string(),
            operation,
        }
    }

    /// `Created -> Waiting(0)`
    pub fn open(&mut self) -> OrchestratorResult<()> {
        match self.phase {
            SessionPhase::Created => {
                self.phase = SessionPhase::Waiting(0);
                Ok(())
            }
            _ => Err(self.invalid("open the session")),
        }
    }

    /// `Waiting(i) -> Active(i)`, returning the round's target
    pub fn begin_round(&mut self) -> OrchestratorResult<&Category> {
        match self.phase {
            SessionPhase::Waiting(i) => {
                self.phase = SessionPhase::Active(i);
                Ok(&self.categories[i])
            }
            _ => Err(self.invalid("begin a round")),
        }
    }

    /// Write the active round's outcome
    ///
    /// Returns whether the write applied; a round that already has an outcome
    /// keeps it.
    pub fn record_outcome(&mut self, outcome: RoundOutcome) -> OrchestratorResult<bool> {
        match self.phase {
            SessionPhase::Active(i) => Ok(self.outcomes.record(i, outcome)),
            _ => Err(self.invalid("record an outcome")),
        }
    }

    /// `Active(i) -> RoundComplete(i) -> Waiting(i+1) | Finished`
    pub fn complete_round(&mut self) -> OrchestratorResult<RoundTransition> {
        let round = match self.phase {
            SessionPhase::Active(i) => i,
            _ => return Err(self.invalid("complete a round")),
        };
        let outcome = self
            .outcomes
            .get(round)
            .ok_or_else(|| self.invalid("complete a round without an outcome"))?;

        self.phase = SessionPhase::RoundComplete(round);
        let feedback = round_feedback(&self.categories[round].name, outcome);

        if round + 1 == self.round_count() {
            let summary = self.summarize()?;
            self.phase = SessionPhase::Finished;
            return Ok(RoundTransition::Finished { feedback, summary });
        }

        self.current_round = round + 1;
        self.phase = SessionPhase::Waiting(self.current_round);
        Ok(RoundTransition::Next {
            round: self.current_round,
            feedback,
        })
    }

    /// Score the session; every round must have an outcome
    pub fn summarize(&self) -> OrchestratorResult<SessionSummary> {
        let outcomes = self
            .outcomes
            .to_vec()
            .ok_or_else(|| self.invalid("summarize before every round has an outcome"))?;
        Ok(summarize(&self.categories, &outcomes))
    }
}
