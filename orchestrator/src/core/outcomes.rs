//! Write-once outcome slots, one per round

use shared::RoundOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcomes {
    slots: Vec<Option<RoundOutcome>>,
}

impl RoundOutcomes {
    pub fn new(rounds: usize) -> Self {
        Self {
            slots: vec![None; rounds],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, round: usize) -> Option<RoundOutcome> {
        self.slots.get(round).copied().flatten()
    }

    /// Write the outcome of `round` unless one is already there
    ///
    /// Returns `false` when the slot was already written or does not exist;
    /// the first recorded value is final.
    pub fn record(&mut self, round: usize, outcome: RoundOutcome) -> bool {
        match self.slots.get_mut(round) {
            Some(slot @ None) => {
                *slot = Some(outcome);
                true
            }
            _ => false,
        }
    }

    /// Every round has an outcome
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn correct_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Some(RoundOutcome::Correct)))
            .count()
    }

    /// All outcomes in round order, if every round has one
    pub fn to_vec(&self) -> Option<Vec<RoundOutcome>> {
        self.slots.iter().copied().collect()
    }
}
