//! Game tunables, fixed for the lifetime of a session

use std::time::Duration;

use shared::{SharedError, SharedResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Rounds per session, one category each
    pub rounds: usize,
    /// Time budget of a single round
    pub round_duration: Duration,
    /// Countdown granularity
    pub tick: Duration,
}

impl GameConfig {
    pub const DEFAULT_ROUNDS: usize = 6;
    pub const DEFAULT_ROUND_DURATION: Duration = Duration::from_secs(30);
    pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

    pub fn new(rounds: usize, round_duration: Duration) -> SharedResult<Self> {
        let config = Self {
            rounds,
            round_duration,
            tick: Self::DEFAULT_TICK,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.rounds == 0 {
            return Err(SharedError::config("rounds", self.rounds));
        }
        if self.tick.is_zero() {
            return Err(SharedError::config("tick", format!("{:?}", self.tick)));
        }
        if self.round_duration.is_zero() || self.round_duration.as_nanos() % self.tick.as_nanos() != 0 {
            return Err(SharedError::config(
                "round_duration",
                format!("{:?} (must be a whole number of {:?} ticks)", self.round_duration, self.tick),
            ));
        }
        Ok(())
    }

    /// Countdown ticks in one round
    pub fn ticks_per_round(&self) -> u64 {
        (self.round_duration.as_nanos() / self.tick.as_nanos()) as u64
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            round_duration: Self::DEFAULT_ROUND_DURATION,
            tick: Self::DEFAULT_TICK,
        }
    }
}
