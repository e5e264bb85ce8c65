//! Round orchestrator for the drawing-guessing game
//!
//! Drives one player's session through a fixed number of rounds. Each round
//! races classification of the player's submissions against a countdown, and
//! the recorded outcomes are folded into a scored summary at the end.

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod traits;

// Re-export commonly used types
pub use config::GameConfig;
pub use core::{round_feedback, summarize, RoundOutcomes, RoundTransition, Session, SessionPhase};
pub use error::{OrchestratorError, OrchestratorResult};
pub use events::{GameEvent, PlayerSignal};
pub use orchestrator::RoundOrchestrator;
pub use traits::{CategoryProvider, DrawingSurface, Presenter};
pub use traits::{MockCategoryProvider, MockDrawingSurface, MockPresenter};
