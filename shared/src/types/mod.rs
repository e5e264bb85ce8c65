//! Core types used throughout the game

mod category;
mod prediction;
mod session;

pub use category::{Category, CategoryCatalog};
pub use prediction::{Prediction, PredictionList, TOP_K};
pub use session::{FeedbackTier, RoundOutcome, SessionId, SessionSummary};
