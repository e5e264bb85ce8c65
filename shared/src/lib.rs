//! Shared types for the drawing-guessing game
//!
//! Contains the data model every component agrees on: categories, predictions,
//! round outcomes and session summaries, plus the common tracing setup.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
