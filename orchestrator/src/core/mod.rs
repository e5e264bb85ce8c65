//! Core round logic
//!
//! Pure state handling with no I/O: the session state machine, the
//! write-once outcome slots and the end-of-session scoring.

pub mod outcomes;
pub mod session;
pub mod summary;

pub use outcomes::RoundOutcomes;
pub use session::{RoundTransition, Session, SessionPhase};
pub use summary::{round_feedback, summarize};
