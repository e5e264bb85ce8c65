//! Common test utilities and infrastructure
//!
//! Scripted stand-ins for the player and the classifier, plus a builder that
//! wires them into a ready-to-run orchestrator.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{Answer, PlayerBehavior, ScriptedClassifier, ScriptedPlayer, SessionBuilder, TestHelpers};
