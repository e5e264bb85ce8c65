//! Classification pipeline for submitted drawings
//!
//! Validates untrusted image envelopes, normalizes them for the recognizer,
//! forwards them over RPC and turns the raw scores into a ranked, named
//! prediction list. Originals are archived in the background.

pub mod archive;
pub mod envelope;
pub mod error;
pub mod imageops;
pub mod pipeline;
pub mod ranking;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use archive::ImageArchive;
pub use envelope::{validate, ImageLimits, ValidatedImage};
pub use error::{ArchiveError, ClassifyError, ClassifyResult};
pub use pipeline::ClassificationPipeline;
pub use ranking::{rank, RawScores};
pub use services::HttpRecognizer;
pub use traits::{ClassificationRequest, Classifier, Recognizer};
