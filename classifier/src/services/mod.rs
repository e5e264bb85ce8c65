//! Classifier service implementations

pub mod http_recognizer;

pub use http_recognizer::*;
