//! Deepfake voice detection core.
//!
//! Turns an uploaded audio (or audio-bearing video) byte buffer into a fixed
//! 128x128 log-mel feature tensor and interprets the scores of an external
//! binary classifier into a [`detect::DetectionResult`].

/// Decoding, resampling and feature extraction.
pub mod analysis;
/// Classifier adapter and result interpretation.
pub mod detect;
/// Error taxonomy shared across the pipeline.
pub mod error;
/// Tracing subscriber setup.
pub mod logging;
