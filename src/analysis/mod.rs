//! Audio analysis pipeline: decode, resample, and mel-spectrogram features.

pub mod audio;
pub mod features;

/// Fixed sample rate used during analysis.
pub const ANALYSIS_SAMPLE_RATE: u32 = 22_050;
/// Fixed clip duration analyzed per request.
pub const ANALYSIS_SECONDS: f32 = 5.0;
/// Exact sample count of the analysis window (`rate * duration`).
pub const ANALYSIS_SAMPLES: usize = 110_250;
/// STFT frame length in samples.
pub const STFT_N_FFT: usize = 2048;
/// STFT hop length in samples.
pub const STFT_HOP: usize = 512;
/// Number of mel bands in the filterbank.
pub const MEL_BANDS: usize = 128;
/// Number of time steps in the shaped feature tensor.
pub const TARGET_FRAMES: usize = 128;
/// Flat length of the feature tensor fed to the classifier.
pub const FEATURE_LEN: usize = MEL_BANDS * TARGET_FRAMES;
/// Decibel floor applied to log-mel values and used as silence padding.
pub const DB_FLOOR: f32 = -80.0;

pub use features::FeatureTensor;
