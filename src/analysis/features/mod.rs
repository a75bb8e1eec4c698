//! Mel-spectrogram feature extraction for the classifier.
//!
//! Pipeline: Hann-windowed STFT magnitudes -> mel projection -> power-to-dB
//! relative to the clip maximum -> nearest-frame resize to a fixed
//! 128x128 tensor. The dB scale is self-referential per clip; the classifier
//! was trained on spectrograms normalized this way, so every step here is a
//! numeric contract, not a tuning choice.

mod logmel;
mod melbank;
mod shape;
mod stft;

use tracing::debug;

use super::{FEATURE_LEN, MEL_BANDS, STFT_HOP, STFT_N_FFT, TARGET_FRAMES};
use crate::error::ConfigError;
use melbank::analysis_mel_bank;
use shape::shape_to_tensor;
use stft::magnitude_frames;

/// Fixed-shape feature tensor consumed by the classifier.
///
/// Logical shape (batch 1, channel 1, 128 time steps, 128 mel bins), flattened
/// time-major: element `t * 128 + m` holds time step `t`, mel bin `m`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTensor(Vec<f32>);

impl FeatureTensor {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

/// Extract the classifier feature tensor from a fixed-duration analysis
/// window (mono PCM at the analysis rate).
pub fn extract_features(window: &[f32]) -> Result<FeatureTensor, ConfigError> {
    let magnitudes = magnitude_frames(window, STFT_N_FFT, STFT_HOP)?;
    let bank = analysis_mel_bank();
    let mut mel_frames: Vec<Vec<f32>> = magnitudes
        .iter()
        .map(|frame| bank.project(frame))
        .collect();
    logmel::power_to_db_in_place(&mut mel_frames);
    let tensor = shape_to_tensor(&mel_frames, MEL_BANDS, TARGET_FRAMES);
    debug_assert_eq!(tensor.len(), FEATURE_LEN);
    debug!(
        frames = mel_frames.len(),
        tensor_len = tensor.len(),
        "extracted log-mel feature tensor"
    );
    Ok(FeatureTensor(tensor))
}
