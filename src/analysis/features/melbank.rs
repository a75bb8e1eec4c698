//! Triangular mel filterbank.
//!
//! Pure function of (sample rate, FFT length, band count); the analysis bank
//! is built once and shared read-only across requests.

use std::sync::OnceLock;

use crate::analysis::{ANALYSIS_SAMPLE_RATE, MEL_BANDS, STFT_N_FFT};

/// Energy floor applied to projected mel values before log conversion.
pub(crate) const MEL_EPS: f32 = 1e-10;

/// Sparse triangular filters over FFT bins: one `(bin, weight)` list per band.
pub(crate) struct MelBank {
    filters: Vec<Vec<(usize, f32)>>,
}

static ANALYSIS_MEL_BANK: OnceLock<MelBank> = OnceLock::new();

/// The process-wide bank for the fixed analysis constants.
pub(crate) fn analysis_mel_bank() -> &'static MelBank {
    ANALYSIS_MEL_BANK.get_or_init(|| MelBank::new(ANALYSIS_SAMPLE_RATE, STFT_N_FFT, MEL_BANDS))
}

impl MelBank {
    pub(crate) fn new(sample_rate: u32, n_fft: usize, bands: usize) -> Self {
        let bins = band_edge_bins(sample_rate, n_fft, bands);
        let mut filters = Vec::with_capacity(bands);
        for band in 0..bands {
            filters.push(triangle(bins[band], bins[band + 1], bins[band + 2]));
        }
        Self { filters }
    }

    pub(crate) fn bands(&self) -> usize {
        self.filters.len()
    }

    /// Project a magnitude spectrum onto the mel bands, flooring each energy
    /// at [`MEL_EPS`] so the later log stays finite.
    pub(crate) fn project(&self, magnitude: &[f32]) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.filters.len());
        for filter in &self.filters {
            let mut sum = 0.0_f64;
            for &(bin, weight) in filter {
                sum += magnitude.get(bin).copied().unwrap_or(0.0) as f64 * weight as f64;
            }
            out.push((sum as f32).max(MEL_EPS));
        }
        out
    }
}

/// FFT bin indices of the `bands + 2` mel-equally-spaced band edges between
/// 0 Hz and Nyquist.
fn band_edge_bins(sample_rate: u32, n_fft: usize, bands: usize) -> Vec<usize> {
    let sr = sample_rate.max(1) as f32;
    let mel_min = hz_to_mel(0.0);
    let mel_max = hz_to_mel(sr * 0.5);
    (0..=bands + 1)
        .map(|i| {
            let mel = mel_min + (mel_max - mel_min) * i as f32 / (bands + 1) as f32;
            hz_to_bin(mel_to_hz(mel), sample_rate, n_fft)
        })
        .collect()
}

fn triangle(left: usize, center: usize, right: usize) -> Vec<(usize, f32)> {
    let mut weights = Vec::new();
    for bin in left..center {
        let w = (bin - left) as f32 / (center - left) as f32;
        if w > 0.0 {
            weights.push((bin, w));
        }
    }
    for bin in center..right {
        let w = (right - bin) as f32 / (right - center) as f32;
        if w > 0.0 {
            weights.push((bin, w));
        }
    }
    weights
}

fn hz_to_bin(hz: f32, sample_rate: u32, n_fft: usize) -> usize {
    (((n_fft + 1) as f32 * hz / sample_rate.max(1) as f32).floor() as usize).min(n_fft / 2)
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0_f32 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0_f32 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}
