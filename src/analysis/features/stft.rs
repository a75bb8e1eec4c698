//! Framing, windowing and magnitude spectra.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex};

use crate::error::ConfigError;

/// Symmetric Hann window: `0.5 * (1 - cos(2*pi*i / (len - 1)))`.
pub(crate) fn hann_window(len: usize) -> Vec<f32> {
    if len <= 1 {
        return vec![1.0_f32; len.max(1)];
    }
    let denom = (len - 1) as f32;
    (0..len)
        .map(|i| 0.5_f32 * (1.0 - (2.0 * PI * i as f32 / denom).cos()))
        .collect()
}

/// Compute magnitude spectra (bins 0..=n_fft/2) for every hop-aligned frame.
///
/// Frame count is `floor((len - n_fft) / hop) + 1`, with lengths below one
/// frame yielding a single zero-padded frame; a trailing partial frame is
/// zero-padded, never dropped. An empty input yields no frames.
pub(crate) fn magnitude_frames(
    samples: &[f32],
    n_fft: usize,
    hop: usize,
) -> Result<Vec<Vec<f32>>, ConfigError> {
    if n_fft <= 1 {
        return Err(ConfigError::InvalidFrameLength { frame_len: n_fft });
    }
    if hop == 0 {
        return Err(ConfigError::InvalidHop { hop });
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let frame_count = samples.len().saturating_sub(n_fft) / hop + 1;
    let bins = n_fft / 2 + 1;
    let window = hann_window(n_fft);
    let fft = FftPlanner::<f32>::new().plan_fft_forward(n_fft);
    let mut buf = vec![Complex::new(0.0_f32, 0.0); n_fft];

    let mut frames = Vec::with_capacity(frame_count);
    for idx in 0..frame_count {
        let start = idx * hop;
        fill_windowed(&mut buf, samples, start, &window);
        run_fft(&fft, &mut buf);
        frames.push(magnitude_spectrum(&buf, bins));
    }
    Ok(frames)
}

fn fill_windowed(buf: &mut [Complex<f32>], samples: &[f32], start: usize, window: &[f32]) {
    for (i, cell) in buf.iter_mut().enumerate() {
        let sample = samples.get(start + i).copied().unwrap_or(0.0);
        let win = window.get(i).copied().unwrap_or(1.0);
        *cell = Complex::new(sample * win, 0.0);
    }
}

fn run_fft(fft: &Arc<dyn Fft<f32>>, buf: &mut [Complex<f32>]) {
    fft.process(buf);
}

fn magnitude_spectrum(fft_out: &[Complex<f32>], bins: usize) -> Vec<f32> {
    fft_out[..bins]
        .iter()
        .map(|c| (c.re * c.re + c.im * c.im).sqrt())
        .collect()
}
