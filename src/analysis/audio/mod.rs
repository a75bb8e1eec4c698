//! Signal loading and conditioning ahead of feature extraction.

mod decode;
mod resample;

pub use decode::{DecodedAudio, decode_bytes};
pub use resample::resample;

use super::ANALYSIS_SECONDS;

/// Decode is capped a little past the analysis window; the duration fit below
/// keeps only the clip head anyway.
pub(crate) const DECODE_CAP_SECONDS: f32 = ANALYSIS_SECONDS + 1.0;

/// Fit a mono signal to exactly `round(rate * seconds)` samples.
///
/// Longer clips keep their head; shorter clips are zero-padded at the tail.
pub fn fit_to_duration(mono: &mut Vec<f32>, sample_rate: u32, seconds: f32) {
    let target = (sample_rate.max(1) as f64 * seconds as f64).round().max(0.0) as usize;
    if mono.len() > target {
        mono.truncate(target);
    } else {
        mono.resize(target, 0.0);
    }
}

/// Average all channels of an interleaved buffer into mono, sanitizing each
/// sample on the way through.
pub(crate) fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return samples.iter().copied().map(sanitize_sample).collect();
    }
    let frames = samples.len() / channels;
    let mut out = Vec::with_capacity(frames);
    for frame in 0..frames {
        let start = frame * channels;
        let mut sum = 0.0_f32;
        for &sample in &samples[start..start + channels] {
            sum += sanitize_sample(sample);
        }
        out.push(sum / channels as f32);
    }
    out
}

pub(crate) fn sanitize_sample(sample: f32) -> f32 {
    if !sample.is_finite() {
        return 0.0;
    }
    let clamped = sample.clamp(-1.0, 1.0);
    if clamped != 0.0 && clamped.abs() < f32::MIN_POSITIVE {
        0.0
    } else {
        clamped
    }
}
