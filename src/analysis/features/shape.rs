//! Nearest-frame temporal resize into the fixed classifier tensor.

use crate::analysis::DB_FLOOR;

/// Resize a log-mel spectrogram of `frames.len()` time steps to exactly
/// `target_frames`, flattened time-major (`t * mel_bands + m`).
///
/// Nearest-neighbor selection, not interpolation: target step `t` reads
/// source frame `min(floor(t * T / L), T - 1)`. Any deficit (including an
/// empty source) is filled with the dB floor, i.e. silence.
pub(crate) fn shape_to_tensor(
    frames: &[Vec<f32>],
    mel_bands: usize,
    target_frames: usize,
) -> Vec<f32> {
    let mut out = vec![DB_FLOOR; mel_bands * target_frames];
    let source_len = frames.len();
    if source_len == 0 {
        return out;
    }
    for target in 0..target_frames {
        let source = (target * source_len / target_frames).min(source_len - 1);
        let row = &frames[source];
        let base = target * mel_bands;
        for mel in 0..mel_bands {
            out[base + mel] = row.get(mel).copied().unwrap_or(DB_FLOOR);
        }
    }
    out
}
