//! Power-to-decibel conversion relative to the clip maximum.

use crate::analysis::DB_FLOOR;

const DB_RATIO_EPS: f32 = 1e-8;

/// Convert projected mel magnitudes to decibels in place.
///
/// Each value is squared into a power proxy, referenced against the global
/// maximum power of the whole spectrogram, and clipped at [`DB_FLOOR`]. The
/// reference is the clip itself, so output is always in `[DB_FLOOR, 0]`.
pub(crate) fn power_to_db_in_place(frames: &mut [Vec<f32>]) {
    let mut max_power = 0.0_f32;
    for frame in frames.iter() {
        for &value in frame {
            max_power = max_power.max(value * value);
        }
    }
    if !max_power.is_finite() || max_power <= 0.0 {
        for frame in frames.iter_mut() {
            frame.fill(DB_FLOOR);
        }
        return;
    }
    for frame in frames.iter_mut() {
        for value in frame.iter_mut() {
            let power = *value * *value;
            let db = 10.0 * (power / max_power).max(DB_RATIO_EPS).log10();
            *value = db.max(DB_FLOOR);
        }
    }
}
