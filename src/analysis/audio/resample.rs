//! Sample-rate conversion to the fixed analysis rate.
//!
//! Uses rubato's FFT resampler, which band-limits the signal below the output
//! Nyquist; downsampling therefore does not alias the way naive decimation
//! would.

use audioadapter_buffers::direct::InterleavedSlice;
use rubato::{Fft, FixedSync, Resampler};
use tracing::debug;

use crate::error::ResampleError;

const CHUNK_SIZE: usize = 1024;
const SUB_CHUNKS: usize = 1;

/// Resample a mono signal from `input_rate` to `output_rate`.
///
/// Identity pass (no artifacts introduced) when the rates already match.
pub fn resample(mono: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>, ResampleError> {
    if output_rate == 0 {
        return Err(ResampleError::InvalidRate { rate: output_rate });
    }
    if mono.is_empty() {
        return Err(ResampleError::EmptyInput);
    }
    if input_rate == output_rate {
        return Ok(mono.to_vec());
    }

    let mut resampler = Fft::<f32>::new(
        input_rate.max(1) as usize,
        output_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        1,
        FixedSync::Input,
    )
    .map_err(|err| ResampleError::Construct {
        input_rate,
        output_rate,
        message: err.to_string(),
    })?;

    let input_frames = mono.len();
    let out_frames = resampler.process_all_needed_output_len(input_frames);
    let mut out = vec![0.0_f32; out_frames];

    let input_adapter =
        InterleavedSlice::new(mono, 1, input_frames).map_err(|err| ResampleError::Process {
            message: err.to_string(),
        })?;
    let mut output_adapter =
        InterleavedSlice::new_mut(&mut out, 1, out_frames).map_err(|err| ResampleError::Process {
            message: err.to_string(),
        })?;

    let (_frames_read, frames_written) = resampler
        .process_all_into_buffer(&input_adapter, &mut output_adapter, input_frames, None)
        .map_err(|err| ResampleError::Process {
            message: err.to_string(),
        })?;
    out.truncate(frames_written);
    debug!(
        input_rate,
        output_rate,
        input_frames,
        output_frames = out.len(),
        "resampled clip"
    );
    Ok(out)
}
