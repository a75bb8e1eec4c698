//! Error taxonomy for the detection pipeline.
//!
//! Validation errors are rejected before any audio enters the pipeline; the
//! remaining kinds map one-to-one onto pipeline stages so callers can tell
//! "your file is bad" apart from "the detector is broken". No stage returns a
//! partial result: the first error halts the request.

use thiserror::Error;

/// Rejections applied to the raw upload before decoding starts.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The uploaded buffer contained no bytes.
    #[error("uploaded file is empty")]
    EmptyUpload,
    /// The uploaded buffer exceeds the accepted size cap.
    #[error("uploaded file is {got} bytes; the limit is {limit} bytes")]
    UploadTooLarge { got: usize, limit: usize },
    /// The declared media type is not an accepted audio/video format.
    #[error("unsupported media type '{media_type}'; expected an audio or audio-bearing video format")]
    UnsupportedMediaType { media_type: String },
}

/// Failures while decoding the byte stream into PCM samples.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The container format could not be probed or parsed.
    #[error("unsupported or malformed media container: {message}")]
    Probe { message: String },
    /// The container holds no decodable audio track.
    #[error("no decodable audio track found")]
    NoAudioTrack,
    /// No decoder is available for the audio codec.
    #[error("failed to create decoder for audio track: {message}")]
    CreateDecoder { message: String },
    /// The decoder failed irrecoverably mid-stream.
    #[error("audio decode failed: {message}")]
    Decode { message: String },
    /// The track does not declare a sample rate.
    #[error("audio track is missing a sample rate")]
    MissingSampleRate,
    /// The track declares zero audio channels.
    #[error("audio track is missing a channel count")]
    MissingChannels,
    /// Decoding finished without producing a single sample.
    #[error("decoded audio was empty")]
    EmptyAudio,
}

/// Failures while converting PCM to the analysis sample rate.
#[derive(Debug, Error)]
pub enum ResampleError {
    /// The resampler was asked to produce a non-positive rate.
    #[error("invalid target sample rate {rate}")]
    InvalidRate { rate: u32 },
    /// The input signal contained no samples.
    #[error("cannot resample an empty signal")]
    EmptyInput,
    /// The resampler could not be constructed for this rate pair.
    #[error("failed to construct resampler ({input_rate} -> {output_rate} Hz): {message}")]
    Construct {
        input_rate: u32,
        output_rate: u32,
        message: String,
    },
    /// The resampler failed while processing the clip.
    #[error("resampling failed: {message}")]
    Process { message: String },
}

/// Invalid pipeline configuration. With the fixed analysis constants this
/// indicates a programming defect, not a bad input.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Frame length must cover at least two samples.
    #[error("invalid frame length {frame_len}; must be > 1")]
    InvalidFrameLength { frame_len: usize },
    /// Hop length must be positive.
    #[error("invalid hop length {hop}; must be > 0")]
    InvalidHop { hop: usize },
}

/// Failures at the classifier boundary.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The classifier handle could not be loaded or reached.
    #[error("classifier unavailable: {message}")]
    Unavailable { message: String },
    /// The feature tensor does not match the classifier input contract.
    #[error("feature tensor has wrong length: expected {expected}, got {got}")]
    WrongInputLength { expected: usize, got: usize },
    /// The classifier returned an output that violates its contract.
    #[error("classifier output malformed: {message}")]
    MalformedOutput { message: String },
    /// The classifier returned NaN or infinite raw scores.
    #[error("classifier returned non-finite scores ({real}, {fake})")]
    NonFiniteScores { real: f32, fake: f32 },
    /// The classifier backend failed at runtime.
    #[error("classifier runtime failure: {message}")]
    Backend { message: String },
}

/// Top-level error returned by [`crate::detect::Detector::analyze`].
#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Resample(#[from] ResampleError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}
