//! Detection service: upload validation, the full analysis pipeline and
//! classifier inference behind one call.

mod classifier;
mod result;

pub use classifier::{ClassScores, Classifier};
pub use result::{DetectionResult, Details, Prediction, Probabilities};

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::analysis::{ANALYSIS_SAMPLE_RATE, ANALYSIS_SECONDS, audio, features};
use crate::error::{DetectError, ValidationError};

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const SUPPORTED_MEDIA_TYPES: &[&str] = &[
    "audio/wav",
    "audio/x-wav",
    "audio/wave",
    "audio/mpeg",
    "audio/mp3",
    "audio/mp4",
    "audio/m4a",
    "audio/x-m4a",
    "audio/ogg",
    "audio/flac",
    "audio/x-flac",
    "audio/webm",
    "application/ogg",
    "video/mp4",
    "video/webm",
];

/// Metadata the caller knows about an upload.
#[derive(Debug, Clone)]
pub struct ClipInfo {
    /// Original file name, echoed into the result details.
    pub file_name: String,
    /// Declared media type, if any. Checked against the supported list and
    /// passed to the decoder as a probe hint.
    pub media_type: Option<String>,
}

/// Analysis service owning a handle to the loaded classifier.
///
/// Explicitly constructed and injected; the classifier handle is shared
/// read-only, so one detector may serve concurrent requests.
pub struct Detector {
    classifier: Arc<dyn Classifier>,
}

impl Detector {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Run the full pipeline on an uploaded clip.
    ///
    /// Returns either a complete verdict or the first stage error; inference
    /// failures are never papered over with a fabricated result.
    pub fn analyze(&self, bytes: &[u8], info: &ClipInfo) -> Result<DetectionResult, DetectError> {
        let started = Instant::now();
        validate_upload(bytes, info)?;
        let file_size = bytes.len() as u64;

        let decoded = audio::decode_bytes(bytes.to_vec(), info.media_type.as_deref())?;
        let mut window = audio::resample(&decoded.mono, decoded.sample_rate, ANALYSIS_SAMPLE_RATE)?;
        audio::fit_to_duration(&mut window, ANALYSIS_SAMPLE_RATE, ANALYSIS_SECONDS);
        let tensor = features::extract_features(&window)?;

        classifier::check_input(&tensor)?;
        let inference_started = Instant::now();
        let scores = classifier::check_scores(self.classifier.classify(&tensor)?)?;
        debug!(
            real = scores.real,
            fake = scores.fake,
            inference_ms = inference_started.elapsed().as_millis() as u64,
            "classifier returned raw scores"
        );

        let (prediction, confidence, probabilities, is_suspicious) =
            result::interpret_scores(scores);
        let verdict = DetectionResult {
            prediction,
            confidence,
            probabilities,
            is_suspicious,
            details: Details {
                file_name: info.file_name.clone(),
                file_size,
                processing_time_ms: started.elapsed().as_millis() as u64,
                model_version: self.classifier.model_version().to_string(),
            },
            timestamp: result::rfc3339_now(),
        };
        info!(
            file = %verdict.details.file_name,
            prediction = %verdict.prediction,
            confidence = verdict.confidence,
            suspicious = verdict.is_suspicious,
            elapsed_ms = verdict.details.processing_time_ms,
            "analysis complete"
        );
        Ok(verdict)
    }
}

fn validate_upload(bytes: &[u8], info: &ClipInfo) -> Result<(), ValidationError> {
    if bytes.is_empty() {
        return Err(ValidationError::EmptyUpload);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::UploadTooLarge {
            got: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }
    if let Some(media_type) = info.media_type.as_deref() {
        if !is_supported_media_type(media_type) {
            return Err(ValidationError::UnsupportedMediaType {
                media_type: media_type.to_string(),
            });
        }
    }
    Ok(())
}

fn is_supported_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or(media_type)
        .trim()
        .to_ascii_lowercase();
    SUPPORTED_MEDIA_TYPES.contains(&essence.as_str())
}
