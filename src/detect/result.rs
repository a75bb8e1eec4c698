//! Result interpretation: softmax, labels and the serialized record.

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::classifier::ClassScores;

/// Probability above which a clip is labeled FAKE (strictly greater-than).
const FAKE_THRESHOLD: f32 = 0.5;
/// Probability above which a clip is additionally flagged suspicious
/// (strictly greater-than).
const SUSPICIOUS_THRESHOLD: f32 = 0.7;

/// Predicted label for a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Prediction {
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "FAKE")]
    Fake,
}

impl std::fmt::Display for Prediction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prediction::Real => f.write_str("REAL"),
            Prediction::Fake => f.write_str("FAKE"),
        }
    }
}

/// Softened class probabilities; `real + fake` sums to 1 within tolerance.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Probabilities {
    pub real: f32,
    pub fake: f32,
}

/// Request metadata echoed back with the verdict.
#[derive(Debug, Clone, Serialize)]
pub struct Details {
    pub file_name: String,
    pub file_size: u64,
    pub processing_time_ms: u64,
    pub model_version: String,
}

/// Immutable verdict for one analyzed clip.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    pub prediction: Prediction,
    pub confidence: f32,
    pub probabilities: Probabilities,
    pub is_suspicious: bool,
    pub details: Details,
    /// RFC 3339 creation time.
    pub timestamp: String,
}

impl DetectionResult {
    /// Serialize to the JSON wire shape.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Pure interpretation of raw scores: softmax, label, confidence, flag.
///
/// Ties at exactly 0.5 resolve to REAL and exactly 0.7 is not suspicious;
/// both thresholds are strict on the fake side.
pub(crate) fn interpret_scores(scores: ClassScores) -> (Prediction, f32, Probabilities, bool) {
    let probabilities = softmax_pair(scores.real, scores.fake);
    let prediction = if probabilities.fake > FAKE_THRESHOLD {
        Prediction::Fake
    } else {
        Prediction::Real
    };
    let confidence = probabilities.real.max(probabilities.fake);
    let is_suspicious = probabilities.fake > SUSPICIOUS_THRESHOLD;
    (prediction, confidence, probabilities, is_suspicious)
}

/// Two-way softmax, shifted by the max score so large magnitudes cannot
/// overflow the exponentials.
fn softmax_pair(real: f32, fake: f32) -> Probabilities {
    let shift = real.max(fake);
    let exp_real = (real - shift).exp();
    let exp_fake = (fake - shift).exp();
    let sum = exp_real + exp_fake;
    Probabilities {
        real: exp_real / sum,
        fake: exp_fake / sum,
    }
}

pub(crate) fn rfc3339_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
