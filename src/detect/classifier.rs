//! Classifier boundary: the trained model is an opaque external artifact
//! exposed only through this fixed tensor-in, scores-out contract.

use crate::analysis::{FEATURE_LEN, FeatureTensor};
use crate::error::InferenceError;

/// Raw two-class output of the classifier, before softmax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScores {
    pub real: f32,
    pub fake: f32,
}

/// A binary real/fake audio classifier.
///
/// Input contract: a feature tensor of logical shape (1, 1, 128, 128) —
/// 16 384 f32 values flattened time-major. Output contract: one raw score per
/// class. Implementations must be safe for concurrent read-only inference or
/// serialize calls internally.
pub trait Classifier: Send + Sync {
    /// Version label reported in [`crate::detect::DetectionResult`] details.
    fn model_version(&self) -> &str;

    /// Map the feature tensor to raw class scores.
    fn classify(&self, features: &FeatureTensor) -> Result<ClassScores, InferenceError>;
}

/// Validate the tensor against the input contract before handing it to a
/// classifier implementation.
pub(crate) fn check_input(features: &FeatureTensor) -> Result<(), InferenceError> {
    if features.len() != FEATURE_LEN {
        return Err(InferenceError::WrongInputLength {
            expected: FEATURE_LEN,
            got: features.len(),
        });
    }
    Ok(())
}

/// Validate raw scores coming back from a classifier.
pub(crate) fn check_scores(scores: ClassScores) -> Result<ClassScores, InferenceError> {
    if !scores.real.is_finite() || !scores.fake.is_finite() {
        return Err(InferenceError::NonFiniteScores {
            real: scores.real,
            fake: scores.fake,
        });
    }
    Ok(scores)
}
