//! Classifier adapter: the seam between encoded sequences and a scoring model.
//!
//! A [`SentimentModel`] takes one [`EncodedSequence`] and returns P(positive).
//! Loading is a one-time, fatal-on-failure step; see [`locate_artifact`] and
//! [`load_vocabulary`].

use std::path::{Path, PathBuf};

use brandpulse_core::{EncodedSequence, Vocabulary};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The model artifact (or the vocabulary it was trained with) could not be loaded.
    #[error("model unavailable at {path}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    /// The model produced something that is not a probability.
    #[error("model returned a non-finite score: {0}")]
    InvalidScore(f32),

    #[error("model produced no output")]
    EmptyOutput,

    #[cfg(feature = "onnx")]
    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),
}

impl ClassifierError {
    pub fn model_unavailable(path: &Path, reason: impl ToString) -> Self {
        Self::ModelUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// A loaded sentiment model.
///
/// Implementations are deterministic: the same sequence always yields the
/// same score. `&mut self` follows ONNX Runtime's session API; the model's
/// weights are never changed by a prediction.
pub trait SentimentModel {
    /// Score a single sequence. Returns a value in [0, 1].
    fn predict(&mut self, sequence: &EncodedSequence) -> Result<f32, ClassifierError>;
}

impl<M: SentimentModel + ?Sized> SentimentModel for Box<M> {
    fn predict(&mut self, sequence: &EncodedSequence) -> Result<f32, ClassifierError> {
        (**self).predict(sequence)
    }
}

/// Check that a model artifact exists and is a readable file.
pub fn locate_artifact(path: &Path) -> Result<&Path, ClassifierError> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(ClassifierError::model_unavailable(path, "not a file")),
        Err(e) => {
            error!(path = %path.display(), error = %e, "model artifact missing");
            Err(ClassifierError::model_unavailable(path, e))
        }
    }
}

/// Load the word index the model was trained against.
///
/// A missing or malformed vocabulary is as fatal as a missing model, so it
/// surfaces as [`ClassifierError::ModelUnavailable`].
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary, ClassifierError> {
    Vocabulary::from_json_file(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "vocabulary unavailable");
        ClassifierError::model_unavailable(path, e)
    })
}

/// Validate a raw model output and clamp it into [0, 1].
pub fn checked_score(raw: f32) -> Result<f32, ClassifierError> {
    if !raw.is_finite() {
        return Err(ClassifierError::InvalidScore(raw));
    }
    Ok(raw.clamp(0.0, 1.0))
}
