//! ONNX Runtime backend for the recurrent sentiment classifier.
//!
//! Expects a single-input graph taking `[1, 200]` token ids and producing a
//! `[1, 1]` sigmoid output (the Keras LSTM model exported with tf2onnx).

use std::path::Path;

use brandpulse_core::{EncodedSequence, InputType, SEQUENCE_LEN};
use ort::session::Session;
use ort::value::Tensor;
use tracing::{debug, info};

use crate::classifier::{ClassifierError, SentimentModel, checked_score, locate_artifact};

/// Sentiment classifier running on ONNX Runtime.
///
/// Built once at startup and reused for every prediction.
pub struct OnnxSentimentModel {
    session: Session,
    input_type: InputType,
}

impl OnnxSentimentModel {
    /// Load the exported model.
    ///
    /// Any failure (missing file, unreadable or invalid graph) is reported as
    /// [`ClassifierError::ModelUnavailable`].
    pub fn load(model_path: &Path, input_type: InputType) -> Result<Self, ClassifierError> {
        let model_path = locate_artifact(model_path)?;

        let session =
            open_session(model_path).map_err(|e| ClassifierError::model_unavailable(model_path, e))?;

        info!(
            model = %model_path.display(),
            input_type = %input_type,
            "loaded sentiment model"
        );
        Ok(Self {
            session,
            input_type,
        })
    }
}

impl SentimentModel for OnnxSentimentModel {
    fn predict(&mut self, sequence: &EncodedSequence) -> Result<f32, ClassifierError> {
        let shape = [1i64, SEQUENCE_LEN as i64];

        let outputs = match self.input_type {
            InputType::F32 => {
                let ids: Vec<f32> = sequence.iter().map(|i| i as f32).collect();
                let tensor = Tensor::from_array((shape, ids.into_boxed_slice()))?;
                self.session.run(ort::inputs![tensor])?
            }
            InputType::I64 => {
                let ids: Vec<i64> = sequence.iter().map(i64::from).collect();
                let tensor = Tensor::from_array((shape, ids.into_boxed_slice()))?;
                self.session.run(ort::inputs![tensor])?
            }
            InputType::I32 => {
                // Indices are below VOCAB_SIZE, so the cast is lossless.
                let ids: Vec<i32> = sequence.iter().map(|i| i as i32).collect();
                let tensor = Tensor::from_array((shape, ids.into_boxed_slice()))?;
                self.session.run(ort::inputs![tensor])?
            }
        };

        // Sigmoid output: [1, 1].
        let (_, data) = outputs[0].try_extract_tensor::<f32>()?;
        let raw = data.first().copied().ok_or(ClassifierError::EmptyOutput)?;
        debug!(raw, "model output");

        checked_score(raw)
    }
}

fn open_session(model_path: &Path) -> ort::Result<Session> {
    Session::builder()?.commit_from_file(model_path)
}
