//! Sentiment inference layer: classifier adapter, ONNX Runtime backend, analysis pipeline.

mod classifier;
mod pipeline;

pub use classifier::{
    ClassifierError, SentimentModel, checked_score, load_vocabulary, locate_artifact,
};
pub use pipeline::{Analysis, AnalyzeError, SentimentPipeline};

#[cfg(feature = "onnx")]
mod onnx;
#[cfg(feature = "onnx")]
pub use onnx::OnnxSentimentModel;

/// Load the vocabulary and model described by `config`.
///
/// Called once at startup. Any failure is fatal and reported as
/// [`ClassifierError::ModelUnavailable`].
#[cfg(feature = "onnx")]
pub fn load_pipeline(
    config: &brandpulse_core::ModelConfig,
) -> Result<SentimentPipeline<OnnxSentimentModel>, ClassifierError> {
    let model = OnnxSentimentModel::load(&config.model_path, config.input_type)?;
    let vocabulary = load_vocabulary(&config.vocab_path)?;
    Ok(SentimentPipeline::new(vocabulary, model))
}
