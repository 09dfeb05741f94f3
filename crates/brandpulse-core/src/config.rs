//! Shared configuration for locating the model artifact and its vocabulary.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default location of the exported classifier.
pub const DEFAULT_MODEL_PATH: &str = "models/sentiment_rnn.onnx";
/// Default location of the Keras IMDB word index.
pub const DEFAULT_VOCAB_PATH: &str = "models/imdb_word_index.json";

/// Element type the exported graph expects for its token-id input.
///
/// Keras embedding inputs are usually exported as `float32`; graphs converted
/// with explicit integer inputs take `int64` or `int32`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    F32,
    I64,
    I32,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f32" | "float32" | "float" => Ok(Self::F32),
            "i64" | "int64" => Ok(Self::I64),
            "i32" | "int32" => Ok(Self::I32),
            other => Err(format!("unknown input type {other:?} (expected f32, i64 or i32)")),
        }
    }
}

/// Where to find the classifier and how to feed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_path: PathBuf,
    pub vocab_path: PathBuf,
    #[serde(default)]
    pub input_type: InputType,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            vocab_path: PathBuf::from(DEFAULT_VOCAB_PATH),
            input_type: InputType::default(),
        }
    }
}
