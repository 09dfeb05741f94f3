//! Core types for BrandPulse: vocabulary encoding, decision rules, configuration.

pub mod config;
pub mod decision;
pub mod encoder;
mod error;

pub use config::{InputType, ModelConfig};
pub use decision::{Decision, RoutingAction, Sentiment, decide};
pub use encoder::{EncodedSequence, SEQUENCE_LEN, VOCAB_SIZE, Vocabulary, is_blank, is_separator, tokenize};
pub use error::VocabularyError;
