//! Encode → predict → decide, as one request/response call.

use brandpulse_core::{Decision, Vocabulary, decide, is_blank, tokenize};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::classifier::{ClassifierError, SentimentModel};

#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Blank or whitespace-only submission. Recoverable; the user may resubmit.
    #[error("no text to analyze")]
    EmptyInput,

    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Result of analyzing one piece of feedback.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Raw model score, P(positive).
    pub score: f32,
    #[serde(flatten)]
    pub decision: Decision,
    /// Words found in the input before padding/truncation.
    pub word_count: usize,
    pub analyzed_at: DateTime<Utc>,
}

impl Analysis {
    pub fn confidence_percent(&self) -> String {
        self.decision.confidence_percent()
    }
}

/// Owns the vocabulary and the loaded model for the lifetime of the process.
pub struct SentimentPipeline<M> {
    vocabulary: Vocabulary,
    model: M,
}

impl<M: SentimentModel> SentimentPipeline<M> {
    pub fn new(vocabulary: Vocabulary, model: M) -> Self {
        Self { vocabulary, model }
    }

    /// Analyze a single submission.
    ///
    /// Blank input is rejected with [`AnalyzeError::EmptyInput`] before
    /// anything reaches the model. Text that merely strips down to nothing
    /// (e.g. `"!!!"`) is still scored, as an all-padding sequence.
    pub fn analyze(&mut self, text: &str) -> Result<Analysis, AnalyzeError> {
        if is_blank(text) {
            return Err(AnalyzeError::EmptyInput);
        }

        let sequence = self.vocabulary.encode(text);
        let score = self.model.predict(&sequence)?;
        let decision = decide(score);
        debug!(score, sentiment = %decision.sentiment, "analyzed submission");

        Ok(Analysis {
            score,
            decision,
            word_count: tokenize(text).len(),
            analyzed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandpulse_core::{EncodedSequence, RoutingAction, Sentiment};

    /// Returns a fixed score and records every sequence it sees.
    struct FixedScore {
        score: f32,
        seen: Vec<EncodedSequence>,
    }

    impl FixedScore {
        fn new(score: f32) -> Self {
            Self {
                score,
                seen: Vec::new(),
            }
        }
    }

    impl SentimentModel for FixedScore {
        fn predict(&mut self, sequence: &EncodedSequence) -> Result<f32, ClassifierError> {
            self.seen.push(sequence.clone());
            Ok(self.score)
        }
    }

    struct Broken;

    impl SentimentModel for Broken {
        fn predict(&mut self, _: &EncodedSequence) -> Result<f32, ClassifierError> {
            Err(ClassifierError::InvalidScore(f32::NAN))
        }
    }

    fn vocab() -> Vocabulary {
        [("i", 10), ("loved", 420), ("this", 11), ("product", 1800), ("money", 280)]
            .into_iter()
            .collect()
    }

    #[test]
    fn positive_review_routes_to_marketing() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.82));
        let analysis = pipeline.analyze("I absolutely loved this product").unwrap();

        assert_eq!(analysis.decision.sentiment, Sentiment::Positive);
        assert_eq!(analysis.confidence_percent(), "82.0%");
        assert_eq!(analysis.decision.action, RoutingAction::MarketingTestimonial);
        assert_eq!(analysis.word_count, 5);
    }

    #[test]
    fn negative_review_routes_to_customer_success() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.12));
        let analysis = pipeline.analyze("terrible awful waste of money").unwrap();

        assert_eq!(analysis.decision.sentiment, Sentiment::Negative);
        assert_eq!(analysis.confidence_percent(), "88.0%");
        assert_eq!(
            analysis.decision.action,
            RoutingAction::CustomerSuccessEscalation
        );
    }

    #[test]
    fn blank_input_never_reaches_model() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.9));
        for text in ["", "   ", "\n\t  \n", "\u{1f}", "\u{1c}\u{1d} \u{1e}"] {
            assert!(matches!(
                pipeline.analyze(text),
                Err(AnalyzeError::EmptyInput)
            ));
        }
        assert!(pipeline.model.seen.is_empty());
    }

    #[test]
    fn punctuation_only_is_scored_as_padding() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.5));
        let analysis = pipeline.analyze("!!!").unwrap();
        assert_eq!(analysis.word_count, 0);
        assert!(pipeline.model.seen[0].iter().all(|i| i == 0));
    }

    #[test]
    fn model_sees_encoded_sequence() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.7));
        pipeline.analyze("I loved this product!").unwrap();

        let seq = pipeline.model.seen[0].as_slice();
        assert_eq!(seq.len(), 200);
        assert_eq!(&seq[196..], &[13, 423, 14, 1803]);
    }

    #[test]
    fn repeated_analysis_reuses_model() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.7));
        let a = pipeline.analyze("loved it").unwrap();
        let b = pipeline.analyze("loved it").unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(pipeline.model.seen.len(), 2);
        assert_eq!(pipeline.model.seen[0], pipeline.model.seen[1]);
    }

    #[test]
    fn model_errors_propagate() {
        let mut pipeline = SentimentPipeline::new(vocab(), Broken);
        assert!(matches!(
            pipeline.analyze("hello"),
            Err(AnalyzeError::Classifier(ClassifierError::InvalidScore(_)))
        ));
    }

    #[test]
    fn analysis_serializes_flat() {
        let mut pipeline = SentimentPipeline::new(vocab(), FixedScore::new(0.82));
        let analysis = pipeline.analyze("loved this product").unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["sentiment"], "POSITIVE");
        assert_eq!(json["action"], "marketing_testimonial");
        assert_eq!(json["word_count"], 3);
        assert!(json["analyzed_at"].is_string());
    }
}
