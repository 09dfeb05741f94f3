//! Sentiment decision rules: score → label, confidence, routing action.
//!
//! A plain midpoint threshold. No hysteresis, no calibration, no
//! configurable cutoff.

use serde::{Deserialize, Serialize};

/// Scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f32 = 0.5;

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Negative => "NEGATIVE",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Managerial routing recommendation, derived from the label alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingAction {
    /// Positive feedback: candidate testimonial for marketing.
    MarketingTestimonial,
    /// Negative feedback: high-priority flag for customer success.
    CustomerSuccessEscalation,
}

impl RoutingAction {
    pub fn for_sentiment(sentiment: Sentiment) -> Self {
        match sentiment {
            Sentiment::Positive => Self::MarketingTestimonial,
            Sentiment::Negative => Self::CustomerSuccessEscalation,
        }
    }

    /// Human-readable instruction shown to the operator.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MarketingTestimonial => {
                "Route to Marketing team for potential use as a website testimonial."
            }
            Self::CustomerSuccessEscalation => {
                "High priority flag. Route immediately to Customer Success team for intervention."
            }
        }
    }
}

/// Outcome of thresholding a single sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub sentiment: Sentiment,
    /// Confidence in the chosen label, in [0.5, 1.0] for in-range scores.
    /// Held as `f64` so `1 - score` carries no extra `f32` rounding.
    pub confidence: f64,
    pub action: RoutingAction,
}

impl Decision {
    /// Confidence as a one-decimal percentage, e.g. `"82.0%"`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

/// Map a score in [0, 1] to a label, confidence and routing action.
///
/// `score >= 0.5` is positive with confidence `score`; anything lower is
/// negative with confidence `1 - score`.
pub fn decide(score: f32) -> Decision {
    let wide = f64::from(score);
    let (sentiment, confidence) = if score >= POSITIVE_THRESHOLD {
        (Sentiment::Positive, wide)
    } else {
        (Sentiment::Negative, 1.0 - wide)
    };

    Decision {
        sentiment,
        confidence,
        action: RoutingAction::for_sentiment(sentiment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_positive() {
        let d = decide(0.5);
        assert_eq!(d.sentiment, Sentiment::Positive);
        assert_eq!(d.confidence_percent(), "50.0%");
    }

    #[test]
    fn above_midpoint_is_positive_with_score_confidence() {
        let d = decide(0.7);
        assert_eq!(d.sentiment, Sentiment::Positive);
        assert_eq!(d.confidence_percent(), "70.0%");
        assert_eq!(d.action, RoutingAction::MarketingTestimonial);
    }

    #[test]
    fn below_midpoint_is_negative_with_complement_confidence() {
        let d = decide(0.3);
        assert_eq!(d.sentiment, Sentiment::Negative);
        assert_eq!(d.confidence_percent(), "70.0%");
        assert_eq!(d.action, RoutingAction::CustomerSuccessEscalation);
    }

    #[test]
    fn extremes() {
        assert_eq!(decide(1.0).confidence_percent(), "100.0%");
        assert_eq!(decide(0.0).sentiment, Sentiment::Negative);
        assert_eq!(decide(0.0).confidence_percent(), "100.0%");
    }

    #[test]
    fn complementary_scores_disagree() {
        for step in 0..=100 {
            let score = step as f32 / 100.0;
            if step == 50 {
                continue;
            }
            let a = decide(score);
            let b = decide(1.0 - score);
            assert_ne!(a.sentiment, b.sentiment, "score {score}");
        }
    }

    #[test]
    fn just_below_threshold_is_negative() {
        let d = decide(0.499_99);
        assert_eq!(d.sentiment, Sentiment::Negative);
        assert_eq!(d.confidence_percent(), "50.0%");
    }

    #[test]
    fn action_depends_only_on_label() {
        assert_eq!(decide(0.51).action, decide(0.99).action);
        assert_eq!(decide(0.01).action, decide(0.49).action);
        assert!(decide(0.9).action.description().contains("Marketing"));
        assert!(decide(0.1).action.description().contains("Customer Success"));
    }

    #[test]
    fn confidence_rounds_to_one_decimal() {
        assert_eq!(decide(0.82).confidence_percent(), "82.0%");
        assert_eq!(decide(0.12).confidence_percent(), "88.0%");
        assert_eq!(decide(0.876_54).confidence_percent(), "87.7%");
    }

    #[test]
    fn complement_is_taken_in_double_precision() {
        // 1 - 0.0035 in f32 is 0.99650002, which prints as 99.7%.
        let d = decide(0.0035);
        assert_eq!(d.sentiment, Sentiment::Negative);
        assert_eq!(d.confidence_percent(), "99.6%");
    }

    #[test]
    fn sentiment_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"POSITIVE\""
        );
        assert_eq!(
            serde_json::to_string(&RoutingAction::CustomerSuccessEscalation).unwrap(),
            "\"customer_success_escalation\""
        );
    }
}
