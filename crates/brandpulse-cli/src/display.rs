//! Terminal rendering for the feedback form and its result card.
//!
//! Everything writes to a caller-supplied `Write` so the form can be driven
//! and inspected in tests.

use std::io::{self, Write};
use std::path::Path;

use brandpulse_ai::{Analysis, ClassifierError};
use brandpulse_core::Sentiment;

const BAR_WIDTH: usize = 30;

pub const TITLE: &str = "💬 BrandPulse Sentiment AI";
pub const SUBTITLE: &str = "### Powered by Recurrent Neural Networks (LSTM)";
pub const INSTRUCTIONS: &str = "Paste a customer review, tweet, or feedback below. \
The AI will read the context and determine the emotional sentiment.";
pub const INPUT_LABEL: &str = "Customer Feedback Input:";
pub const PLACEHOLDER: &str = "e.g., I absolutely loved this product, the quality is outstanding and delivery was fast!";
pub const BUSY: &str = "AI is reading the sequence of words...";
pub const EMPTY_WARNING: &str = "Please enter some text to analyze.";
pub const SCALE_CAPTION: &str = "0 = Extremely Negative | 1 = Extremely Positive";

// ── Form chrome ──

pub fn print_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{SUBTITLE}")?;
    writeln!(out, "{INSTRUCTIONS}")?;
    writeln!(out)
}

/// Prompt for one submission.
pub fn print_prompt(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{INPUT_LABEL}")?;
    writeln!(out, "  ({PLACEHOLDER})")?;
    writeln!(out, "  Finish with an empty line; :quit or Ctrl-D to exit.")?;
    out.flush()
}

pub fn print_empty_warning(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "⚠️ {EMPTY_WARNING}")?;
    writeln!(out)
}

/// Blocking startup error. Nothing else is rendered after this.
pub fn print_load_error(out: &mut impl Write, err: &ClassifierError) -> io::Result<()> {
    match err {
        ClassifierError::ModelUnavailable { path, .. } => {
            writeln!(
                out,
                "⚠️ Model missing. Ensure '{}' is available.",
                artifact_name(path)
            )?;
        }
        _ => writeln!(out, "⚠️ Model could not be used.")?,
    }
    writeln!(out, "   {err}")
}

// ── Result card ──

/// Render one analysis as a result card.
pub fn print_analysis(out: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    let decision = &analysis.decision;

    writeln!(out, "---")?;
    writeln!(out, "=== 📊 AI Analysis Results ===")?;
    writeln!(out)?;
    writeln!(out, "  {}", sentiment_banner(decision.sentiment))?;
    writeln!(out, "  {:<18} {}", "Confidence Score:", decision.confidence_percent())?;
    writeln!(out)?;
    writeln!(out, "  Managerial Routing Action:")?;
    writeln!(
        out,
        "  {} Action: {}",
        action_icon(decision.sentiment),
        decision.action.description()
    )?;
    writeln!(out)?;
    writeln!(out, "  {} {:.2}", score_bar(analysis.score, BAR_WIDTH), analysis.score)?;
    writeln!(out, "  {SCALE_CAPTION}")?;
    writeln!(out)
}

pub fn sentiment_banner(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "🟢 POSITIVE SENTIMENT",
        Sentiment::Negative => "🔴 NEGATIVE SENTIMENT",
    }
}

fn action_icon(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "✅",
        Sentiment::Negative => "⚠️",
    }
}

/// Horizontal progress bar for a score in [0, 1].
pub fn score_bar(score: f32, width: usize) -> String {
    let filled = ((score.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

fn artifact_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
