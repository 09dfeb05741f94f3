//! Interactive feedback form: read a submission, analyze it, render the card.
//!
//! A submission is one or more lines ended by an empty line. `:quit` on its
//! own line, or end of input, closes the form.

use std::io::{BufRead, Write};

use anyhow::Context;
use brandpulse_ai::{AnalyzeError, SentimentModel, SentimentPipeline};
use brandpulse_core::is_blank;
use tracing::warn;

use crate::display;

const QUIT: &str = ":quit";

/// Counters for a finished session.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormStats {
    pub analyzed: usize,
    pub rejected: usize,
}

/// Run the form until `:quit` or end of input.
///
/// The pipeline is already loaded: a form is never shown without a model.
/// Inference failures end the session with an error.
pub fn run<M, R, W>(
    pipeline: &mut SentimentPipeline<M>,
    input: R,
    out: &mut W,
) -> anyhow::Result<FormStats>
where
    M: SentimentModel,
    R: BufRead,
    W: Write,
{
    let mut stats = FormStats::default();
    let mut lines = input.lines();

    display::print_header(out)?;

    loop {
        display::print_prompt(out)?;

        let mut submission: Vec<String> = Vec::new();
        let mut at_eof = false;
        loop {
            let Some(line) = lines.next() else {
                at_eof = true;
                break;
            };
            let line = line.context("reading feedback input")?;
            if submission.is_empty() && line.trim() == QUIT {
                return Ok(stats);
            }
            if is_blank(&line) {
                break;
            }
            submission.push(line);
        }

        if at_eof && submission.is_empty() {
            break;
        }

        let text = submission.join("\n");
        if !is_blank(&text) {
            writeln!(out, "{}", display::BUSY)?;
        }

        match pipeline.analyze(&text) {
            Ok(analysis) => {
                display::print_analysis(out, &analysis)?;
                stats.analyzed += 1;
            }
            Err(AnalyzeError::EmptyInput) => {
                warn!("empty submission");
                display::print_empty_warning(out)?;
                stats.rejected += 1;
            }
            Err(AnalyzeError::Classifier(e)) => {
                return Err(e).context("sentiment inference failed");
            }
        }

        if at_eof {
            break;
        }
    }

    Ok(stats)
}
