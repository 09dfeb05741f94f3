mod display;
mod form;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use brandpulse_ai::{AnalyzeError, OnnxSentimentModel, SentimentPipeline};
use brandpulse_core::{InputType, ModelConfig};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit status for a one-shot analysis with nothing to analyze.
const EXIT_EMPTY_INPUT: u8 = 2;

#[derive(Parser)]
#[command(
    name = "brandpulse",
    version,
    about = "BrandPulse: sentiment analysis and routing for customer feedback"
)]
struct Cli {
    /// Path to the exported sentiment model.
    #[arg(long, global = true, env = "BRANDPULSE_MODEL")]
    model: Option<PathBuf>,

    /// Path to the word index the model was trained with.
    #[arg(long, global = true, env = "BRANDPULSE_VOCAB")]
    vocab: Option<PathBuf>,

    /// Element type of the model's token-id input (f32, i64, i32).
    #[arg(long, global = true, env = "BRANDPULSE_INPUT_TYPE")]
    input_type: Option<InputType>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive feedback form (default).
    Interactive,
    /// Analyze one piece of feedback and exit.
    Analyze {
        /// Feedback text. Read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
        /// Print the analysis as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the 200 token indices the model would see.
    Encode {
        /// Text to encode. Read from stdin when omitted.
        #[arg(long)]
        text: Option<String>,
    },
}

impl Cli {
    fn model_config(&self) -> ModelConfig {
        let defaults = ModelConfig::default();
        ModelConfig {
            model_path: self.model.clone().unwrap_or(defaults.model_path),
            vocab_path: self.vocab.clone().unwrap_or(defaults.vocab_path),
            input_type: self.input_type.unwrap_or(defaults.input_type),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.model_config();
    info!(version = env!("CARGO_PKG_VERSION"), ?config, "brandpulse starting");

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => cmd_interactive(&config),
        Command::Analyze { text, json } => cmd_analyze(&config, text, json),
        Command::Encode { text } => cmd_encode(&config, text),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load the model once. On failure, show the blocking error and return `None`.
fn load_or_block(
    config: &ModelConfig,
) -> anyhow::Result<Option<SentimentPipeline<OnnxSentimentModel>>> {
    match brandpulse_ai::load_pipeline(config) {
        Ok(pipeline) => Ok(Some(pipeline)),
        Err(e) => {
            error!(error = %e, "startup failed, refusing input");
            display::print_load_error(&mut io::stderr(), &e)?;
            Ok(None)
        }
    }
}

fn cmd_interactive(config: &ModelConfig) -> anyhow::Result<ExitCode> {
    let Some(mut pipeline) = load_or_block(config)? else {
        return Ok(ExitCode::FAILURE);
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let stats = form::run(&mut pipeline, stdin.lock(), &mut stdout)?;
    info!(analyzed = stats.analyzed, rejected = stats.rejected, "form closed");
    Ok(ExitCode::SUCCESS)
}

fn cmd_analyze(config: &ModelConfig, text: Option<String>, json: bool) -> anyhow::Result<ExitCode> {
    let Some(mut pipeline) = load_or_block(config)? else {
        return Ok(ExitCode::FAILURE);
    };
    let text = read_text(text)?;

    let analysis = match pipeline.analyze(&text) {
        Ok(analysis) => analysis,
        Err(AnalyzeError::EmptyInput) => {
            display::print_empty_warning(&mut io::stderr())?;
            return Ok(ExitCode::from(EXIT_EMPTY_INPUT));
        }
        Err(AnalyzeError::Classifier(e)) => {
            return Err(e).context("sentiment inference failed");
        }
    };

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &analysis)?;
        writeln!(stdout)?;
    } else {
        display::print_analysis(&mut stdout, &analysis)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_encode(config: &ModelConfig, text: Option<String>) -> anyhow::Result<ExitCode> {
    let vocabulary = match brandpulse_ai::load_vocabulary(&config.vocab_path) {
        Ok(v) => v,
        Err(e) => {
            display::print_load_error(&mut io::stderr(), &e)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let text = read_text(text)?;

    let sequence = vocabulary.encode(&text);
    let line: Vec<String> = sequence.iter().map(|i| i.to_string()).collect();
    println!("{}", line.join(" "));
    let tokens = sequence.token_count();
    eprintln!("  {tokens} tokens, {} padding", sequence.len() - tokens);
    Ok(ExitCode::SUCCESS)
}

fn read_text(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading feedback from stdin")?;
            Ok(buf)
        }
    }
}
