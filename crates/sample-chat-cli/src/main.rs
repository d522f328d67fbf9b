use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use sample_chat_core::{
    format_transcript, split_sample_chat, to_prompt_messages, ExampleStyle, SampleChatConfig,
    SampleChatRequest, TokenCounter,
};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sample-chat")]
#[command(about = "Split a character's sample dialogue into prompt-ready turns")]
#[command(version)]
struct Cli {
    /// Character name used in speaker labels
    #[arg(long = "char")]
    character: String,

    /// User name used in speaker labels
    #[arg(long)]
    user: String,

    /// Token budget; the most recent turns that fit are kept
    #[arg(long, allow_negative_numbers = true)]
    budget: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Message style for `--format messages` (native, named_system)
    #[arg(long)]
    style: Option<ExampleStyle>,

    /// Do not substitute {{char}} / {{user}} placeholders
    #[arg(long)]
    no_placeholders: bool,

    /// Config file (.json or .toml)
    #[arg(long, env = "SAMPLE_CHAT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    /// Transcript file; reads stdin when omitted
    input: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Fit result with turns, dropped count and total cost
    Json,
    /// Chat-completion messages
    Messages,
    /// `Name: content` transcript
    Text,
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(false),
        )
        .init();
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read transcript from stdin")?;
            Ok(buffer)
        }
    }
}

/// Merge command-line flags over the loaded config.
fn resolve_config(cli: &Cli, mut config: SampleChatConfig) -> SampleChatConfig {
    if cli.budget.is_some() {
        config.budget = cli.budget;
    }
    if let Some(style) = cli.style {
        config.example_style = style;
    }
    if cli.no_placeholders {
        config.expand_placeholders = false;
    }
    config
}

struct Report {
    output: String,
    dropped: usize,
    kept: usize,
}

fn run(cli: &Cli, transcript: &str, config: &SampleChatConfig) -> anyhow::Result<Report> {
    let request = SampleChatRequest::new(transcript, &cli.character, &cli.user)
        .with_budget(config.budget)
        .with_placeholders(config.expand_placeholders);

    let counter = &config.counter;
    let result = split_sample_chat(&request, |turn| counter.count_turn(turn))?;
    tracing::debug!(
        kept = result.additions.len(),
        dropped = result.dropped,
        total_cost = ?result.total_cost,
        "sample chat fitted"
    );

    let output = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Messages => serde_json::to_string_pretty(&to_prompt_messages(
            &result.additions,
            config.example_style,
        ))?,
        OutputFormat::Text => format_transcript(&result.additions),
    };

    Ok(Report {
        output,
        dropped: result.dropped,
        kept: result.additions.len(),
    })
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = SampleChatConfig::load(cli.config.as_deref())
        .context("failed to load sample chat config")?;
    let config = resolve_config(&cli, config);
    let transcript = read_input(cli.input.as_ref())?;

    let report = run(&cli, &transcript, &config)?;
    println!("{}", report.output);

    if report.dropped > 0 {
        eprintln!(
            "{}",
            format!(
                "kept {} turn(s), dropped {} older turn(s) to fit the budget",
                report.kept, report.dropped
            )
            .yellow()
        );
    }

    Ok(())
}
