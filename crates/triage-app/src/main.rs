//! triage - CLI client for the email classification service
//!
//! Usage:
//!   triage classify --text "Please resend the invoice"
//!   triage classify mail1.txt mail2.pdf
//!   triage history
//!   triage reset [--yes]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_app::{cap_files, AppConfig, BuildWarning, Engine, Selection, ViewSink};
use triage_client::HttpClassifier;
use triage_core::{
    intake_file, Category, ClassificationResult, FilePayload, HistoryEntry, RenderRow, RowStatus,
    Stats, StatusKind, StatusLine,
};
use triage_store::{Aggregator, FileStore};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug)]
enum Command {
    Classify { text: Option<String>, files: Vec<PathBuf> },
    History,
    Reset { yes: bool },
    Help,
}

fn parse_args() -> Command {
    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        return Command::Help;
    };

    match command.as_str() {
        "classify" => {
            let mut text = None;
            let mut files = Vec::new();

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--text" | "-t" => {
                        i += 1;
                        if i < args.len() {
                            text = Some(args[i].clone());
                        }
                    }
                    other => files.push(PathBuf::from(other)),
                }
                i += 1;
            }

            Command::Classify { text, files }
        }
        "history" => Command::History,
        "reset" => Command::Reset {
            yes: args.iter().any(|a| a == "--yes" || a == "-y"),
        },
        _ => Command::Help,
    }
}

fn print_usage() {
    println!("triage - email classification client");
    println!();
    println!("Usage:");
    println!("  triage classify --text \"<content>\"   classify free text");
    println!("  triage classify <file>...             classify up to 6 .txt/.pdf files");
    println!("  triage history                        show recent history and stats");
    println!("  triage reset [--yes]                  clear history and stats");
}

// =============================================================================
// TERMINAL VIEW
// =============================================================================

/// Thin terminal renderer; consumes engine output values and owns nothing.
struct TerminalView;

impl ViewSink for TerminalView {
    fn result_shown(&mut self, result: &ClassificationResult) {
        println!();
        println!("Category: {}", result.category);
        println!(
            "  {}",
            match result.category {
                Category::Productive => "This email requires action or a reply.",
                Category::Unproductive => "This email requires no immediate action.",
            }
        );
        println!("Suggested reply:");
        println!("  {}", result.reply);
        if let Some(preview) = &result.extracted_preview {
            println!("Extracted text:");
            println!("  {}", preview);
        }
    }

    fn batch_shown(&mut self, rows: &[RenderRow]) {
        println!();
        println!("{:<28} {:<14} Reply", "File", "Category");
        for row in rows {
            match &row.status {
                RowStatus::Classified { category, reply } => {
                    println!("{:<28} {:<14} {}", row.filename, category.label(), reply);
                }
                RowStatus::Failed { message } => {
                    println!("{:<28} {:<14} {}", row.filename, "error", message);
                }
            }
        }
    }

    fn history_shown(&mut self, entries: &[HistoryEntry], stats: &Stats) {
        println!();
        println!(
            "Stats: {} total, {} productive, {} unproductive",
            stats.total, stats.productive, stats.unproductive
        );
        for entry in entries {
            println!(
                "  [{}] {} {} - {}",
                entry.id,
                entry.created_at.format("%Y-%m-%d %H:%M"),
                entry.category.label(),
                entry.excerpt
            );
        }
    }

    fn status_shown(&mut self, status: &StatusLine) {
        match status.kind {
            StatusKind::Error => eprintln!("error: {}", status.message),
            StatusKind::Success => println!("{}", status.message),
            StatusKind::Info => println!("{}", status.message),
        }
    }

    fn warning_shown(&mut self, warning: &BuildWarning) {
        eprintln!("warning: {}", warning);
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn read_selection(text: Option<String>, paths: Vec<PathBuf>) -> anyhow::Result<Selection> {
    if paths.is_empty() {
        return Ok(Selection::text(text.unwrap_or_default()));
    }

    let mut payloads: Vec<FilePayload> = Vec::with_capacity(paths.len());
    for path in &paths {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let data = tokio::fs::read(path).await?;
        payloads.push(intake_file(&filename, data)?);
    }

    // The intake path applies the same cap as the builder.
    let (payloads, warning) = cap_files(payloads);
    if let Some(warning) = warning {
        eprintln!("warning: {}", warning);
    }

    Ok(Selection::files(payloads))
}

async fn run_classify(
    config: AppConfig,
    text: Option<String>,
    files: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let selection = read_selection(text, files).await?;

    let backend = Arc::new(HttpClassifier::with_timeout(
        config.api_base.clone(),
        config.timeout_secs,
    ));
    let store = Arc::new(FileStore::new(config.state_dir));
    let mut engine = Engine::new(backend, store, TerminalView).await?;

    if engine.classify(selection).await.is_err() {
        // The view already surfaced the failure message.
        std::process::exit(1);
    }
    Ok(())
}

async fn run_history(config: AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(FileStore::new(config.state_dir));
    let aggregator = Aggregator::open(store).await?;

    let mut view = TerminalView;
    let stats = aggregator.stats();
    view.history_shown(aggregator.recent(), &stats);
    Ok(())
}

async fn run_reset(config: AppConfig, yes: bool) -> anyhow::Result<()> {
    if !yes {
        print!("Clear all history and stats? [y/N] ");
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !answer.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let store = Arc::new(FileStore::new(config.state_dir));
    let mut aggregator = Aggregator::open(store).await?;
    aggregator.reset().await?;
    println!("History cleared.");
    Ok(())
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "triage_app=info,triage_client=info,triage_store=info".into()
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("triage.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        None
    };

    let config = AppConfig::from_env();

    match parse_args() {
        Command::Classify { text, files } => run_classify(config, text, files).await,
        Command::History => run_history(config).await,
        Command::Reset { yes } => run_reset(config, yes).await,
        Command::Help => {
            print_usage();
            Ok(())
        }
    }
}
