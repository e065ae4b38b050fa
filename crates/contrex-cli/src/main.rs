//! CLI for extracting contract metadata from Brazilian procurement PDFs.
//!
//! Emits exactly one JSON document on stdout per invocation: the extracted
//! contract record on success, or an `{"error": ...}` object on failure.
//! Logs go to stderr so stdout stays machine-readable.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use contrex_core::{ContrexConfig, TesseractEngine, process_document};

/// Extração de metadados de contratos em PDF
#[derive(Parser)]
#[command(name = "contrex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PDF file to process
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            emit_error(&e.to_string());
            return ExitCode::from(1);
        }
    };

    // Logging goes to stderr; stdout is reserved for the JSON record.
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            emit_error(&format!("{e:#}"));
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ContrexConfig::from_file(path)?,
        None => ContrexConfig::default(),
    };

    if !cli.input.exists() {
        anyhow::bail!("Arquivo não encontrado: {}", cli.input.display());
    }

    // Optional fail-fast probe; by default a missing engine just degrades
    // the record instead of aborting.
    if config.ocr.require_engine && !TesseractEngine::from_config(&config.ocr).is_available() {
        anyhow::bail!("Dependência não encontrada: {}", config.ocr.binary);
    }

    info!("processing {}", cli.input.display());
    let record = process_document(&cli.input, &config);
    let json = serde_json::to_string_pretty(&record)?;

    write_output(&json, cli.output.as_deref())
}

fn write_output(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, json)?;
            info!("record written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Failures are still reported as a JSON document on stdout so the consuming
/// application never has to parse free-form text.
fn emit_error(message: &str) {
    let payload = serde_json::json!({ "error": message });
    println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
}
