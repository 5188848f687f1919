//! Validate WebRelease templates from the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use webrelease_language_server::config::Args;
use webrelease_language_server::{Config, Diagnostic, TagRegistry, validate_document};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "wr-check")]
#[command(about = "Check WebRelease templates for expression and tag errors")]
#[command(version)]
struct Cli {
    /// Template files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Extra tag registry to merge over the built-in tags
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Skip the per-user registry overlay
    #[arg(long)]
    no_user_registry: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Serialize)]
struct FileReport<'a> {
    path: String,
    diagnostics: &'a [Diagnostic],
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("wr-check: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every file is free of errors
fn run() -> Result<bool> {
    let cli = Cli::parse();

    let config = Config::from_args(Args {
        registry: cli.registry,
        no_user_registry: cli.no_user_registry,
        log_level: cli.log_level,
    })?;
    config.init_logging();
    let registry = TagRegistry::from_config(&config)?;

    let mut clean = true;
    let mut results = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let result = validate_document(&content, &registry);
        log::debug!("{}: {} diagnostics", path.display(), result.diagnostics.len());
        clean &= result.is_valid();
        results.push((path.display().to_string(), result));
    }

    match cli.format {
        Format::Text => {
            for (path, result) in &results {
                for d in &result.diagnostics {
                    println!(
                        "{}:{}:{}: {}[{}]: {}",
                        path,
                        d.range.start.line + 1,
                        d.range.start.character + 1,
                        d.severity,
                        d.code.map(|c| c.as_str()).unwrap_or("-"),
                        d.message
                    );
                }
            }
        }
        Format::Json => {
            let reports: Vec<_> = results
                .iter()
                .map(|(path, result)| FileReport {
                    path: path.clone(),
                    diagnostics: &result.diagnostics,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }

    Ok(clean)
}
