use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::batch::{BatchEngine, BatchResponse, RunResult};
use crate::cli::output::Output;
use crate::config::{FilebenchConfig, Settings};

pub mod compare;
pub mod config;
pub mod input;
pub mod multi;
pub mod save_result;
pub mod single;

#[derive(Parser)]
#[command(
    name = "filebench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Benchmark sequential versus parallel file read throughput",
    long_about = "filebench locates each requested file across an ordered list of search \
                  directories, reads it fully, and reports per-file outcomes and wall-clock \
                  timing for a sequential baseline and a chunked parallel run."
)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Search directory, probed in the order given (replaces configured directories)
    #[arg(long = "search-dir", value_name = "DIR", global = true)]
    pub search_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read files one at a time (baseline)
    Single(single::SingleArgs),
    /// Read files in concurrently processed chunks
    Multi(multi::MultiArgs),
    /// Run the baseline and several worker counts, optionally saving a report
    Compare(compare::CompareArgs),
    /// Write a result report from an experiment summary payload
    SaveResult(save_result::SaveResultArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub settings: Settings,
    pub output: Output,
}

impl CommandContext {
    pub fn engine(&self) -> BatchEngine {
        BatchEngine::new(self.settings.search_paths())
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {dir}"))?;
        }

        setup_logging(self.verbose, self.quiet);

        let overrides = if self.search_dirs.is_empty() {
            None
        } else {
            Some(serde_json::json!({ "search": { "directories": self.search_dirs } }))
        };
        let settings = FilebenchConfig::load_with(self.config.as_deref(), overrides)?.settings()?;
        tracing::debug!("Search directories: {:?}", settings.search.directories);

        let ctx = CommandContext {
            settings,
            output: Output::new(self.verbose > 0, self.quiet),
        };

        match self.command {
            Commands::Single(args) => single::execute(args, &ctx).await,
            Commands::Multi(args) => multi::execute(args, &ctx).await,
            Commands::Compare(args) => compare::execute(args, &ctx).await,
            Commands::SaveResult(args) => save_result::execute(args, &ctx).await,
            Commands::Config(args) => config::execute(args, &ctx).await,
        }
    }
}

/// Output format for run commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled per-file listing and summary
    #[default]
    Text,
    /// Response body as JSON
    Json,
}

/// Run blocking engine work off the async runtime
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .context("Engine task did not run to completion")
}

/// Print a finished run in the requested format
pub(crate) fn print_run(
    output: &Output,
    format: OutputFormat,
    title: &str,
    run: &RunResult,
    response: &BatchResponse,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(response)?);
        }
        OutputFormat::Text => {
            output.header(title);
            for outcome in &run.outcomes {
                output.status_indicator(
                    &outcome.status.to_string(),
                    &outcome.name,
                    outcome.is_success(),
                );
                if let Some(detail) = &outcome.detail {
                    output.verbose(detail);
                }
            }
            output.blank_line();
            output.key_value("Files:", &run.len().to_string(), false);
            output.key_value("Succeeded:", &run.success_count().to_string(), false);
            output.key_value("Failed:", &run.failure_count().to_string(), false);
            output.key_value("Bytes read:", &run.total_bytes().to_string(), false);
            output.key_value("Processing time:", &response.processing_time, true);
            output.success(&response.message);
        }
    }
    Ok(())
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
