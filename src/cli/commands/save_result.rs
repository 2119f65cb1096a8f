use anyhow::{Context, Result};
use clap::Args;

use super::CommandContext;
use super::input::read_source;
use crate::report::{ExperimentSummary, save_report};

#[derive(Args)]
pub struct SaveResultArgs {
    /// JSON experiment summary (`-` reads stdin)
    #[arg(value_name = "FILE")]
    pub summary: String,
}

pub async fn execute(args: SaveResultArgs, ctx: &CommandContext) -> Result<()> {
    let body = read_source(&args.summary).await?;
    let summary: ExperimentSummary =
        serde_json::from_str(&body).context("Failed to parse experiment summary")?;

    let path = save_report(&summary, &ctx.settings.results_dir()).await?;
    ctx.output
        .success(&format!("Saved result report to {}", path.display()));
    Ok(())
}
