use anyhow::Result;
use clap::Args;

use super::input::InputArgs;
use super::{CommandContext, OutputFormat, print_run, run_blocking};
use crate::batch::BatchResponse;

#[derive(Args)]
pub struct SingleArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn execute(args: SingleArgs, ctx: &CommandContext) -> Result<()> {
    let request = args.input.load(None).await?;
    if args.format == OutputFormat::Text {
        ctx.output
            .info(&format!("Single-thread run over {} files", request.tasks.len()));
    }

    let engine = ctx.engine();
    let tasks = request.tasks;
    let run = run_blocking(move || engine.run_sequential(&tasks)).await?;

    let response = BatchResponse::sequential(&run);
    print_run(&ctx.output, args.format, "Single-thread results", &run, &response)
}
