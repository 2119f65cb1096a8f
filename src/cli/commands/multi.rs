use anyhow::Result;
use clap::Args;

use super::input::InputArgs;
use super::{CommandContext, OutputFormat, print_run, run_blocking};
use crate::batch::BatchResponse;

#[derive(Args)]
pub struct MultiArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of workers; 0 or missing means 1
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn execute(args: MultiArgs, ctx: &CommandContext) -> Result<()> {
    let request = args.input.load(args.threads).await?;
    let workers = request.workers;
    if args.format == OutputFormat::Text {
        ctx.output.info(&format!(
            "Multi-thread run over {} files with {} workers",
            request.tasks.len(),
            workers
        ));
    }

    let engine = ctx.engine();
    let tasks = request.tasks;
    let run = run_blocking(move || engine.run_parallel(&tasks, workers)).await??;

    let response = BatchResponse::parallel(&run);
    print_run(&ctx.output, args.format, "Multi-thread results", &run, &response)
}
