use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::input::InputArgs;
use super::{CommandContext, OutputFormat, run_blocking};
use crate::batch::RunResult;
use crate::config::BenchmarkConfig;
use crate::parallel::WorkerCount;
use crate::report::{ExperimentSummary, save_report};

#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Worker counts to compare (comma-separated); defaults to configuration
    #[arg(short, long, value_delimiter = ',')]
    pub threads: Vec<usize>,

    /// Save a result report to the results directory
    #[arg(long)]
    pub save: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

type ComparisonRuns = (RunResult, Vec<(WorkerCount, RunResult)>);

#[derive(Serialize)]
struct CompareOutput<'a> {
    summary: &'a ExperimentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_path: Option<PathBuf>,
}

pub async fn execute(args: CompareArgs, ctx: &CommandContext) -> Result<()> {
    let request = args.input.load(None).await?;
    let worker_counts = if args.threads.is_empty() {
        ctx.settings.benchmark.worker_counts()
    } else {
        BenchmarkConfig {
            worker_counts: args.threads.clone(),
            ..ctx.settings.benchmark.clone()
        }
        .worker_counts()
    };

    if args.format == OutputFormat::Text {
        let counts: Vec<String> = worker_counts.iter().map(ToString::to_string).collect();
        ctx.output.info(&format!(
            "Comparing {} files: single thread vs {} workers",
            request.tasks.len(),
            counts.join(", ")
        ));
    }

    // Runs happen one after another so timings never overlap
    let engine = ctx.engine();
    let tasks = request.tasks;
    let (sequential, parallel) = run_blocking(move || -> Result<ComparisonRuns> {
        let sequential = engine.run_sequential(&tasks);
        let parallel = worker_counts
            .into_iter()
            .map(|workers| Ok((workers, engine.run_parallel(&tasks, workers)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok((sequential, parallel))
    })
    .await??;

    let experiment_datetime = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let summary = ExperimentSummary::from_runs(
        experiment_datetime,
        &sequential,
        parallel.iter().map(|(workers, run)| (*workers, run)),
    );

    let report_path = if args.save {
        Some(save_report(&summary, &ctx.settings.results_dir()).await?)
    } else {
        None
    };

    match args.format {
        OutputFormat::Json => {
            let body = CompareOutput {
                summary: &summary,
                report_path,
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            print_table(ctx, &sequential, &parallel);
            if let Some(path) = report_path {
                ctx.output
                    .success(&format!("Saved result report to {}", path.display()));
            }
        }
    }

    Ok(())
}

fn print_table(
    ctx: &CommandContext,
    sequential: &RunResult,
    parallel: &[(WorkerCount, RunResult)],
) {
    let output = &ctx.output;
    output.header("Comparison");
    output.table_row(&[
        "Mode".to_string(),
        "Workers".to_string(),
        "Time".to_string(),
        "Speedup".to_string(),
        "Failed".to_string(),
    ]);
    output.table_row(&[
        "single".to_string(),
        "1".to_string(),
        sequential.processing_time(),
        "1.00x".to_string(),
        sequential.failure_count().to_string(),
    ]);

    for (workers, run) in parallel {
        output.table_row(&[
            "multi".to_string(),
            workers.to_string(),
            run.processing_time(),
            speedup(sequential.elapsed_millis, run.elapsed_millis),
            run.failure_count().to_string(),
        ]);
    }

    if sequential.failure_count() > 0 {
        output.warning(&format!(
            "{} of {} files could not be read; timings include the failed lookups",
            sequential.failure_count(),
            sequential.len()
        ));
    }
}

fn speedup(baseline_millis: u64, millis: u64) -> String {
    if millis == 0 {
        "n/a".to_string()
    } else {
        format!("{:.2}x", baseline_millis as f64 / millis as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speedup_formatting() {
        assert_eq!(speedup(100, 50), "2.00x");
        assert_eq!(speedup(90, 120), "0.75x");
        assert_eq!(speedup(10, 0), "n/a");
    }
}
