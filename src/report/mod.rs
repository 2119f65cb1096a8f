//! Experiment result reports
//!
//! Formats a benchmark summary as plain text and stores it under the results
//! directory as `Result_<timestamp>.txt`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::batch::RunResult;
use crate::parallel::WorkerCount;

/// One experiment: a sequential baseline plus parallel timings per worker count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub experiment_datetime: String,
    pub file_count: usize,
    /// Milliseconds
    pub single_thread_time: u64,
    /// Worker count → milliseconds
    #[serde(default)]
    pub multi_thread_results: BTreeMap<usize, u64>,
}

impl ExperimentSummary {
    pub fn from_runs<'a, I>(
        experiment_datetime: impl Into<String>,
        sequential: &RunResult,
        parallel: I,
    ) -> Self
    where
        I: IntoIterator<Item = (WorkerCount, &'a RunResult)>,
    {
        Self {
            experiment_datetime: experiment_datetime.into(),
            file_count: sequential.len(),
            single_thread_time: sequential.elapsed_millis,
            multi_thread_results: parallel
                .into_iter()
                .map(|(workers, run)| (workers.get(), run.elapsed_millis))
                .collect(),
        }
    }

    /// Human-readable report text
    pub fn render(&self) -> String {
        let mut lines = vec![
            "[Experiment Date]".to_string(),
            self.experiment_datetime.clone(),
            String::new(),
            "[Conditions]".to_string(),
            format!("Files: {}", self.file_count),
            String::new(),
            "[Results]".to_string(),
            format!("- Single-thread processing time: {}ms", self.single_thread_time),
        ];

        for (threads, millis) in &self.multi_thread_results {
            lines.push(format!(
                "- Multi-thread processing time ({threads} threads): {millis}ms"
            ));
        }

        lines.join("\n")
    }
}

/// `Result_<UTC ISO-8601 without separators>.txt`, e.g. `Result_20261019T120000123Z.txt`
pub fn report_file_name(now: DateTime<Utc>) -> String {
    format!("Result_{}.txt", now.format("%Y%m%dT%H%M%S%3fZ"))
}

/// Write the report into `results_dir`, creating it if needed
pub async fn save_report(summary: &ExperimentSummary, results_dir: &Path) -> Result<PathBuf> {
    save_report_at(summary, results_dir, Utc::now()).await
}

pub async fn save_report_at(
    summary: &ExperimentSummary,
    results_dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    tracing::debug!("Results directory: {}", results_dir.display());
    tokio::fs::create_dir_all(results_dir)
        .await
        .with_context(|| format!("Failed to create {}", results_dir.display()))?;

    let file_path = results_dir.join(report_file_name(now));
    tokio::fs::write(&file_path, summary.render())
        .await
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    tracing::info!("Saved experiment report to {}", file_path.display());
    Ok(file_path)
}
