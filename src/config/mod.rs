//! Configuration management for filebench
//!
//! Settings are layered with figment (see [`core::FilebenchConfig`]) and
//! extracted into the typed [`Settings`] tree below.

pub mod core;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::batch::SearchPaths;
use crate::parallel::{ExecutionStrategy, WorkerCount};

pub use self::core::FilebenchConfig;

/// Fully merged configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralConfig,
    pub search: SearchConfig,
    pub benchmark: BenchmarkConfig,
    pub results: ResultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Base for every relative directory in the configuration
    pub base_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Candidate directories in probe order
    pub directories: Vec<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            directories: ["uploads", "files", "files2"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Explicit worker counts for comparisons (empty = derive from CPU count)
    pub worker_counts: Vec<usize>,
    pub thread_percentage: u8,
    pub max_threads: usize,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            worker_counts: Vec::new(),
            thread_percentage: 100,
            max_threads: 0,
        }
    }
}

impl BenchmarkConfig {
    /// Worker counts to compare, deduplicated and ascending.
    ///
    /// Without explicit counts this doubles from 1 up to the CPU-based maximum,
    /// always ending on the maximum itself.
    pub fn worker_counts(&self) -> Vec<WorkerCount> {
        let mut counts: Vec<WorkerCount> = if self.worker_counts.is_empty() {
            let max_workers = ExecutionStrategy::calculate_optimal_workers(
                self.max_threads,
                self.thread_percentage,
            );
            std::iter::successors(Some(1usize), |n| n.checked_mul(2))
                .take_while(|n| *n < max_workers)
                .chain(std::iter::once(max_workers))
                .map(WorkerCount::new)
                .collect()
        } else {
            self.worker_counts.iter().copied().map(WorkerCount::new).collect()
        };

        counts.sort();
        counts.dedup();
        counts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResultsConfig {
    pub directory: PathBuf,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
        }
    }
}

impl Settings {
    /// Candidate directories resolved against `general.base_dir`
    pub fn search_paths(&self) -> SearchPaths {
        SearchPaths::resolve_against(&self.general.base_dir, &self.search.directories)
    }

    /// Report directory resolved against `general.base_dir`
    pub fn results_dir(&self) -> PathBuf {
        resolve(&self.general.base_dir, &self.results.directory)
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
