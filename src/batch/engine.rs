use super::error::BatchError;
use super::locator::{FileLocator, SearchPaths};
use super::reader::read_file;
use super::timing::timed;
use super::types::{FileOutcome, FileTask, RunResult};
use crate::parallel::{ExecutionStrategy, WorkerCount};

/// Batch file-processing engine.
///
/// Locates and reads every task with either the sequential baseline or the
/// chunked parallel runner, and times the whole run.
#[derive(Debug, Clone)]
pub struct BatchEngine {
    locator: FileLocator,
}

impl BatchEngine {
    pub fn new(search_paths: SearchPaths) -> Self {
        Self {
            locator: FileLocator::new(search_paths),
        }
    }

    pub fn search_paths(&self) -> &SearchPaths {
        self.locator.search_paths()
    }

    /// Locate and read one file. Never fails: problems become outcomes.
    pub fn process_file(&self, task: &FileTask) -> FileOutcome {
        let path = match self.locator.locate(&task.name) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("{}", e);
                return FileOutcome::not_found(e);
            }
        };

        match read_file(&path) {
            Ok(bytes_read) => {
                tracing::debug!("Read {} ({} bytes)", path.display(), bytes_read);
                FileOutcome::success(&task.name, bytes_read)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                FileOutcome::read_failed(&task.name, &e)
            }
        }
    }

    /// Process every task one at a time, in input order
    pub fn run_sequential(&self, tasks: &[FileTask]) -> RunResult {
        let (outcomes, elapsed_millis) = timed(|| {
            crate::parallel::SequentialExecutor::execute(tasks, |task, _| self.process_file(task))
        });

        let result = RunResult {
            outcomes,
            elapsed_millis,
        };
        tracing::info!(
            "Sequential run: {} files ({} ok, {} failed) in {} ms",
            result.len(),
            result.success_count(),
            result.failure_count(),
            elapsed_millis
        );
        result
    }

    /// Split tasks into `ceil(N / workers)`-sized contiguous chunks, run the
    /// chunks concurrently and return outcomes in input order.
    ///
    /// Fails only when the execution substrate itself fails.
    pub fn run_parallel(
        &self,
        tasks: &[FileTask],
        workers: WorkerCount,
    ) -> Result<RunResult, BatchError> {
        let strategy = ExecutionStrategy::Parallel { workers };
        let (outcomes, elapsed_millis) =
            timed(|| strategy.execute(tasks, |task, _chunk_index| self.process_file(task)));
        let outcomes = outcomes?;

        let result = RunResult {
            outcomes,
            elapsed_millis,
        };
        tracing::info!(
            "Parallel run: {} files on {} workers ({} ok, {} failed) in {} ms",
            result.len(),
            workers,
            result.success_count(),
            result.failure_count(),
            elapsed_millis
        );
        Ok(result)
    }

    /// Dispatch on an [`ExecutionStrategy`]
    pub fn run(
        &self,
        tasks: &[FileTask],
        strategy: ExecutionStrategy,
    ) -> Result<RunResult, BatchError> {
        match strategy {
            ExecutionStrategy::Sequential => Ok(self.run_sequential(tasks)),
            ExecutionStrategy::Parallel { workers } => self.run_parallel(tasks, workers),
        }
    }
}
