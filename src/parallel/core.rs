use crossbeam::channel::{Receiver, Sender, bounded};
use std::ops::Range;
use thiserror::Error;

/// Failures of the execution substrate itself, as opposed to failures of
/// individual work items (which processors must fold into their result type).
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("failed to spawn worker for chunk {chunk_index}: {source}")]
    Spawn {
        chunk_index: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("a chunk worker panicked during parallel execution")]
    Panicked,
    #[error("chunk {chunk_index} finished without reporting its results")]
    MissingChunk { chunk_index: usize },
}

/// Requested number of parallel workers, always at least one.
///
/// Missing or zero requests degrade to a single worker instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerCount(usize);

impl WorkerCount {
    pub const ONE: WorkerCount = WorkerCount(1);

    pub fn new(requested: usize) -> Self {
        Self(requested.max(1))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<usize> for WorkerCount {
    fn from(requested: usize) -> Self {
        Self::new(requested)
    }
}

impl From<Option<usize>> for WorkerCount {
    fn from(requested: Option<usize>) -> Self {
        requested.map_or(Self::ONE, Self::new)
    }
}

impl std::fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static partition of `item_count` items into contiguous chunks of
/// `ceil(item_count / workers)` items each.
///
/// Only non-empty chunks are kept, so the chunk count is
/// `min(workers, ceil(item_count / chunk_size))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    chunk_size: usize,
    ranges: Vec<Range<usize>>,
}

impl ChunkPlan {
    pub fn new(item_count: usize, workers: WorkerCount) -> Self {
        let chunk_size = item_count.div_ceil(workers.get());
        if chunk_size == 0 {
            return Self {
                chunk_size,
                ranges: Vec::new(),
            };
        }

        // Bounded by the item count, never by the requested worker count
        let ranges = (0..item_count)
            .step_by(chunk_size)
            .map(|start| start..(start + chunk_size).min(item_count))
            .collect();

        Self { chunk_size, ranges }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Number of non-empty chunks
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Borrow each chunk of `items` in chunk-index order
    pub fn chunks<'a, T>(&'a self, items: &'a [T]) -> impl Iterator<Item = &'a [T]> + 'a {
        self.ranges.iter().map(move |range| &items[range.clone()])
    }
}

/// Report sent from a chunk worker back to the dispatching thread
struct ChunkReport<R> {
    chunk_index: usize,
    results: Vec<R>,
}

/// Runs one worker per non-empty chunk and reassembles results in input order.
///
/// Each worker processes its chunk sequentially and sends a single
/// [`ChunkReport`] over a bounded channel. The dispatcher writes every report into
/// the slot of its chunk index, so completion order never affects the output.
pub struct ChunkedExecutor {
    workers: WorkerCount,
}

impl ChunkedExecutor {
    pub fn new(workers: WorkerCount) -> Self {
        Self { workers }
    }

    pub fn workers(&self) -> WorkerCount {
        self.workers
    }

    /// Execute `processor` over every item. The second processor argument is
    /// the chunk index of the worker handling the item.
    pub fn execute<T, R, F>(&self, items: &[T], processor: F) -> Result<Vec<R>, ExecutorError>
    where
        T: Sync,
        R: Send,
        F: Fn(&T, usize) -> R + Sync,
    {
        let plan = ChunkPlan::new(items.len(), self.workers);
        if plan.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(
            items = items.len(),
            chunks = plan.len(),
            chunk_size = plan.chunk_size(),
            "dispatching chunk workers"
        );

        // Capacity covers every report so workers never block on send
        let (report_tx, report_rx): (Sender<ChunkReport<R>>, Receiver<ChunkReport<R>>) =
            bounded(plan.len());
        let processor = &processor;

        let slots = crossbeam::thread::scope(|s| -> Result<Vec<Option<Vec<R>>>, ExecutorError> {
            for (chunk_index, chunk) in plan.chunks(items).enumerate() {
                let report_tx = report_tx.clone();
                s.builder()
                    .name(format!("filebench-chunk-{chunk_index}"))
                    .spawn(move |_| Self::run_chunk(chunk_index, chunk, processor, report_tx))
                    .map_err(|source| ExecutorError::Spawn {
                        chunk_index,
                        source,
                    })?;
            }

            // Drop the original sender so the collector stops once every worker is done
            drop(report_tx);

            Ok(Self::collect_reports(report_rx, plan.len()))
        })
        .map_err(|_| ExecutorError::Panicked)??;

        let mut results = Vec::with_capacity(items.len());
        for (chunk_index, slot) in slots.into_iter().enumerate() {
            let chunk_results = slot.ok_or(ExecutorError::MissingChunk { chunk_index })?;
            results.extend(chunk_results);
        }

        Ok(results)
    }

    fn run_chunk<T, R, F>(
        chunk_index: usize,
        chunk: &[T],
        processor: &F,
        report_tx: Sender<ChunkReport<R>>,
    ) where
        F: Fn(&T, usize) -> R,
    {
        tracing::trace!(chunk_index, items = chunk.len(), "chunk worker started");

        let results = chunk
            .iter()
            .map(|item| processor(item, chunk_index))
            .collect();

        if report_tx
            .send(ChunkReport {
                chunk_index,
                results,
            })
            .is_err()
        {
            tracing::warn!(chunk_index, "dispatcher went away before chunk reported");
        }
    }

    /// Blocks until every worker has dropped its sender
    fn collect_reports<R>(
        report_rx: Receiver<ChunkReport<R>>,
        chunk_count: usize,
    ) -> Vec<Option<Vec<R>>> {
        let mut slots: Vec<Option<Vec<R>>> =
            std::iter::repeat_with(|| None).take(chunk_count).collect();

        for report in report_rx.iter() {
            match slots.get_mut(report.chunk_index) {
                Some(slot) => *slot = Some(report.results),
                None => tracing::warn!(
                    chunk_index = report.chunk_index,
                    "discarding report for unknown chunk"
                ),
            }
        }

        slots
    }
}

/// Processes items one at a time on the calling thread
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn execute<T, R, F>(work_items: &[T], processor: F) -> Vec<R>
    where
        F: Fn(&T, usize) -> R,
    {
        // Sequential uses worker_id 0
        work_items.iter().map(|item| processor(item, 0)).collect()
    }
}

/// Execution strategy enum for choosing between sequential and chunked parallel runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: WorkerCount },
}

impl ExecutionStrategy {
    pub fn execute<T, R, F>(&self, work_items: &[T], processor: F) -> Result<Vec<R>, ExecutorError>
    where
        T: Sync,
        R: Send,
        F: Fn(&T, usize) -> R + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => Ok(SequentialExecutor::execute(work_items, processor)),
            ExecutionStrategy::Parallel { workers } => {
                ChunkedExecutor::new(*workers).execute(work_items, processor)
            }
        }
    }

    /// Worker count used by this strategy (1 for sequential)
    pub fn workers(&self) -> WorkerCount {
        match self {
            ExecutionStrategy::Sequential => WorkerCount::ONE,
            ExecutionStrategy::Parallel { workers } => *workers,
        }
    }

    /// Calculate the maximum worker count from available cores and configuration.
    ///
    /// ```text
    /// 1. cores * thread_percentage / 100, at least 1
    /// 2. capped at max_threads_config when it is non-zero
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_worker_count_degrades_to_one() {
        assert_eq!(WorkerCount::new(0).get(), 1);
        assert_eq!(WorkerCount::from(None).get(), 1);
        assert_eq!(WorkerCount::from(Some(0)).get(), 1);
        assert_eq!(WorkerCount::from(Some(6)).get(), 6);
    }

    #[test]
    fn test_chunk_plan_uneven_split() {
        let plan = ChunkPlan::new(10, WorkerCount::new(3));
        assert_eq!(plan.chunk_size(), 4);
        assert_eq!(plan.ranges(), &[0..4, 4..8, 8..10]);
    }

    #[test]
    fn test_chunk_plan_huge_worker_count_is_bounded_by_items() {
        let start = std::time::Instant::now();
        let plan = ChunkPlan::new(4, WorkerCount::new(usize::MAX));
        assert_eq!(plan.chunk_size(), 1);
        assert_eq!(plan.ranges(), &[0..1, 1..2, 2..3, 3..4]);
        assert!(start.elapsed() < Duration::from_secs(1));

        let plan = ChunkPlan::new(0, WorkerCount::new(usize::MAX));
        assert!(plan.is_empty());
    }

    #[test]
    fn test_chunk_plan_more_workers_than_items() {
        let plan = ChunkPlan::new(4, WorkerCount::new(8));
        assert_eq!(plan.chunk_size(), 1);
        assert_eq!(plan.len(), 4);

        // ceil(5/4) = 2 → chunks of 2, 2, 1 and one empty chunk dropped
        let plan = ChunkPlan::new(5, WorkerCount::new(4));
        assert_eq!(plan.chunk_size(), 2);
        assert_eq!(plan.ranges(), &[0..2, 2..4, 4..5]);
    }

    #[test]
    fn test_chunk_plan_empty_input() {
        let plan = ChunkPlan::new(0, WorkerCount::new(4));
        assert_eq!(plan.chunk_size(), 0);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_chunk_plan_covers_every_item_once() {
        for item_count in 0..40usize {
            for workers in 1..12usize {
                let plan = ChunkPlan::new(item_count, WorkerCount::new(workers));
                let items: Vec<usize> = (0..item_count).collect();
                let flattened: Vec<usize> = plan.chunks(&items).flatten().copied().collect();

                assert_eq!(flattened, items, "n={item_count} k={workers}");
                assert_eq!(plan.chunk_size(), item_count.div_ceil(workers));
                if item_count > 0 {
                    let expected = workers.min(item_count.div_ceil(plan.chunk_size()));
                    assert_eq!(plan.len(), expected, "n={item_count} k={workers}");
                }
            }
        }
    }

    #[test]
    fn test_chunked_executor_preserves_order() {
        // Earlier chunks sleep longer so they finish last
        let items: Vec<u64> = (0..12).collect();
        let executor = ChunkedExecutor::new(WorkerCount::new(4));
        let results = executor
            .execute(&items, |x, chunk_index| {
                std::thread::sleep(Duration::from_millis(20 * (4 - chunk_index as u64)));
                x * 2
            })
            .unwrap();

        let expected: Vec<u64> = (0..12).map(|x| x * 2).collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_chunked_executor_passes_chunk_index() {
        let items = vec!["a", "b", "c", "d"];
        let executor = ChunkedExecutor::new(WorkerCount::new(2));
        let results = executor.execute(&items, |_, chunk_index| chunk_index).unwrap();
        assert_eq!(results, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_chunked_executor_empty_input() {
        let items: Vec<u32> = Vec::new();
        let executor = ChunkedExecutor::new(WorkerCount::new(3));
        let results = executor.execute(&items, |x, _| *x).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_chunked_executor_reports_worker_panic() {
        let items = vec![1, 2, 3, 4];
        let executor = ChunkedExecutor::new(WorkerCount::new(2));
        let result = executor.execute(&items, |x, _| {
            if *x == 3 {
                panic!("worker blew up");
            }
            *x
        });

        assert!(matches!(result, Err(ExecutorError::Panicked)));
    }

    #[test]
    fn test_sequential_executor() {
        let work_items = vec![1, 2, 3, 4, 5];
        let results = SequentialExecutor::execute(&work_items, |x, worker_id| {
            assert_eq!(worker_id, 0);
            x * 2
        });
        assert_eq!(results, vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn test_execution_strategy() {
        let work_items = vec![1, 2, 3];

        let sequential = ExecutionStrategy::Sequential;
        let seq_results = sequential.execute(&work_items, |x, _| x * 3).unwrap();
        assert_eq!(seq_results, vec![3, 6, 9]);
        assert_eq!(sequential.workers(), WorkerCount::ONE);

        let parallel = ExecutionStrategy::Parallel {
            workers: WorkerCount::new(2),
        };
        let par_results = parallel.execute(&work_items, |x, _| x * 3).unwrap();
        assert_eq!(par_results, vec![3, 6, 9]);
    }

    #[test]
    fn test_optimal_workers_calculation() {
        assert!(ExecutionStrategy::calculate_optimal_workers(0, 75) >= 1);
        assert!(ExecutionStrategy::calculate_optimal_workers(2, 100) <= 2);
        assert!(ExecutionStrategy::calculate_optimal_workers(0, 1) >= 1);
    }
}
