//! Generic chunked execution framework
//!
//! This module owns the concurrency substrate used by the batch engine. It knows
//! nothing about files: it partitions a slice of work items, runs them, and hands
//! the results back in input order.
//!
//! # Architecture Responsibilities
//!
//! ## What This Module Does:
//! - **Partitioning**: Splits work into contiguous chunks of `ceil(N / K)` items ([`ChunkPlan`])
//! - **Execution Strategy**: Sequential vs chunked parallel execution ([`ExecutionStrategy`])
//! - **Coordination**: One scoped thread per non-empty chunk, reporting over a crossbeam channel
//! - **Join Semantics**: Returns only after every chunk has reported, or fails as a whole
//! - **Resource Calculation**: CPU-aware worker limits via `num_cpus`
//!
//! ## What This Module Does NOT Do:
//! - **Work Stealing**: Chunk assignment is static and computed once up front
//! - **Per-item Error Handling**: Processors fold item failures into their own result type
//! - **Retries or Timeouts**: A run completes or fails outright
//!
//! ```text
//! ┌──────────────┐   chunk 0   ┌──────────┐
//! │              │────────────▶│ worker 0 │──┐
//! │  Dispatcher  │   chunk 1   ┌──────────┐  │ ChunkReport { chunk_index, results }
//! │              │────────────▶│ worker 1 │──┤
//! │ slots[i] ◀───┼─────────────┴──────────┘  │
//! └──────────────┘◀───────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use filebench::parallel::{ExecutionStrategy, WorkerCount};
//!
//! let strategy = ExecutionStrategy::Parallel { workers: WorkerCount::new(2) };
//! let doubled = strategy.execute(&[1, 2, 3, 4], |x, _chunk| x * 2).unwrap();
//! assert_eq!(doubled, vec![2, 4, 6, 8]);
//! ```

pub mod core;

pub use core::{
    ChunkPlan, ChunkedExecutor, ExecutionStrategy, ExecutorError, SequentialExecutor, WorkerCount,
};
