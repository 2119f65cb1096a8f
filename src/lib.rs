//! # filebench - sequential vs parallel file read benchmarking
//!
//! filebench takes a list of file names, resolves each one across an ordered set
//! of search directories, reads it fully into memory and reports how long the
//! whole batch took. The same batch can be run:
//!
//! - **Sequentially**: one file in flight at a time, the baseline
//! - **In parallel**: split into `ceil(N / K)`-sized contiguous chunks, one worker
//!   per chunk, with outcomes reassembled in input order
//!
//! Individual missing or unreadable files are recorded as outcomes and never
//! abort a run.
//!
//! ## Quick Start
//!
//! ```bash
//! # Baseline
//! filebench single a.txt b.txt c.txt
//!
//! # Four workers
//! filebench multi --threads 4 a.txt b.txt c.txt
//!
//! # Compare and save a report under ./results
//! filebench compare --threads 2,4,8 --save a.txt b.txt c.txt
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use filebench::batch::{BatchEngine, FileTask, SearchPaths};
//! use filebench::parallel::WorkerCount;
//!
//! let engine = BatchEngine::new(SearchPaths::new(["uploads", "files", "files2"]));
//! let tasks = FileTask::from_names(["a.txt", "b.txt"]);
//!
//! let baseline = engine.run_sequential(&tasks);
//! let parallel = engine.run_parallel(&tasks, WorkerCount::new(2))?;
//! println!("{} vs {}", baseline.processing_time(), parallel.processing_time());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod parallel;
pub mod report;

pub use batch::{BatchEngine, BatchError, RunResult};
pub use config::{FilebenchConfig, Settings};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
