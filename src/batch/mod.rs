//! Batch file-processing engine
//!
//! Given a list of file names, the engine resolves each one against an ordered
//! list of candidate directories, reads it fully into memory and records a
//! [`FileOutcome`]. Two runners share that per-file step:
//!
//! - [`BatchEngine::run_sequential`]: one file in flight at a time, the baseline
//! - [`BatchEngine::run_parallel`]: contiguous chunks processed concurrently,
//!   outcomes reassembled in input order
//!
//! Per-file failures (`NotFound`, `ReadError`) are always captured as outcomes.
//! Only a failure of the execution substrate surfaces as [`BatchError::WorkerFault`].

pub mod engine;
pub mod error;
pub mod locator;
pub mod reader;
pub mod request;
pub mod timing;
pub mod types;

pub use engine::BatchEngine;
pub use error::{BatchError, NotFoundError, ReadError};
pub use locator::{FileLocator, SearchPaths};
pub use request::BatchRequest;
pub use timing::BatchResponse;
pub use types::{FileOutcome, FileTask, OutcomeStatus, RunResult};
