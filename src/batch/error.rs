use std::path::PathBuf;
use thiserror::Error;

use crate::parallel::ExecutorError;

/// File absent from every candidate directory
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("file not found in any search directory: {name}")]
pub struct NotFoundError {
    pub name: String,
}

/// I/O failure while reading a located file
#[derive(Debug, Error)]
#[error("failed to read {}: {source}", .path.display())]
pub struct ReadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Top-level failures of a batch run.
///
/// Per-file problems never show up here; they are recorded as outcomes.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("worker fault: {0}")]
    WorkerFault(#[from] ExecutorError),
}

impl BatchError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        BatchError::InvalidInput(message.into())
    }
}
