use serde::Serialize;

use super::error::{NotFoundError, ReadError};

/// A single file name to locate and read
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileTask {
    pub name: String,
}

impl FileTask {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Build tasks from names, keeping their order
    pub fn from_names<I, S>(names: I) -> Vec<FileTask>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(FileTask::new).collect()
    }
}

impl From<&str> for FileTask {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FileTask {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    NotFound,
    ReadError,
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutcomeStatus::Success => "success",
            OutcomeStatus::NotFound => "not found",
            OutcomeStatus::ReadError => "read error",
        };
        f.write_str(label)
    }
}

/// Result of processing one [`FileTask`]; produced exactly once per task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub name: String,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Bytes read into memory, 0 unless the read succeeded
    pub bytes_read: u64,
}

impl FileOutcome {
    pub fn success(name: impl Into<String>, bytes_read: u64) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::Success,
            detail: None,
            bytes_read,
        }
    }

    pub fn not_found(error: NotFoundError) -> Self {
        let detail = error.to_string();
        Self {
            name: error.name,
            status: OutcomeStatus::NotFound,
            detail: Some(detail),
            bytes_read: 0,
        }
    }

    pub fn read_failed(name: impl Into<String>, error: &ReadError) -> Self {
        Self {
            name: name.into(),
            status: OutcomeStatus::ReadError,
            detail: Some(error.to_string()),
            bytes_read: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// One-line message reported back to callers
    pub fn message(&self) -> String {
        if self.is_success() {
            format!("processed: {}", self.name)
        } else {
            format!("failed: {}", self.name)
        }
    }
}

/// Ordered outcomes of one run plus the wall time it took
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub outcomes: Vec<FileOutcome>,
    pub elapsed_millis: u64,
}

impl RunResult {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.outcomes.iter().map(|o| o.bytes_read).sum()
    }

    pub fn messages(&self) -> Vec<String> {
        self.outcomes.iter().map(FileOutcome::message).collect()
    }

    /// Elapsed time formatted as `"<N> ms"`
    pub fn processing_time(&self) -> String {
        format!("{} ms", self.elapsed_millis)
    }

    /// `(name, status)` pairs, the part of a run that is stable across repeats
    pub fn statuses(&self) -> Vec<(&str, OutcomeStatus)> {
        self.outcomes
            .iter()
            .map(|o| (o.name.as_str(), o.status))
            .collect()
    }
}
