use serde_json::Value;

use super::error::BatchError;
use super::types::FileTask;
use crate::parallel::WorkerCount;

/// Validated ingress payload: `{ "fileNames": [...], "threads": K }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub tasks: Vec<FileTask>,
    pub workers: WorkerCount,
}

impl BatchRequest {
    pub fn new(tasks: Vec<FileTask>, workers: WorkerCount) -> Self {
        Self { tasks, workers }
    }

    /// Build a request from a JSON body.
    ///
    /// `fileNames` must be an array of non-empty strings. `threads` degrades to a
    /// single worker when missing, zero, negative or not a number.
    pub fn from_json(body: &Value) -> Result<Self, BatchError> {
        let names = body
            .get("fileNames")
            .ok_or_else(|| BatchError::invalid_input("an array of file names is required"))?
            .as_array()
            .ok_or_else(|| BatchError::invalid_input("fileNames must be an array"))?;

        let tasks = names
            .iter()
            .enumerate()
            .map(|(index, value)| match value.as_str() {
                Some("") => Err(BatchError::invalid_input(format!(
                    "fileNames[{index}] is empty"
                ))),
                Some(name) => Ok(FileTask::new(name)),
                None => Err(BatchError::invalid_input(format!(
                    "fileNames[{index}] is not a string"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            tasks,
            workers: parse_worker_count(body.get("threads")),
        })
    }

    /// Parse a JSON body from text
    pub fn from_json_str(body: &str) -> Result<Self, BatchError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| BatchError::invalid_input(format!("malformed request body: {e}")))?;
        Self::from_json(&value)
    }

    /// Build a request from plain names, applying the same validation as JSON bodies
    pub fn from_names<I, S>(names: I, workers: Option<usize>) -> Result<Self, BatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tasks = FileTask::from_names(names);
        if let Some(index) = tasks.iter().position(|task| task.name.is_empty()) {
            return Err(BatchError::invalid_input(format!(
                "file name at position {index} is empty"
            )));
        }
        Ok(Self::new(tasks, WorkerCount::from(workers)))
    }
}

/// Interpret an optional `threads` value the lenient way ingress callers expect.
///
/// Numbers and numeric strings are accepted; anything else means one worker.
pub fn parse_worker_count(threads: Option<&Value>) -> WorkerCount {
    let requested = match threads {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    WorkerCount::from(requested.and_then(|n| usize::try_from(n).ok()))
}
