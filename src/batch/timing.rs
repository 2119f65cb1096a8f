use serde::Serialize;
use std::time::Instant;

use super::types::RunResult;

/// Run `f` and return its value with the elapsed wall time in milliseconds
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, u64) {
    let start_time = Instant::now();
    let value = f();
    (value, start_time.elapsed().as_millis() as u64)
}

/// Response shape handed back to ingress callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub message: String,
    pub processing_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
}

impl BatchResponse {
    pub fn sequential(run: &RunResult) -> Self {
        Self {
            message: "single-thread run completed".to_string(),
            processing_time: run.processing_time(),
            results: None,
        }
    }

    pub fn parallel(run: &RunResult) -> Self {
        Self {
            message: "multi-thread run completed".to_string(),
            processing_time: run.processing_time(),
            results: Some(run.messages()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::types::FileOutcome;
    use std::time::Duration;

    #[test]
    fn test_timed_measures_elapsed() {
        let (value, elapsed) = timed(|| {
            std::thread::sleep(Duration::from_millis(15));
            "done"
        });
        assert_eq!(value, "done");
        assert!(elapsed >= 15);
    }

    #[test]
    fn test_response_json_shape() {
        let run = RunResult {
            outcomes: vec![FileOutcome::success("a.txt", 3)],
            elapsed_millis: 7,
        };

        let single = serde_json::to_value(BatchResponse::sequential(&run)).unwrap();
        assert_eq!(single["processingTime"], "7 ms");
        assert!(single.get("results").is_none());

        let multi = serde_json::to_value(BatchResponse::parallel(&run)).unwrap();
        assert_eq!(multi["results"][0], "processed: a.txt");
    }
}
