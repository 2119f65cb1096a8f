use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::batch::{BatchError, BatchRequest};

/// File names to process, given inline or as a JSON request body
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// File names to locate and read
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,

    /// JSON request body `{ "fileNames": [...], "threads": K }` (`-` reads stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "files")]
    pub request: Option<String>,
}

impl InputArgs {
    /// Build the validated request. An explicit `threads` value wins over the
    /// one in the request body.
    pub async fn load(&self, threads: Option<usize>) -> Result<BatchRequest> {
        let mut request = match &self.request {
            Some(source) => BatchRequest::from_json_str(&read_source(source).await?)?,
            None if self.files.is_empty() => {
                return Err(BatchError::invalid_input(
                    "no file names given (pass FILE arguments or --request)",
                )
                .into());
            }
            None => BatchRequest::from_names(self.files.iter().cloned(), threads)?,
        };

        if let Some(threads) = threads {
            request.workers = threads.into();
        }

        Ok(request)
    }
}

/// Read a path, or stdin for `-`
pub(crate) async fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        read_request_body(tokio::io::stdin())
            .await
            .context("Failed to read request from stdin")
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read {source}"))
    }
}

async fn read_request_body<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<String> {
    let mut body = String::new();
    reader.read_to_string(&mut body).await?;
    Ok(body)
}
