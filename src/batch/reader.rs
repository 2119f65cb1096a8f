use std::path::Path;

use super::error::ReadError;

/// Read the whole file into memory and return how many bytes it held.
///
/// The contents are dropped immediately; only success or failure matters.
pub fn read_file(path: &Path) -> Result<u64, ReadError> {
    let bytes = std::fs::read(path).map_err(|source| ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes.len() as u64)
}
