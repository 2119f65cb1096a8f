use std::path::{Path, PathBuf};

use super::error::NotFoundError;

/// Ordered list of candidate directories, shared read-only by every run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPaths {
    directories: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve relative directories against `base_dir`; absolute ones are kept as-is
    pub fn resolve_against<I, P>(base_dir: &Path, directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            directories: directories
                .into_iter()
                .map(|dir| base_dir.join(dir.as_ref()))
                .collect(),
        }
    }

    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}

/// Resolves bare file names by probing [`SearchPaths`] in declared order
#[derive(Debug, Clone)]
pub struct FileLocator {
    search_paths: SearchPaths,
}

impl FileLocator {
    pub fn new(search_paths: SearchPaths) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.search_paths
    }

    /// Return the first candidate path that exists
    pub fn locate(&self, file_name: &str) -> Result<PathBuf, NotFoundError> {
        if file_name.is_empty() {
            return Err(NotFoundError {
                name: file_name.to_string(),
            });
        }

        for directory in self.search_paths.directories() {
            let candidate = directory.join(file_name);
            if candidate.exists() {
                tracing::trace!("Located {} at {}", file_name, candidate.display());
                return Ok(candidate);
            }
        }

        Err(NotFoundError {
            name: file_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, FileLocator) {
        let temp_dir = TempDir::new().unwrap();
        for dir in ["uploads", "files", "files2"] {
            fs::create_dir(temp_dir.path().join(dir)).unwrap();
        }
        let locator = FileLocator::new(SearchPaths::resolve_against(
            temp_dir.path(),
            ["uploads", "files", "files2"],
        ));
        (temp_dir, locator)
    }

    #[test]
    fn test_first_existing_directory_wins() {
        let (temp_dir, locator) = fixture();
        fs::write(temp_dir.path().join("files/a.txt"), "secondary").unwrap();
        fs::write(temp_dir.path().join("files2/a.txt"), "tertiary").unwrap();

        let path = locator.locate("a.txt").unwrap();
        assert_eq!(path, temp_dir.path().join("files/a.txt"));

        fs::write(temp_dir.path().join("uploads/a.txt"), "primary").unwrap();
        let path = locator.locate("a.txt").unwrap();
        assert_eq!(path, temp_dir.path().join("uploads/a.txt"));
    }

    #[test]
    fn test_falls_back_to_last_directory() {
        let (temp_dir, locator) = fixture();
        fs::write(temp_dir.path().join("files2/only.txt"), "x").unwrap();

        let path = locator.locate("only.txt").unwrap();
        assert_eq!(path, temp_dir.path().join("files2/only.txt"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_temp_dir, locator) = fixture();
        let err = locator.locate("ghost.txt").unwrap_err();
        assert_eq!(err.name, "ghost.txt");
    }

    #[test]
    fn test_empty_name_is_not_found() {
        let (_temp_dir, locator) = fixture();
        assert!(locator.locate("").is_err());
    }

    #[test]
    fn test_no_search_directories() {
        let locator = FileLocator::new(SearchPaths::default());
        assert!(locator.search_paths().is_empty());
        assert!(locator.locate("a.txt").is_err());
    }

    #[test]
    fn test_resolve_keeps_absolute_directories() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("abs");
        let paths = SearchPaths::resolve_against(Path::new("/base"), [absolute.clone()]);
        assert_eq!(paths.directories(), &[absolute]);
    }
}
