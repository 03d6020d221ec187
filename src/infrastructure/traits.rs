//! I/O boundary traits for testability
//!
//! These traits abstract reading puzzle input, allowing services
//! to be tested with in-memory implementations.

use std::io::{self, Read};
use std::path::Path;

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Source of puzzle input text.
pub trait InputSource: Send + Sync {
    /// Read the whole input behind `path` to a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads files from disk, or stdin for `-`.
pub struct RealInputSource;

impl InputSource for RealInputSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        if path == Path::new(STDIN_PATH) {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        } else {
            std::fs::read_to_string(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_existing_file_when_reading_then_returns_contents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.txt");
        std::fs::write(&path, "[1,2]\n").unwrap();

        let content = RealInputSource.read_to_string(&path).unwrap();

        assert_eq!(content, "[1,2]\n");
    }

    #[test]
    fn given_missing_file_when_reading_then_not_found() {
        let temp = TempDir::new().unwrap();
        let err = RealInputSource
            .read_to_string(&temp.path().join("missing.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
