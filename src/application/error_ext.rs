//! Error conversion helpers for reading puzzle input
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::DomainResult;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// input.read_to_string(&path)
    ///     .with_path_context("read input", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait attaching a 1-based input line number to domain errors.
pub trait LineResultExt<T> {
    fn at_line(self, line: usize) -> ApplicationResult<T>;
}

impl<T> LineResultExt<T> for DomainResult<T> {
    fn at_line(self, line: usize) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::InvalidLine { line, source })
    }
}
