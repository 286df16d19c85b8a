//! File system errors

use std::path::Path;

use super::SddError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub(crate) fn read_error(path: &Path, e: &std::io::Error) -> SddError {
    read_failed(path.display().to_string(), e.to_string())
}

pub(crate) fn write_error(path: &Path, e: &std::io::Error) -> SddError {
    write_failed(path.display().to_string(), e.to_string())
}
