//! Configuration errors

use super::SddError;

/// Creates an invalid kiro directory error
pub fn invalid_kiro_dir(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::InvalidKiroDir {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::ConfigWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
