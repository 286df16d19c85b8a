//! Manifest errors

use super::SddError;

/// Creates a manifest not found error
pub fn not_found(path: impl Into<String>) -> SddError {
    SddError::ManifestNotFound { path: path.into() }
}

/// Creates a manifest JSON parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> SddError {
    SddError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a manifest validation error
pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> SddError {
    SddError::ManifestInvalid {
        path: path.into(),
        message: message.into(),
    }
}
