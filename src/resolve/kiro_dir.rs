//! Validation of the kiro output directory

use crate::error::{Result, config::invalid_kiro_dir};

/// Directory used when neither the CLI nor the config names one
pub const DEFAULT_KIRO_DIR: &str = ".kiro";

/// Resolve and validate the kiro directory.
///
/// Precedence is `flag`, then `config`, then [`DEFAULT_KIRO_DIR`]. The result
/// is a relative path with `.` and empty segments removed.
pub fn resolve_kiro_dir(flag: Option<&str>, config: Option<&str>) -> Result<String> {
    let raw = flag.or(config).unwrap_or(DEFAULT_KIRO_DIR);
    validate(raw)
}

fn validate(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(invalid_kiro_dir(raw, "path must not be empty"));
    }

    if raw.starts_with('/') || raw.starts_with('\\') || has_drive_prefix(raw) {
        return Err(invalid_kiro_dir(raw, "path must be relative"));
    }

    if let Some(bad) = raw
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-')))
    {
        return Err(invalid_kiro_dir(
            raw,
            format!("character '{bad}' is not allowed"),
        ));
    }

    let segments: Vec<&str> = raw
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    if segments.contains(&"..") {
        return Err(invalid_kiro_dir(raw, "path traversal ('..') is not allowed"));
    }

    if segments.is_empty() {
        return Err(invalid_kiro_dir(raw, "path must not be empty"));
    }

    Ok(segments.join("/"))
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SddError;

    #[test]
    fn test_default_when_unset() {
        assert_eq!(resolve_kiro_dir(None, None).unwrap(), ".kiro");
    }

    #[test]
    fn test_flag_beats_config() {
        let dir = resolve_kiro_dir(Some("docs/kiro"), Some(".specs")).unwrap();
        assert_eq!(dir, "docs/kiro");
        assert_eq!(resolve_kiro_dir(None, Some(".specs")).unwrap(), ".specs");
    }

    #[test]
    fn test_normalizes_segments() {
        assert_eq!(resolve_kiro_dir(Some("./a//b/"), None).unwrap(), "a/b");
    }

    #[test]
    fn test_rejects_traversal() {
        let err = resolve_kiro_dir(Some("../evil"), None).unwrap_err();
        assert!(matches!(err, SddError::InvalidKiroDir { .. }));
        assert!(err.to_string().contains("traversal"));
        assert!(resolve_kiro_dir(Some("a/../../b"), None).is_err());
    }

    #[test]
    fn test_rejects_absolute() {
        assert!(resolve_kiro_dir(Some("/etc/kiro"), None).is_err());
        assert!(resolve_kiro_dir(Some("\\kiro"), None).is_err());
    }

    #[test]
    fn test_rejects_bad_characters() {
        let err = resolve_kiro_dir(Some("my kiro"), None).unwrap_err();
        assert!(err.to_string().contains("not allowed"));
        assert!(resolve_kiro_dir(Some("C:kiro"), None).is_err());
        assert!(resolve_kiro_dir(Some("a\\b"), None).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(resolve_kiro_dir(Some(""), None).is_err());
        assert!(resolve_kiro_dir(Some("./"), None).is_err());
    }
}
