//! Error types and handling for cc-sdd
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`usage`]: Command-line usage errors
//! - [`config`]: Configuration errors
//! - [`manifest`]: Manifest errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod manifest;
pub mod usage;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cc-sdd operations
#[derive(Error, Diagnostic, Debug)]
pub enum SddError {
    // Usage errors
    #[error("Unknown flag: {flag}")]
    #[diagnostic(code(cc_sdd::usage::unknown_flag), help("Run 'cc-sdd --help' for usage"))]
    UnknownFlag { flag: String },

    #[error("Unknown positional argument: {arg}")]
    #[diagnostic(
        code(cc_sdd::usage::unknown_positional),
        help("cc-sdd takes no positional arguments")
    )]
    UnknownPositional { arg: String },

    #[error("Invalid value for --{flag}: {value} (expected one of: {allowed})")]
    #[diagnostic(code(cc_sdd::usage::invalid_value))]
    InvalidFlagValue {
        flag: String,
        value: String,
        allowed: String,
    },

    #[error("Missing value for --{flag}")]
    #[diagnostic(code(cc_sdd::usage::missing_value))]
    MissingFlagValue { flag: String },

    #[error("agent flag conflict between multiple agent selections: {agents}")]
    #[diagnostic(
        code(cc_sdd::usage::agent_conflict),
        help("Select a single agent with --agent or one of --claude-code, --gemini-cli, --qwen-code")
    )]
    AgentConflict { agents: String },

    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(cc_sdd::usage::invalid))]
    InvalidArguments { message: String },

    // Configuration errors
    #[error("Invalid kiro directory '{path}': {reason}")]
    #[diagnostic(
        code(cc_sdd::config::invalid_kiro_dir),
        help("Use a relative path made of letters, digits, '.', '_', '-' and '/'")
    )]
    InvalidKiroDir { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(cc_sdd::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(cc_sdd::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to write configuration file: {path}: {reason}")]
    #[diagnostic(code(cc_sdd::config::write_failed))]
    ConfigWriteFailed { path: String, reason: String },

    // Manifest errors
    #[error("Manifest not found: {path}")]
    #[diagnostic(
        code(cc_sdd::manifest::not_found),
        help("Pass --manifest <path> or check the templates directory")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to parse manifest JSON: {path}: {reason}")]
    #[diagnostic(code(cc_sdd::manifest::parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest {path}: {message}")]
    #[diagnostic(code(cc_sdd::manifest::invalid))]
    ManifestInvalid { path: String, message: String },

    // Render errors
    #[error("Invalid JSON after template substitution: {reason}")]
    #[diagnostic(
        code(cc_sdd::render::invalid_json),
        help("Check the placeholder values substituted into the JSON template")
    )]
    InvalidRenderedJson { reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(cc_sdd::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(cc_sdd::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    // Prompt errors
    #[error("Failed to read answer: {message}")]
    #[diagnostic(code(cc_sdd::prompt::failed))]
    PromptFailed { message: String },
}

impl From<walkdir::Error> for SddError {
    fn from(err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        SddError::FileReadFailed {
            path,
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SddError {
    fn from(err: inquire::InquireError) -> Self {
        SddError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SddError>;
