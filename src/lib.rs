//! cc-sdd - spec-driven development installer
//!
//! Installs agent command files, steering documents and settings for an AI
//! coding agent into a project. Installation is driven by a manifest of
//! artifacts which are filtered, rendered and written under an overwrite
//! policy.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod executor;
pub mod manifest;
pub mod plan_printer;
pub mod resolve;
pub mod runtime;
pub mod template;

pub use error::{Result, SddError};
