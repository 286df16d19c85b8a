//! Core enumerations shared by the CLI, the user config and manifests
//!
//! Every enum here has one canonical string form. That form is used for
//! command-line values, JSON config values and manifest `when` predicates.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported AI coding agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize, ValueEnum)]
pub enum Agent {
    #[default]
    #[serde(rename = "claude-code")]
    #[value(name = "claude-code")]
    ClaudeCode,
    #[serde(rename = "gemini-cli")]
    #[value(name = "gemini-cli")]
    GeminiCli,
    #[serde(rename = "qwen-code")]
    #[value(name = "qwen-code")]
    QwenCode,
}

impl Agent {
    pub const ALL: [Agent; 3] = [Agent::ClaudeCode, Agent::GeminiCli, Agent::QwenCode];

    pub fn as_str(self) -> &'static str {
        match self {
            Agent::ClaudeCode => "claude-code",
            Agent::GeminiCli => "gemini-cli",
            Agent::QwenCode => "qwen-code",
        }
    }
}

/// Output language of the generated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Lang {
    #[serde(rename = "ja")]
    #[value(name = "ja")]
    Ja,
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    En,
    #[serde(rename = "zh-TW")]
    #[value(name = "zh-TW")]
    ZhTw,
}

impl Lang {
    pub fn as_str(self) -> &'static str {
        match self {
            Lang::Ja => "ja",
            Lang::En => "en",
            Lang::ZhTw => "zh-TW",
        }
    }
}

/// Requested operating system, possibly `auto`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OsTarget {
    #[default]
    Auto,
    Mac,
    Windows,
    Linux,
}

impl OsTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            OsTarget::Auto => "auto",
            OsTarget::Mac => "mac",
            OsTarget::Windows => "windows",
            OsTarget::Linux => "linux",
        }
    }
}

/// Concrete operating system after `auto` resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsType {
    Mac,
    Windows,
    Linux,
}

impl OsType {
    pub fn as_str(self) -> &'static str {
        match self {
            OsType::Mac => "mac",
            OsType::Windows => "windows",
            OsType::Linux => "linux",
        }
    }
}

/// What to do when a destination file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OverwritePolicy {
    #[default]
    Prompt,
    Skip,
    Force,
}

impl OverwritePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            OverwritePolicy::Prompt => "prompt",
            OverwritePolicy::Skip => "skip",
            OverwritePolicy::Force => "force",
        }
    }
}

/// Manifest variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Full,
    Minimal,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Minimal => "minimal",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

impl_display_as_str!(Agent, Lang, OsTarget, OsType, OverwritePolicy, Profile);
