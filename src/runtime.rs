//! Process environment captured once per invocation

use std::io::IsTerminal;

/// Platform facts the resolvers and the orchestrator depend on.
///
/// Kept as plain data so tests can construct any platform without touching
/// the real process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvRuntime {
    /// Platform identifier, e.g. `linux`, `macos`, `windows`, `darwin`, `win32`
    pub platform: String,
    /// Whether both stdin and stdout are attached to a terminal
    pub interactive: bool,
}

impl EnvRuntime {
    /// Capture the runtime of the current process
    pub fn current() -> Self {
        Self {
            platform: std::env::consts::OS.to_string(),
            interactive: std::io::stdin().is_terminal() && std::io::stdout().is_terminal(),
        }
    }

    /// A non-interactive runtime for the given platform
    pub fn with_platform(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            interactive: false,
        }
    }
}

impl Default for EnvRuntime {
    fn default() -> Self {
        Self::current()
    }
}
