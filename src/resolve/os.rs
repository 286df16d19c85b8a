//! OS resolution

use crate::domain::{OsTarget, OsType};
use crate::runtime::EnvRuntime;

/// Resolve the requested OS target to a concrete OS.
///
/// Explicit targets are returned unchanged. `auto` inspects the runtime
/// platform; unrecognized platforms fall back to Linux, which is a
/// simplification rather than an error.
pub fn resolve_os(input: OsTarget, runtime: &EnvRuntime) -> OsType {
    match input {
        OsTarget::Mac => OsType::Mac,
        OsTarget::Windows => OsType::Windows,
        OsTarget::Linux => OsType::Linux,
        OsTarget::Auto => os_from_platform(&runtime.platform),
    }
}

fn os_from_platform(platform: &str) -> OsType {
    match platform {
        "darwin" | "macos" => OsType::Mac,
        "win32" | "windows" => OsType::Windows,
        "linux" => OsType::Linux,
        other => {
            tracing::debug!(platform = other, "unknown platform, assuming linux");
            OsType::Linux
        }
    }
}
