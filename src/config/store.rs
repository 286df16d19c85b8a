//! Loading and saving the user configuration file

use std::path::Path;

use super::UserConfig;
use crate::error::{Result, config};

/// Config file name, looked up in the working directory
pub const USER_CONFIG_FILE: &str = ".cc-sdd.json";

/// Load the user configuration from `cwd`.
///
/// A missing file is an empty configuration; malformed JSON is an error.
pub fn load_user_config(cwd: &Path) -> Result<UserConfig> {
    let path = cwd.join(USER_CONFIG_FILE);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no user config, using defaults");
            return Ok(UserConfig::default());
        }
        Err(e) => return Err(config::read_failed(path.display().to_string(), e.to_string())),
    };

    serde_json::from_str(&content)
        .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))
}

/// Write the user configuration to `cwd` as pretty JSON
pub fn save_user_config(cwd: &Path, cfg: &UserConfig) -> Result<()> {
    let path = cwd.join(USER_CONFIG_FILE);

    let mut json = serde_json::to_string_pretty(cfg)
        .map_err(|e| config::write_failed(path.display().to_string(), e.to_string()))?;
    json.push('\n');

    std::fs::write(&path, json)
        .map_err(|e| config::write_failed(path.display().to_string(), e.to_string()))
}
