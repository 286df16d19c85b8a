//! Configuration for a single run
//!
//! This module handles:
//! - The persisted user configuration (`.cc-sdd.json`) via [`store`]
//! - Merging user config, CLI arguments and runtime into a
//!   [`ResolvedConfig`] via [`merge`]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Agent, Lang, OsTarget, OsType, OverwritePolicy, Profile};
use crate::resolve::{AgentLayout, AgentLayoutOverride};

pub mod merge;
pub mod store;

pub use merge::{DEFAULT_BACKUP_DIR, resolve_config};
pub use store::{USER_CONFIG_FILE, load_user_config, save_user_config};

/// Persisted user configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<Lang>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kiro_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<OverwritePolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// Per-agent layout overrides
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub agent_layouts: BTreeMap<Agent, AgentLayoutOverride>,
}

/// Fully resolved settings for one invocation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub agent: Agent,
    pub lang: Lang,
    pub resolved_os: OsType,
    pub kiro_dir: String,
    pub layout: AgentLayout,
    pub effective_overwrite: OverwritePolicy,
    pub backup_enabled: bool,
    pub backup_dir: String,
    pub profile: Profile,
}
