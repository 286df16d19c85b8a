//! Merging user config, CLI arguments and runtime into a [`ResolvedConfig`]
//!
//! Pure: all inputs are already loaded by the caller. Per field the order is
//! CLI flag, then user config, then built-in default.

use super::{ResolvedConfig, UserConfig};
use crate::cli::args::{BackupArg, ParsedArgs};
use crate::domain::OverwritePolicy;
use crate::error::Result;
use crate::resolve::{resolve_agent_layout, resolve_kiro_dir, resolve_os};
use crate::runtime::EnvRuntime;

/// Backup directory used when `--backup` is given without a path
pub const DEFAULT_BACKUP_DIR: &str = ".cc-sdd.backup";

pub fn resolve_config(
    user: &UserConfig,
    args: &ParsedArgs,
    runtime: &EnvRuntime,
) -> Result<ResolvedConfig> {
    let agent = args.agent.or(user.agent).unwrap_or_default();
    let lang = args.lang.or(user.lang).unwrap_or_default();
    let os = args.os.or(user.os).unwrap_or_default();
    let profile = args.profile.or(user.profile).unwrap_or_default();

    let kiro_dir = resolve_kiro_dir(args.kiro_dir.as_deref(), user.kiro_dir.as_deref())?;
    let layout = resolve_agent_layout(agent, &user.agent_layouts);

    let requested = args.overwrite.or(user.overwrite).unwrap_or_default();
    let effective_overwrite = effective_overwrite(requested, args.yes);

    let (backup_enabled, backup_dir) = match &args.backup {
        Some(BackupArg::Dir(dir)) => (true, dir.clone()),
        Some(BackupArg::Enabled) => (true, default_backup_dir(user)),
        None => (false, default_backup_dir(user)),
    };

    Ok(ResolvedConfig {
        agent,
        lang,
        resolved_os: resolve_os(os, runtime),
        kiro_dir,
        layout,
        effective_overwrite,
        backup_enabled,
        backup_dir,
        profile,
    })
}

/// `--yes` only turns `prompt` into `force`; explicit `skip`/`force` stay.
fn effective_overwrite(requested: OverwritePolicy, yes: bool) -> OverwritePolicy {
    match requested {
        OverwritePolicy::Prompt if yes => OverwritePolicy::Force,
        other => other,
    }
}

fn default_backup_dir(user: &UserConfig) -> String {
    user.backup_dir
        .clone()
        .unwrap_or_else(|| DEFAULT_BACKUP_DIR.to_string())
}
