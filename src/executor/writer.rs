//! Destination writes with conflict handling
//!
//! For every destination:
//! 1. missing -> create parent dirs, write, count written
//! 2. exists + `skip` -> count skipped
//! 3. exists + `force` -> back up if enabled, overwrite, count written
//! 4. exists + `prompt` -> ask the resolver (no resolver means skip);
//!    an `Overwrite` answer then proceeds as in 3
//!
//! Destinations outside the working directory are rejected before any of
//! the above.

use std::path::{Component, Path, PathBuf};

use super::{ConflictDecision, ConflictResolver, ExecSummary};
use crate::config::ResolvedConfig;
use crate::domain::OverwritePolicy;
use crate::error::{Result, fs::read_error, fs::write_error, fs::write_failed};

const OUTSIDE_CWD: &str = "destination is outside the working directory";

pub(crate) struct Writer<'a> {
    cwd: PathBuf,
    policy: OverwritePolicy,
    backup_root: Option<PathBuf>,
    on_conflict: Option<&'a mut dyn ConflictResolver>,
    summary: ExecSummary,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(
        config: &ResolvedConfig,
        cwd: &Path,
        on_conflict: Option<&'a mut dyn ConflictResolver>,
    ) -> Self {
        let backup_root = config.backup_enabled.then(|| cwd.join(&config.backup_dir));
        Self {
            cwd: cwd.to_path_buf(),
            policy: config.effective_overwrite,
            backup_root,
            on_conflict,
            summary: ExecSummary::default(),
        }
    }

    pub(crate) fn summary(&self) -> ExecSummary {
        self.summary
    }

    pub(crate) fn write(&mut self, dest: &Path, contents: &[u8]) -> Result<()> {
        let rel = self.relative(dest)?;

        if dest.exists() && !self.should_overwrite(&rel)? {
            tracing::info!(path = %rel, "skipped existing file");
            self.summary.skipped += 1;
            return Ok(());
        }

        if dest.exists() {
            self.backup(dest, &rel)?;
        }

        ensure_parent_dir(dest)?;
        std::fs::write(dest, contents).map_err(|e| write_error(dest, &e))?;
        tracing::info!(path = %rel, "wrote file");
        self.summary.written += 1;
        Ok(())
    }

    fn should_overwrite(&mut self, rel: &str) -> Result<bool> {
        match self.policy {
            OverwritePolicy::Skip => Ok(false),
            OverwritePolicy::Force => Ok(true),
            OverwritePolicy::Prompt => match self.on_conflict.as_deref_mut() {
                Some(resolver) => Ok(resolver.resolve(rel)? == ConflictDecision::Overwrite),
                None => Ok(false),
            },
        }
    }

    fn backup(&self, dest: &Path, rel: &str) -> Result<()> {
        let Some(root) = &self.backup_root else {
            return Ok(());
        };
        let target = root.join(rel);
        ensure_parent_dir(&target)?;
        let bytes = std::fs::read(dest).map_err(|e| read_error(dest, &e))?;
        std::fs::write(&target, bytes).map_err(|e| write_error(&target, &e))?;
        tracing::debug!(from = %dest.display(), to = %target.display(), "backed up");
        Ok(())
    }

    /// Destination relative to the working directory, `/`-separated.
    ///
    /// `..` is resolved lexically; a destination outside the working
    /// directory is an error.
    fn relative(&self, dest: &Path) -> Result<String> {
        let outside = || write_failed(dest.display().to_string(), OUTSIDE_CWD);
        let rel = dest.strip_prefix(&self.cwd).map_err(|_| outside())?;

        let mut parts = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy()),
                Component::CurDir => {}
                Component::ParentDir => {
                    parts.pop().ok_or_else(outside)?;
                }
                Component::RootDir | Component::Prefix(_) => return Err(outside()),
            }
        }
        Ok(parts.join("/"))
    }
}

/// Ensure parent directory exists for a path
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_error(parent, &e))?;
    }
    Ok(())
}
