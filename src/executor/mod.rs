//! Plan execution against the filesystem
//!
//! This module handles:
//! - Expanding each processed artifact into (source -> destination) pairs
//! - Rendering templates and copying static files
//! - Applying the overwrite policy, backups and conflict prompts via [`writer`]
//!
//! Execution is sequential in plan order; inside directory artifacts files
//! are visited in file-name order. A failure aborts the run and files
//! already written are left in place.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::ResolvedConfig;
use crate::error::{Result, fs::read_error};
use crate::manifest::{ProcessedArtifact, ProcessedSource, output_file_name};
use crate::template::render::to_json_file_contents;
use crate::template::{TemplateContext, render_json_template, render_template_string};

pub mod prompt;
pub mod writer;

pub use prompt::{GlobalDecision, InteractivePrompt, PromptAnswer};
use writer::Writer;

/// Where sources are read from and destinations written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOptions {
    /// Base for destination paths and the backup directory
    pub cwd: PathBuf,
    /// Base for artifact source paths
    pub templates_root: PathBuf,
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Answer for one conflicting destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    Overwrite,
    Skip,
}

/// Decides what to do with a destination that already exists.
///
/// `rel_path` is the destination relative to the working directory.
pub trait ConflictResolver {
    fn resolve(&mut self, rel_path: &str) -> Result<ConflictDecision>;
}

impl<F> ConflictResolver for F
where
    F: FnMut(&str) -> Result<ConflictDecision>,
{
    fn resolve(&mut self, rel_path: &str) -> Result<ConflictDecision> {
        self(rel_path)
    }
}

/// Execute a plan. Without a resolver, `prompt` conflicts are skipped.
pub fn execute_processed_artifacts(
    items: &[ProcessedArtifact],
    config: &ResolvedConfig,
    opts: &ExecOptions,
    on_conflict: Option<&mut dyn ConflictResolver>,
) -> Result<ExecSummary> {
    let ctx = crate::manifest::planner::context_for(config);
    let mut writer = Writer::new(config, &opts.cwd, on_conflict);

    for item in items {
        tracing::debug!(id = %item.id, kind = %item.source.kind(), "executing artifact");
        match &item.source {
            ProcessedSource::StaticDir { from, to_dir } => {
                let src_dir = opts.templates_root.join(from);
                let dst_dir = opts.cwd.join(to_dir);
                for (abs, rel) in list_files(&src_dir)? {
                    let bytes = std::fs::read(&abs).map_err(|e| read_error(&abs, &e))?;
                    writer.write(&dst_dir.join(rel), &bytes)?;
                }
            }
            ProcessedSource::TemplateFile {
                from,
                to_dir,
                out_file,
            } => {
                let src = opts.templates_root.join(from);
                let dst = opts.cwd.join(to_dir).join(out_file);
                let rendered = render_file(&src, config, &ctx)?;
                writer.write(&dst, rendered.as_bytes())?;
            }
            ProcessedSource::TemplateDir { from_dir, to_dir } => {
                let src_dir = opts.templates_root.join(from_dir);
                let dst_dir = opts.cwd.join(to_dir);
                for (abs, rel) in list_files(&src_dir)? {
                    let rendered = render_file(&abs, config, &ctx)?;
                    writer.write(&dst_dir.join(output_rel_path(&rel)), rendered.as_bytes())?;
                }
            }
        }
    }

    Ok(writer.summary())
}

/// Render a template file: `.tpl.json` as JSON, anything else as text
fn render_file(src: &Path, config: &ResolvedConfig, ctx: &TemplateContext) -> Result<String> {
    let text = std::fs::read_to_string(src).map_err(|e| read_error(src, &e))?;
    if is_json_template(src) {
        let value = render_json_template(&text, config.agent, ctx)?;
        to_json_file_contents(&value)
    } else {
        Ok(render_template_string(&text, config.agent, ctx))
    }
}

fn is_json_template(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".tpl.json"))
}

/// Strip the template suffix from the last component of a relative path
fn output_rel_path(rel: &Path) -> PathBuf {
    match rel.file_name().and_then(|n| n.to_str()) {
        Some(name) => rel.with_file_name(output_file_name(name)),
        None => rel.to_path_buf(),
    }
}

/// Every file under `dir` as (absolute, relative) pairs, in file-name order
fn list_files(dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| PathBuf::from(entry.file_name()));
        files.push((entry.path().to_path_buf(), rel));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{BackupArg, ParsedArgs};
    use crate::config::{UserConfig, resolve_config};
    use crate::domain::{Agent, Lang, OverwritePolicy};
    use crate::error::SddError;
    use crate::manifest::{parse_manifest, plan_from_manifest};
    use crate::runtime::EnvRuntime;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _temp: TempDir,
        opts: ExecOptions,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let opts = ExecOptions {
                cwd: temp.path().join("project"),
                templates_root: temp.path().join("templates"),
            };
            fs::create_dir_all(&opts.cwd).unwrap();
            fs::create_dir_all(&opts.templates_root).unwrap();
            Self { _temp: temp, opts }
        }

        fn template(&self, rel: &str, content: &str) {
            let path = self.opts.templates_root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn project_file(&self, rel: &str, content: &str) {
            let path = self.opts.cwd.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.opts.cwd.join(rel)).unwrap()
        }

        fn exists(&self, rel: &str) -> bool {
            self.opts.cwd.join(rel).exists()
        }
    }

    fn config(args: ParsedArgs) -> ResolvedConfig {
        resolve_config(&UserConfig::default(), &args, &EnvRuntime::with_platform("linux")).unwrap()
    }

    fn policy(p: OverwritePolicy) -> ParsedArgs {
        ParsedArgs {
            overwrite: Some(p),
            ..Default::default()
        }
    }

    fn plan(json: &str, config: &ResolvedConfig) -> Vec<ProcessedArtifact> {
        plan_from_manifest(&parse_manifest(json, "test").unwrap(), config)
    }

    const SINGLE_FILE: &str = r#"{"version": 1, "artifacts": [
        {"id": "a", "source": {"type": "templateFile", "from": "t.tpl.md", "toDir": "out"}}
    ]}"#;

    const MIXED: &str = r#"{"version": 1, "artifacts": [
        {"id": "rules", "source": {"type": "staticDir", "from": "static", "toDir": "{{KIRO_DIR}}/settings"}},
        {"id": "cmds", "source": {"type": "templateDir", "fromDir": "commands", "toDir": "{{AGENT_COMMANDS_DIR}}"}},
        {"id": "doc", "source": {"type": "templateFile", "from": "doc.tpl.md", "toDir": ".", "rename": "{{AGENT_DOC}}"}}
    ]}"#;

    fn mixed_fixture() -> Fixture {
        let fx = Fixture::new();
        fx.template("static/rules/ears.md", "EARS {{AGENT}} stays raw");
        fx.template("static/templates/req.md", "requirements");
        fx.template("commands/spec-init.tpl.md", "init for {{AGENT}} in {{KIRO_DIR}}");
        fx.template("commands/nested/config.tpl.json", r#"{"lang": "{{LANG_CODE}}"}"#);
        fx.template("doc.tpl.md", "# {{AGENT_DOC}}");
        fx
    }

    #[test]
    fn test_template_file_written() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "Agent: {{AGENT}}");
        let cfg = config(ParsedArgs::default());

        let summary =
            execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, None).unwrap();

        assert_eq!(summary, ExecSummary { written: 1, skipped: 0 });
        assert_eq!(fx.read("out/t.md"), "Agent: claude-code");
    }

    #[test]
    fn test_mixed_artifacts() {
        let fx = mixed_fixture();
        let cfg = config(ParsedArgs {
            lang: Some(Lang::Ja),
            ..Default::default()
        });

        let summary =
            execute_processed_artifacts(&plan(MIXED, &cfg), &cfg, &fx.opts, None).unwrap();

        assert_eq!(summary.written, 5);
        assert_eq!(fx.read(".kiro/settings/rules/ears.md"), "EARS {{AGENT}} stays raw");
        assert_eq!(fx.read(".kiro/settings/templates/req.md"), "requirements");
        assert_eq!(
            fx.read(".claude/commands/kiro/spec-init.md"),
            "init for claude-code in .kiro"
        );
        assert_eq!(
            fx.read(".claude/commands/kiro/nested/config.json"),
            "{\n  \"lang\": \"ja\"\n}\n"
        );
        assert_eq!(fx.read("CLAUDE.md"), "# CLAUDE.md");
    }

    #[test]
    fn test_skip_policy_keeps_existing() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new");
        fx.project_file("out/t.md", "existing");
        let cfg = config(policy(OverwritePolicy::Skip));

        let summary =
            execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, None).unwrap();

        assert_eq!(summary, ExecSummary { written: 0, skipped: 1 });
        assert_eq!(fx.read("out/t.md"), "existing");
    }

    #[test]
    fn test_skip_policy_second_run_skips_everything() {
        let fx = mixed_fixture();
        let cfg = config(policy(OverwritePolicy::Skip));
        let items = plan(MIXED, &cfg);

        let first = execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap();
        let snapshot = fx.read(".claude/commands/kiro/spec-init.md");
        let second = execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap();

        assert_eq!(first, ExecSummary { written: 5, skipped: 0 });
        assert_eq!(second, ExecSummary { written: 0, skipped: 5 });
        assert_eq!(fx.read(".claude/commands/kiro/spec-init.md"), snapshot);
    }

    #[test]
    fn test_force_policy_is_idempotent() {
        let fx = mixed_fixture();
        let cfg = config(policy(OverwritePolicy::Force));
        let items = plan(MIXED, &cfg);

        let first = execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap();
        let doc = fx.read("CLAUDE.md");
        let second = execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap();

        assert_eq!(first.written, 5);
        assert_eq!(second, ExecSummary { written: 5, skipped: 0 });
        assert_eq!(fx.read("CLAUDE.md"), doc);
        assert!(!fx.exists(crate::config::DEFAULT_BACKUP_DIR));
    }

    #[test]
    fn test_force_with_backup_preserves_previous_content() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new {{AGENT}}");
        fx.project_file("out/t.md", "old content");
        let cfg = config(ParsedArgs {
            overwrite: Some(OverwritePolicy::Force),
            backup: Some(BackupArg::Dir("bak".to_string())),
            ..Default::default()
        });

        execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, None).unwrap();

        assert_eq!(fx.read("out/t.md"), "new claude-code");
        assert_eq!(fx.read("bak/out/t.md"), "old content");
    }

    #[test]
    fn test_backup_not_created_for_new_files() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new");
        let cfg = config(ParsedArgs {
            overwrite: Some(OverwritePolicy::Force),
            backup: Some(BackupArg::Enabled),
            ..Default::default()
        });

        execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, None).unwrap();
        assert!(!fx.exists(crate::config::DEFAULT_BACKUP_DIR));
    }

    #[test]
    fn test_prompt_without_resolver_skips() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new");
        fx.project_file("out/t.md", "existing");
        let cfg = config(ParsedArgs::default());

        let summary =
            execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, None).unwrap();
        assert_eq!(summary, ExecSummary { written: 0, skipped: 1 });
    }

    #[test]
    fn test_prompt_resolver_receives_relative_path() {
        let fx = mixed_fixture();
        let cfg = config(ParsedArgs::default());
        let items = plan(MIXED, &cfg);
        execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap();

        let mut asked = Vec::new();
        let mut resolver = |rel: &str| -> Result<ConflictDecision> {
            asked.push(rel.to_string());
            Ok(if rel.ends_with(".md") {
                ConflictDecision::Overwrite
            } else {
                ConflictDecision::Skip
            })
        };
        let summary =
            execute_processed_artifacts(&items, &cfg, &fx.opts, Some(&mut resolver)).unwrap();

        assert_eq!(
            asked,
            [
                ".kiro/settings/rules/ears.md",
                ".kiro/settings/templates/req.md",
                ".claude/commands/kiro/nested/config.json",
                ".claude/commands/kiro/spec-init.md",
                "CLAUDE.md",
            ]
        );
        assert_eq!(summary, ExecSummary { written: 4, skipped: 1 });
    }

    #[test]
    fn test_prompt_overwrite_answer_backs_up() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new {{AGENT}}");
        fx.project_file("out/t.md", "old content");
        let cfg = config(ParsedArgs {
            backup: Some(BackupArg::Dir("bak".to_string())),
            ..Default::default()
        });
        assert_eq!(cfg.effective_overwrite, OverwritePolicy::Prompt);

        let mut overwrite = |_: &str| -> Result<ConflictDecision> { Ok(ConflictDecision::Overwrite) };
        let summary = execute_processed_artifacts(
            &plan(SINGLE_FILE, &cfg),
            &cfg,
            &fx.opts,
            Some(&mut overwrite),
        )
        .unwrap();

        assert_eq!(summary, ExecSummary { written: 1, skipped: 0 });
        assert_eq!(fx.read("out/t.md"), "new claude-code");
        assert_eq!(fx.read("bak/out/t.md"), "old content");
    }

    #[test]
    fn test_prompt_skip_answer_makes_no_backup() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new");
        fx.project_file("out/t.md", "old content");
        let cfg = config(ParsedArgs {
            backup: Some(BackupArg::Dir("bak".to_string())),
            ..Default::default()
        });

        let mut skip = |_: &str| -> Result<ConflictDecision> { Ok(ConflictDecision::Skip) };
        let summary =
            execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, Some(&mut skip))
                .unwrap();

        assert_eq!(summary, ExecSummary { written: 0, skipped: 1 });
        assert_eq!(fx.read("out/t.md"), "old content");
        assert!(!fx.exists("bak"));
    }

    #[test]
    fn test_destination_escaping_cwd_is_error() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new");
        let cfg = config(policy(OverwritePolicy::Force));
        let items = plan(
            r#"{"version": 1, "artifacts": [
                {"id": "a", "source": {"type": "templateFile", "from": "t.tpl.md", "toDir": "../shared"}}
            ]}"#,
            &cfg,
        );

        let err = execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap_err();
        assert!(matches!(err, SddError::FileWriteFailed { .. }));
        assert!(!fx.opts.cwd.join("../shared").exists());
    }

    #[test]
    fn test_yes_never_calls_resolver() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "new");
        fx.project_file("out/t.md", "existing");
        let cfg = config(ParsedArgs {
            overwrite: Some(OverwritePolicy::Prompt),
            yes: true,
            ..Default::default()
        });

        let mut calls = 0;
        let mut resolver = |_: &str| -> Result<ConflictDecision> {
            calls += 1;
            Ok(ConflictDecision::Skip)
        };
        let summary =
            execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, Some(&mut resolver))
                .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(summary.written, 1);
        assert_eq!(fx.read("out/t.md"), "new");
    }

    #[test]
    fn test_invalid_json_aborts_without_rollback() {
        let fx = Fixture::new();
        fx.template("a.tpl.md", "first");
        fx.template("bad.tpl.json", r#"{"dir": {{KIRO_DIR}}}"#);
        let cfg = config(ParsedArgs::default());
        let items = plan(
            r#"{"version": 1, "artifacts": [
                {"id": "a", "source": {"type": "templateFile", "from": "a.tpl.md", "toDir": "out"}},
                {"id": "bad", "source": {"type": "templateFile", "from": "bad.tpl.json", "toDir": "out"}}
            ]}"#,
            &cfg,
        );

        let err = execute_processed_artifacts(&items, &cfg, &fx.opts, None).unwrap_err();
        assert!(matches!(err, SddError::InvalidRenderedJson { .. }));
        assert_eq!(fx.read("out/a.md"), "first");
        assert!(!fx.exists("out/bad.json"));
    }

    #[test]
    fn test_missing_source_dir_is_error() {
        let fx = Fixture::new();
        let cfg = config(ParsedArgs::default());
        let items = plan(
            r#"{"version": 1, "artifacts": [
                {"id": "gone", "source": {"type": "staticDir", "from": "missing", "toDir": "out"}}
            ]}"#,
            &cfg,
        );
        assert!(execute_processed_artifacts(&items, &cfg, &fx.opts, None).is_err());
    }

    #[test]
    fn test_other_agent_renders_its_own_name() {
        let fx = Fixture::new();
        fx.template("t.tpl.md", "Agent: {{AGENT}}");
        let cfg = config(ParsedArgs {
            agent: Some(Agent::QwenCode),
            ..Default::default()
        });
        execute_processed_artifacts(&plan(SINGLE_FILE, &cfg), &cfg, &fx.opts, None).unwrap();
        assert_eq!(fx.read("out/t.md"), "Agent: qwen-code");
    }
}
