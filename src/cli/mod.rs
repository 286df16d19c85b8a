//! CLI orchestration
//!
//! [`run_cli`] is the only place where errors are printed and exit codes
//! chosen. Everything it calls returns `Result` and never prints.

use std::path::{Path, PathBuf};

use console::Style;

use crate::config::{ResolvedConfig, UserConfig, load_user_config, resolve_config};
use crate::domain::{OverwritePolicy, Profile};
use crate::error::Result;
use crate::executor::{
    ConflictResolver, ExecOptions, ExecSummary, InteractivePrompt, execute_processed_artifacts,
};
use crate::manifest::{ProcessedArtifact, plan_from_file};
use crate::plan_printer::format_processed_artifacts;
use crate::runtime::EnvRuntime;

pub mod args;

use args::{Invocation, ParsedArgs, parse_invocation};

/// Directory under the templates root holding the manifests
pub const MANIFESTS_DIR: &str = "manifests";

/// Output sink for user-facing text
pub trait CliIo {
    fn log(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn error(&mut self, message: &str);
}

/// Writes to stdout/stderr with terminal styling
#[derive(Debug, Default)]
pub struct StdIo;

impl CliIo for StdIo {
    fn log(&mut self, message: &str) {
        println!("{message}");
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{}", Style::new().for_stderr().yellow().apply_to(message));
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {message}", Style::new().for_stderr().red().bold().apply_to("Error:"));
    }
}

/// Run the installer. Returns the process exit code.
///
/// `loaded_config` is read from `exec_opts.cwd` when `None`.
pub fn run_cli(
    argv: &[String],
    runtime: &EnvRuntime,
    io: &mut dyn CliIo,
    loaded_config: Option<UserConfig>,
    exec_opts: &ExecOptions,
) -> i32 {
    let args = match parse_invocation(argv) {
        Ok(Invocation::Help(text)) => {
            io.log(text.trim_end());
            return 0;
        }
        Ok(Invocation::Version(text)) => {
            io.log(&text);
            return 0;
        }
        Ok(Invocation::Run(args)) => args,
        Err(e) => {
            io.error(&e.to_string());
            return 1;
        }
    };

    match run(&args, runtime, io, loaded_config, exec_opts) {
        Ok(()) => 0,
        Err(e) => {
            io.error(&e.to_string());
            1
        }
    }
}

fn run(
    args: &ParsedArgs,
    runtime: &EnvRuntime,
    io: &mut dyn CliIo,
    loaded_config: Option<UserConfig>,
    exec_opts: &ExecOptions,
) -> Result<()> {
    let user = match loaded_config {
        Some(cfg) => cfg,
        None => load_user_config(&exec_opts.cwd)?,
    };
    let config = resolve_config(&user, args, runtime)?;
    tracing::debug!(?config, "resolved configuration");

    let manifest_path = resolve_manifest_path(args.manifest.as_deref(), &config, exec_opts);
    let plan = plan_from_file(&manifest_path, &config)?;

    if args.dry_run {
        io.log(format_processed_artifacts(&plan).trim_end());
        return Ok(());
    }

    let summary = apply(&plan, &config, runtime, io, exec_opts)?;
    io.log(&format!(
        "Applied plan: written={}, skipped={}",
        summary.written, summary.skipped
    ));
    Ok(())
}

fn apply(
    plan: &[ProcessedArtifact],
    config: &ResolvedConfig,
    runtime: &EnvRuntime,
    io: &mut dyn CliIo,
    exec_opts: &ExecOptions,
) -> Result<ExecSummary> {
    if config.effective_overwrite != OverwritePolicy::Prompt {
        return execute_processed_artifacts(plan, config, exec_opts, None);
    }

    if runtime.interactive {
        let mut prompt = InteractivePrompt::new();
        let resolver: &mut dyn ConflictResolver = &mut prompt;
        return execute_processed_artifacts(plan, config, exec_opts, Some(resolver));
    }

    io.warn(
        "Non-interactive session: existing files will be skipped \
         (use --overwrite force or --yes to overwrite)",
    );
    execute_processed_artifacts(plan, config, exec_opts, None)
}

/// Pick the manifest file for this run.
///
/// An explicit path (relative to the working directory) wins. Otherwise the
/// agent's manifest under the templates root is used; the `minimal` profile
/// prefers `<agent>-min.json` when that file exists.
pub fn resolve_manifest_path(
    explicit: Option<&str>,
    config: &ResolvedConfig,
    exec_opts: &ExecOptions,
) -> PathBuf {
    if let Some(path) = explicit {
        return exec_opts.cwd.join(path);
    }

    let dir = exec_opts.templates_root.join(MANIFESTS_DIR);
    let agent = config.agent.as_str();

    if config.profile == Profile::Minimal {
        let minimal = dir.join(format!("{agent}-min.json"));
        if minimal.is_file() {
            return minimal;
        }
        tracing::debug!(path = %minimal.display(), "no minimal manifest, using default");
    }

    dir.join(format!("{agent}.json"))
}

/// Templates shipped with the crate
pub fn bundled_templates_root() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}
