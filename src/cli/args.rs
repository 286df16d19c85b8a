//! Command-line argument parsing using clap derive API
//!
//! clap does the token-level work; [`parse_args`] then maps its errors onto
//! the crate's usage errors and folds the agent flags into a single
//! selection.

use std::collections::BTreeSet;

use clap::builder::{Styles, styling::AnsiColor};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};

use crate::domain::{Agent, Lang, OsTarget, OverwritePolicy, Profile};
use crate::error::{Result, SddError, usage};

/// Structured command-line options; every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub agent: Option<Agent>,
    pub lang: Option<Lang>,
    pub os: Option<OsTarget>,
    pub kiro_dir: Option<String>,
    pub overwrite: Option<OverwritePolicy>,
    pub backup: Option<BackupArg>,
    pub profile: Option<Profile>,
    pub manifest: Option<String>,
    pub dry_run: bool,
    pub yes: bool,
}

/// `--backup` given with or without a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupArg {
    Enabled,
    Dir(String),
}

/// What the orchestrator should do with the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help(String),
    Version(String),
    Run(ParsedArgs),
}

/// cc-sdd - spec-driven development setup for AI coding agents
#[derive(Parser, Debug)]
#[command(
    name = "cc-sdd",
    no_binary_name = true,
    disable_version_flag = true,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install spec-driven development commands for AI coding agents",
    long_about = "cc-sdd installs Kiro-style spec-driven development commands, steering \
                  documents and settings into the current project for Claude Code, \
                  Gemini CLI or Qwen Code.",
    after_help = "EXAMPLES:\n  \
                  Install for Claude Code in English:\n    cc-sdd\n\n\
                  Install for Gemini CLI in Japanese:\n    cc-sdd --gemini-cli --lang ja\n\n\
                  Preview without writing files:\n    cc-sdd --dry-run\n\n\
                  Overwrite existing files, keeping backups:\n    cc-sdd --overwrite force --backup"
)]
struct RawArgs {
    /// Target agent
    #[arg(long, value_enum, value_name = "AGENT", action = ArgAction::Append)]
    agent: Vec<Agent>,

    /// Shortcut for --agent claude-code
    #[arg(long = "claude-code", overrides_with = "claude_code")]
    claude_code: bool,

    /// Shortcut for --agent gemini-cli
    #[arg(long = "gemini-cli", overrides_with = "gemini_cli")]
    gemini_cli: bool,

    /// Shortcut for --agent qwen-code
    #[arg(long = "qwen-code", overrides_with = "qwen_code")]
    qwen_code: bool,

    /// Language of the generated documents
    #[arg(long, value_enum, overrides_with = "lang")]
    lang: Option<Lang>,

    /// Target operating system
    #[arg(long, value_enum, overrides_with = "os")]
    os: Option<OsTarget>,

    /// Root directory for specs and steering (relative)
    #[arg(long, value_name = "PATH", overrides_with = "kiro_dir")]
    kiro_dir: Option<String>,

    /// What to do with files that already exist
    #[arg(long, value_enum, overrides_with = "overwrite")]
    overwrite: Option<OverwritePolicy>,

    /// Back up files before overwriting them, optionally into DIR
    #[arg(long, value_name = "DIR", num_args = 0..=1, overrides_with = "backup")]
    backup: Option<Option<String>>,

    /// Manifest variant to install
    #[arg(long, value_enum, overrides_with = "profile")]
    profile: Option<Profile>,

    /// Explicit manifest file, overriding agent and profile
    #[arg(long, value_name = "PATH", overrides_with = "manifest")]
    manifest: Option<String>,

    /// Print the plan without writing any file
    #[arg(long, overrides_with = "dry_run")]
    dry_run: bool,

    /// Do not prompt; overwrite instead of asking
    #[arg(short = 'y', long, overrides_with = "yes")]
    yes: bool,
}

/// Package version, `dev` when unavailable
pub fn package_version() -> &'static str {
    match option_env!("CARGO_PKG_VERSION") {
        Some(v) if !v.is_empty() => v,
        _ => "dev",
    }
}

fn version_line() -> String {
    format!("cc-sdd {}", package_version())
}

fn command() -> clap::Command {
    RawArgs::command().version(package_version()).arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .help("Print version")
            .action(ArgAction::Version),
    )
}

/// Parse tokens (without the program name) into help, version or run options
pub fn parse_invocation<I, T>(tokens: I) -> Result<Invocation>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let tokens: Vec<std::ffi::OsString> = tokens.into_iter().map(Into::into).collect();

    // Help and version win over anything else on the line, valid or not.
    if tokens.iter().any(|t| t == "--help") {
        return Ok(Invocation::Help(command().render_long_help().to_string()));
    }
    if tokens.iter().any(|t| t == "-h") {
        return Ok(Invocation::Help(usage_text()));
    }
    if tokens.iter().any(|t| t == "-v" || t == "--version") {
        return Ok(Invocation::Version(version_line()));
    }

    let matches = match command().try_get_matches_from(tokens) {
        Ok(matches) => matches,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp => Ok(Invocation::Help(err.render().to_string())),
                ErrorKind::DisplayVersion => Ok(Invocation::Version(version_line())),
                _ => Err(map_clap_error(&err)),
            };
        }
    };

    let raw = RawArgs::from_arg_matches(&matches).map_err(|e| map_clap_error(&e))?;
    Ok(Invocation::Run(into_parsed(raw)?))
}

/// Parse tokens into [`ParsedArgs`]; help and version requests are errors here
pub fn parse_args<I, T>(tokens: I) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match parse_invocation(tokens)? {
        Invocation::Run(args) => Ok(args),
        Invocation::Help(_) | Invocation::Version(_) => Err(SddError::InvalidArguments {
            message: "help and version are not run options".to_string(),
        }),
    }
}

fn into_parsed(raw: RawArgs) -> Result<ParsedArgs> {
    let mut selected: BTreeSet<Agent> = raw.agent.iter().copied().collect();
    if raw.claude_code {
        selected.insert(Agent::ClaudeCode);
    }
    if raw.gemini_cli {
        selected.insert(Agent::GeminiCli);
    }
    if raw.qwen_code {
        selected.insert(Agent::QwenCode);
    }

    if selected.len() > 1 {
        return Err(usage::agent_conflict(selected.iter().map(|a| a.as_str())));
    }

    let backup = raw.backup.map(|dir| match dir {
        Some(dir) if !dir.is_empty() => BackupArg::Dir(dir),
        _ => BackupArg::Enabled,
    });

    Ok(ParsedArgs {
        agent: selected.into_iter().next(),
        lang: raw.lang,
        os: raw.os,
        kiro_dir: raw.kiro_dir,
        overwrite: raw.overwrite,
        backup,
        profile: raw.profile,
        manifest: raw.manifest,
        dry_run: raw.dry_run,
        yes: raw.yes,
    })
}

fn context_str(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind)? {
        ContextValue::String(s) => Some(s.clone()),
        ContextValue::Strings(v) => Some(v.join(", ")),
        _ => None,
    }
}

/// `--lang <LANG>` -> `lang`
fn flag_name(invalid_arg: &str) -> String {
    invalid_arg
        .split([' ', '='])
        .next()
        .unwrap_or_default()
        .trim_start_matches('-')
        .to_string()
}

fn map_clap_error(err: &clap::Error) -> SddError {
    let invalid_arg = context_str(err, ContextKind::InvalidArg);

    match (err.kind(), invalid_arg) {
        (ErrorKind::UnknownArgument, Some(arg)) => {
            if arg.starts_with('-') {
                let flag = arg.split('=').next().unwrap_or(&arg).to_string();
                usage::unknown_flag(flag)
            } else {
                usage::unknown_positional(arg)
            }
        }
        (ErrorKind::InvalidValue, Some(arg)) => {
            let flag = flag_name(&arg);
            match context_str(err, ContextKind::InvalidValue) {
                Some(value) if !value.is_empty() => {
                    let allowed = context_str(err, ContextKind::ValidValue).unwrap_or_default();
                    SddError::InvalidFlagValue {
                        flag,
                        value,
                        allowed,
                    }
                }
                _ => SddError::MissingFlagValue { flag },
            }
        }
        _ => SddError::InvalidArguments {
            message: err
                .to_string()
                .trim_start_matches("error: ")
                .lines()
                .next()
                .unwrap_or_default()
                .to_string(),
        },
    }
}

/// Usage text shown by `-h`
pub fn usage_text() -> String {
    command().render_help().to_string()
}
