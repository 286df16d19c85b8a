//! cc-sdd command line entry point

use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use cc_sdd::cli::{StdIo, bundled_templates_root, run_cli};
use cc_sdd::executor::ExecOptions;
use cc_sdd::runtime::EnvRuntime;

/// Overrides the templates directory
const TEMPLATES_DIR_ENV: &str = "CC_SDD_TEMPLATES_DIR";
/// Log filter, e.g. `CC_SDD_LOG=debug`
const LOG_ENV: &str = "CC_SDD_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Locate the templates: env override, then `templates/` next to the
/// executable, then the copy bundled with the sources.
fn templates_root() -> PathBuf {
    if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("templates")))
        .filter(|dir| dir.is_dir());

    let root = beside_exe.unwrap_or_else(|| bundled_templates_root().to_path_buf());
    dunce::canonicalize(&root).unwrap_or(root)
}

fn main() {
    init_tracing();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine working directory: {e}");
            std::process::exit(1);
        }
    };

    let opts = ExecOptions {
        cwd,
        templates_root: templates_root(),
    };
    tracing::debug!(templates = %opts.templates_root.display(), "templates root");

    let code = run_cli(&argv, &EnvRuntime::current(), &mut StdIo, None, &opts);
    std::process::exit(code);
}
