//! Dry-run plan formatting

use std::fmt::Write;

use crate::manifest::{ArtifactKind, ProcessedArtifact, ProcessedSource};

/// Format a plan as a header with per-kind counts followed by one line per artifact
pub fn format_processed_artifacts(items: &[ProcessedArtifact]) -> String {
    let count = |kind: ArtifactKind| items.iter().filter(|a| a.source.kind() == kind).count();

    let mut out = String::from("Plan (dry-run)\n");
    let counts = ArtifactKind::ALL
        .iter()
        .map(|kind| format!("{kind}: {}", count(*kind)))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Artifacts: {} ({counts})", items.len());

    if items.is_empty() {
        out.push_str("(no artifacts)\n");
        return out;
    }

    for item in items {
        let (from, to) = match &item.source {
            ProcessedSource::StaticDir { from, to_dir } => (from.as_str(), to_dir.clone()),
            ProcessedSource::TemplateFile {
                from,
                to_dir,
                out_file,
            } => (from.as_str(), join_rel(to_dir, out_file)),
            ProcessedSource::TemplateDir { from_dir, to_dir } => {
                (from_dir.as_str(), to_dir.clone())
            }
        };
        let _ = writeln!(out, "- [{}] {}: {from} -> {to}", item.source.kind(), item.id);
    }

    out
}

fn join_rel(dir: &str, file: &str) -> String {
    match dir.trim_end_matches('/') {
        "" | "." => file.to_string(),
        dir => format!("{dir}/{file}"),
    }
}
