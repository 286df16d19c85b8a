//! Filtering manifest artifacts and substituting placeholders

use super::{ArtifactSource, Manifest, ManifestArtifact, ProcessedArtifact, ProcessedSource, When};
use crate::domain::{Agent, OsType};
use crate::template::{TemplateContext, substitute};

/// Turn a manifest into the ordered, execution-ready artifact list.
///
/// Artifacts whose `when` predicate excludes `agent` or `os` are dropped.
/// The relative order of the remaining artifacts is kept.
pub fn process_manifest(
    manifest: &Manifest,
    agent: Agent,
    ctx: &TemplateContext,
    os: OsType,
) -> Vec<ProcessedArtifact> {
    manifest
        .artifacts
        .iter()
        .filter(|artifact| {
            let applies = applies_to(artifact.when.as_ref(), agent, os);
            if !applies {
                tracing::debug!(id = %artifact.id, %agent, %os, "artifact filtered out");
            }
            applies
        })
        .map(|artifact| process_artifact(artifact, ctx))
        .collect()
}

fn applies_to(when: Option<&When>, agent: Agent, os: OsType) -> bool {
    let Some(when) = when else {
        return true;
    };
    let agent_ok = when.agent.as_ref().is_none_or(|a| a.contains(agent.as_str()));
    let os_ok = when.os.as_ref().is_none_or(|o| o.contains(os.as_str()));
    agent_ok && os_ok
}

fn process_artifact(artifact: &ManifestArtifact, ctx: &TemplateContext) -> ProcessedArtifact {
    let sub = |s: &str| substitute(s, ctx).into_owned();

    let source = match &artifact.source {
        ArtifactSource::StaticDir { from, to_dir } => ProcessedSource::StaticDir {
            from: sub(from),
            to_dir: sub(to_dir),
        },
        ArtifactSource::TemplateFile {
            from,
            to_dir,
            rename,
        } => {
            let from = sub(from);
            let out_file = match rename {
                Some(rename) => sub(rename),
                None => output_file_name(basename(&from)),
            };
            ProcessedSource::TemplateFile {
                from,
                to_dir: sub(to_dir),
                out_file,
            }
        }
        ArtifactSource::TemplateDir { from_dir, to_dir } => ProcessedSource::TemplateDir {
            from_dir: sub(from_dir),
            to_dir: sub(to_dir),
        },
    };

    ProcessedArtifact {
        id: artifact.id.clone(),
        source,
    }
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Strip a template suffix: `x.tpl.md` -> `x.md`, `x.tpl.json` -> `x.json`.
/// Names without a known suffix are returned unchanged.
pub fn output_file_name(name: &str) -> String {
    if let Some(stem) = name.strip_suffix(".tpl.md") {
        format!("{stem}.md")
    } else if let Some(stem) = name.strip_suffix(".tpl.json") {
        format!("{stem}.json")
    } else {
        name.to_string()
    }
}
