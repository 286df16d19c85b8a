//! Building a plan from a manifest and a resolved configuration

use std::path::Path;

use super::{Manifest, ProcessedArtifact, load_manifest, process_manifest};
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::template::{TemplateContext, build_template_context};

/// Context for one planning pass, derived from the resolved config
pub fn context_for(config: &ResolvedConfig) -> TemplateContext {
    build_template_context(config.lang, &config.kiro_dir, &config.layout, config.agent)
}

pub fn plan_from_manifest(manifest: &Manifest, config: &ResolvedConfig) -> Vec<ProcessedArtifact> {
    let ctx = context_for(config);
    let plan = process_manifest(manifest, config.agent, &ctx, config.resolved_os);
    tracing::debug!(
        total = manifest.artifacts.len(),
        planned = plan.len(),
        "planned manifest"
    );
    plan
}

pub fn plan_from_file(path: &Path, config: &ResolvedConfig) -> Result<Vec<ProcessedArtifact>> {
    let manifest = load_manifest(path)?;
    Ok(plan_from_manifest(&manifest, config))
}
