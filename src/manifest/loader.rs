//! Reading and validating manifest files

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use super::{Manifest, ManifestArtifact};
use crate::error::{Result, manifest};

/// Load and validate the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let origin = path.display().to_string();

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(manifest::not_found(origin));
        }
        Err(e) => return Err(crate::error::fs::read_error(path, &e)),
    };

    tracing::debug!(path = %origin, "loading manifest");
    parse_manifest(&text, &origin)
}

/// Validate manifest text; `origin` names the source in error messages
pub fn parse_manifest(text: &str, origin: &str) -> Result<Manifest> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| manifest::parse_failed(origin, e.to_string()))?;

    let Value::Object(map) = value else {
        return Err(manifest::invalid(origin, "top level must be an object"));
    };

    let version = match map.get("version") {
        Some(Value::Number(n)) => n.clone(),
        _ => {
            return Err(manifest::invalid(
                origin,
                "missing or invalid 'version' (expected number)",
            ));
        }
    };

    let Some(Value::Array(raw_artifacts)) = map.get("artifacts") else {
        return Err(manifest::invalid(
            origin,
            "missing or invalid 'artifacts' (expected array)",
        ));
    };

    let artifacts = raw_artifacts
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            ManifestArtifact::deserialize(raw).map_err(|e| {
                manifest::invalid(origin, format!("artifact at index {index}: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Manifest { version, artifacts })
}
