//! Manifest model, loading, processing and planning
//!
//! A manifest is a versioned list of artifacts. Loading validates its shape,
//! processing filters artifacts by agent/OS and substitutes placeholders,
//! and planning ties both to a [`ResolvedConfig`](crate::config::ResolvedConfig).

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod loader;
pub mod planner;
pub mod processor;

pub use loader::{load_manifest, parse_manifest};
pub use planner::{plan_from_file, plan_from_manifest};
pub use processor::{output_file_name, process_manifest};

/// Declarative description of what to install
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Any JSON number; not interpreted
    pub version: serde_json::Number,
    pub artifacts: Vec<ManifestArtifact>,
}

/// One unit of output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestArtifact {
    pub id: String,
    pub source: ArtifactSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
}

/// Where an artifact's content comes from and where it goes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ArtifactSource {
    /// Copy a directory verbatim
    StaticDir { from: String, to_dir: String },
    /// Render a single file, optionally renamed
    TemplateFile {
        from: String,
        to_dir: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rename: Option<String>,
    },
    /// Render every file in a directory tree
    TemplateDir { from_dir: String, to_dir: String },
}

/// Applicability predicate; an absent field always matches
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct When {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<OneOrMany>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OneOrMany>,
}

/// A single value or a set of values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn contains(&self, value: &str) -> bool {
        match self {
            OneOrMany::One(v) => v == value,
            OneOrMany::Many(values) => values.iter().any(|v| v == value),
        }
    }
}

/// Artifact after filtering and placeholder substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedArtifact {
    pub id: String,
    pub source: ProcessedSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessedSource {
    StaticDir {
        from: String,
        to_dir: String,
    },
    TemplateFile {
        from: String,
        to_dir: String,
        out_file: String,
    },
    TemplateDir {
        from_dir: String,
        to_dir: String,
    },
}

impl ProcessedSource {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ProcessedSource::StaticDir { .. } => ArtifactKind::StaticDir,
            ProcessedSource::TemplateFile { .. } => ArtifactKind::TemplateFile,
            ProcessedSource::TemplateDir { .. } => ArtifactKind::TemplateDir,
        }
    }
}

/// Discriminant shared by manifest and processed artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    StaticDir,
    TemplateFile,
    TemplateDir,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::StaticDir,
        ArtifactKind::TemplateFile,
        ArtifactKind::TemplateDir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::StaticDir => "staticDir",
            ArtifactKind::TemplateFile => "templateFile",
            ArtifactKind::TemplateDir => "templateDir",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
