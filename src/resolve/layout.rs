//! Agent directory layouts

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Agent;

/// Where an agent keeps its files inside a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentLayout {
    /// Directory holding the agent's slash commands (e.g. ".claude/commands/kiro")
    pub commands_dir: String,
    /// Agent root directory (e.g. ".claude")
    pub agent_dir: String,
    /// Agent documentation file at the project root (e.g. "CLAUDE.md")
    pub doc_file: String,
}

impl AgentLayout {
    fn new(commands_dir: &str, agent_dir: &str, doc_file: &str) -> Self {
        Self {
            commands_dir: commands_dir.to_string(),
            agent_dir: agent_dir.to_string(),
            doc_file: doc_file.to_string(),
        }
    }

    /// Built-in layout for an agent
    pub fn default_for(agent: Agent) -> Self {
        match agent {
            Agent::ClaudeCode => Self::new(".claude/commands/kiro", ".claude", "CLAUDE.md"),
            Agent::GeminiCli => Self::new(".gemini/commands/kiro", ".gemini", "GEMINI.md"),
            Agent::QwenCode => Self::new(".qwen/commands/kiro", ".qwen", "QWEN.md"),
        }
    }
}

/// Partial layout from the user config; unset fields keep the default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentLayoutOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commands_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_file: Option<String>,
}

/// Resolve the layout for `agent`, shallow-merging any configured override
pub fn resolve_agent_layout(
    agent: Agent,
    overrides: &BTreeMap<Agent, AgentLayoutOverride>,
) -> AgentLayout {
    let mut layout = AgentLayout::default_for(agent);
    if let Some(o) = overrides.get(&agent) {
        if let Some(dir) = &o.commands_dir {
            layout.commands_dir.clone_from(dir);
        }
        if let Some(dir) = &o.agent_dir {
            layout.agent_dir.clone_from(dir);
        }
        if let Some(doc) = &o.doc_file {
            layout.doc_file.clone_from(doc);
        }
    }
    layout
}
