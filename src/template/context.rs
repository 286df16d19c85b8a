//! Template context: the flat placeholder dictionary

use std::collections::BTreeMap;

use crate::domain::{Agent, Lang};
use crate::resolve::AgentLayout;

pub const AGENT: &str = "AGENT";
pub const LANG_CODE: &str = "LANG_CODE";
pub const KIRO_DIR: &str = "KIRO_DIR";
pub const AGENT_DIR: &str = "AGENT_DIR";
pub const AGENT_DOC: &str = "AGENT_DOC";
pub const AGENT_COMMANDS_DIR: &str = "AGENT_COMMANDS_DIR";

/// Placeholder name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Copy of this context with one more entry
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

/// Build the context for one planning or execution pass
pub fn build_template_context(
    lang: Lang,
    kiro_dir: &str,
    layout: &AgentLayout,
    agent: Agent,
) -> TemplateContext {
    TemplateContext::default()
        .with(AGENT, agent.as_str())
        .with(LANG_CODE, lang.as_str())
        .with(KIRO_DIR, kiro_dir)
        .with(AGENT_DIR, &layout.agent_dir)
        .with(AGENT_DOC, &layout.doc_file)
        .with(AGENT_COMMANDS_DIR, &layout.commands_dir)
}
