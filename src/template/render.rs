//! `{{NAME}}` substitution for manifest paths and template bodies
//!
//! Unknown placeholders are left exactly as written so that newer
//! manifests keep working with an older renderer.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::context::{AGENT, TemplateContext};
use crate::domain::Agent;
use crate::error::{Result, SddError};

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::unwrap_used)]
fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap())
}

/// Replace every known `{{NAME}}` token with its context value
pub fn substitute<'a>(input: &'a str, ctx: &TemplateContext) -> Cow<'a, str> {
    placeholder_re().replace_all(input, |caps: &Captures<'_>| {
        match ctx.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        }
    })
}

/// Render a text template. `{{AGENT}}` always renders `agent`.
pub fn render_template_string(input: &str, agent: Agent, ctx: &TemplateContext) -> String {
    let ctx = ctx.clone().with(AGENT, agent.as_str());
    substitute(input, &ctx).into_owned()
}

/// Render a JSON template and parse the result
pub fn render_json_template(
    input: &str,
    agent: Agent,
    ctx: &TemplateContext,
) -> Result<serde_json::Value> {
    let rendered = render_template_string(input, agent, ctx);
    serde_json::from_str(&rendered).map_err(|e| SddError::InvalidRenderedJson {
        reason: e.to_string(),
    })
}

/// Serialize rendered JSON the way it is written to disk
pub fn to_json_file_contents(value: &serde_json::Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).map_err(|e| SddError::InvalidRenderedJson {
        reason: e.to_string(),
    })?;
    text.push('\n');
    Ok(text)
}
