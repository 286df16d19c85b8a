//! Command-line usage errors

use super::SddError;

/// Creates an unknown flag error
pub fn unknown_flag(flag: impl Into<String>) -> SddError {
    SddError::UnknownFlag { flag: flag.into() }
}

/// Creates an unknown positional argument error
pub fn unknown_positional(arg: impl Into<String>) -> SddError {
    SddError::UnknownPositional { arg: arg.into() }
}

/// Creates an agent conflict error listing every distinct selection
pub fn agent_conflict<I, S>(agents: I) -> SddError
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let agents = agents
        .into_iter()
        .map(|a| a.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    SddError::AgentConflict { agents }
}
