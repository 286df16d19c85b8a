//! Interactive overwrite prompt
//!
//! The "overwrite all" / "skip all" answer is remembered in a
//! [`GlobalDecision`] owned by the prompt, so it lasts for one run only.

use std::fmt;

use inquire::{InquireError, Select};

use super::{ConflictDecision, ConflictResolver};
use crate::error::Result;

/// Answers offered for a conflicting file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Overwrite,
    Skip,
    OverwriteAll,
    SkipAll,
}

impl PromptAnswer {
    pub const ALL: [PromptAnswer; 4] = [
        PromptAnswer::Overwrite,
        PromptAnswer::Skip,
        PromptAnswer::OverwriteAll,
        PromptAnswer::SkipAll,
    ];
}

impl fmt::Display for PromptAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PromptAnswer::Overwrite => "Overwrite",
            PromptAnswer::Skip => "Skip",
            PromptAnswer::OverwriteAll => "Overwrite all remaining",
            PromptAnswer::SkipAll => "Skip all remaining",
        })
    }
}

/// Decision remembered for the rest of the run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalDecision {
    remembered: Option<ConflictDecision>,
}

impl GlobalDecision {
    pub fn remembered(&self) -> Option<ConflictDecision> {
        self.remembered
    }

    /// Turn an answer into a decision, remembering the global ones
    pub fn apply(&mut self, answer: PromptAnswer) -> ConflictDecision {
        match answer {
            PromptAnswer::Overwrite => ConflictDecision::Overwrite,
            PromptAnswer::Skip => ConflictDecision::Skip,
            PromptAnswer::OverwriteAll => {
                self.remembered = Some(ConflictDecision::Overwrite);
                ConflictDecision::Overwrite
            }
            PromptAnswer::SkipAll => {
                self.remembered = Some(ConflictDecision::Skip);
                ConflictDecision::Skip
            }
        }
    }
}

type Asker = Box<dyn FnMut(&str) -> Result<PromptAnswer>>;

/// Conflict resolver asking on the terminal
pub struct InteractivePrompt {
    decision: GlobalDecision,
    ask: Asker,
}

impl InteractivePrompt {
    pub fn new() -> Self {
        Self::with_asker(ask_on_terminal)
    }

    /// Use a custom question function instead of the terminal
    pub fn with_asker(ask: impl FnMut(&str) -> Result<PromptAnswer> + 'static) -> Self {
        Self {
            decision: GlobalDecision::default(),
            ask: Box::new(ask),
        }
    }

    pub fn decision(&self) -> GlobalDecision {
        self.decision
    }
}

impl Default for InteractivePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ConflictResolver for InteractivePrompt {
    fn resolve(&mut self, rel_path: &str) -> Result<ConflictDecision> {
        if let Some(decision) = self.decision.remembered() {
            return Ok(decision);
        }
        let answer = (self.ask)(rel_path)?;
        Ok(self.decision.apply(answer))
    }
}

fn ask_on_terminal(rel_path: &str) -> Result<PromptAnswer> {
    let message = format!("{rel_path} already exists. Overwrite?");
    match Select::new(&message, PromptAnswer::ALL.to_vec())
        .with_help_message("↑↓ to move, Enter to select, Esc to skip")
        .prompt()
    {
        Ok(answer) => Ok(answer),
        Err(InquireError::OperationCanceled) => Ok(PromptAnswer::Skip),
        Err(e) => Err(e.into()),
    }
}
