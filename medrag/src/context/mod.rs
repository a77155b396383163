//! Prompt assembly.
//!
//! [`ContextBuilder::build`] is a pure function from a session snapshot and
//! the current utterance to an [`EnrichedContext`]: the prompt sent to the
//! completion service plus structured metadata describing what went into it.

mod builder;

pub use builder::ContextBuilder;

use serde::{Deserialize, Serialize};

use crate::memory::SessionState;
use crate::models::Urgency;

/// Structured description of an assembled prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextMetadata {
    /// Session state the prompt was written for
    pub state: SessionState,

    /// Session urgency
    pub urgency: Urgency,

    /// Interaction number of the current turn
    pub interaction_count: u32,

    /// Symptoms listed in the summary, highest confidence first
    pub included_symptoms: Vec<String>,

    /// Symptoms left out to fit the character budget, lowest confidence first
    pub dropped_symptoms: Vec<String>,

    /// Whether anything was left out to fit the budget
    pub truncated: bool,

    /// Prompt length in characters
    pub prompt_chars: usize,

    /// Suggested questions for the assistant
    pub follow_up_questions: Vec<String>,

    /// Facts the conversation has not established yet
    pub information_gaps: Vec<String>,

    /// Suggested direction for the next reply
    pub next_steps: Vec<String>,

    /// Names of matched escalations
    pub escalations: Vec<String>,
}

/// An assembled prompt and its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedContext {
    /// Prompt text for the completion service
    pub prompt: String,

    /// What the prompt contains
    pub metadata: ContextMetadata,
}
