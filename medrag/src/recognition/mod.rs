//! Entity recognition for patient utterances.
//!
//! Spans of the input are classified into symptoms, body regions, conditions,
//! medications, temporal expressions, severity qualifiers and urgency cues
//! using the alias table of the [`KnowledgeBase`](crate::knowledge::KnowledgeBase).
//! Matches preceded by a negation marker in the same clause are excluded.

mod recognizer;
mod traits;
mod types;

pub use recognizer::*;
pub use traits::*;
pub use types::*;
