//! Types produced by entity recognition.

use crate::models::{DurationClass, EntityCategory, Severity};
use serde::{Deserialize, Serialize};

/// One accepted span of the input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mention {
    /// Canonical term the span maps to
    pub canonical: String,

    /// Category of the span
    pub category: EntityCategory,

    /// Normalized surface text of the span
    pub surface: String,

    /// Index of the first token of the span
    pub token_start: usize,

    /// Index one past the last token of the span
    pub token_end: usize,

    /// Whether a preceding negation marker excluded the span
    pub negated: bool,
}

impl Mention {
    /// Number of tokens covered by the span.
    pub fn len(&self) -> usize {
        self.token_end - self.token_start
    }

    /// Whether the span covers no tokens.
    pub fn is_empty(&self) -> bool {
        self.token_end == self.token_start
    }
}

/// Everything recognized in a single utterance.
///
/// Lists keep first-occurrence order and contain no duplicates. Negated
/// matches are excluded from the category lists and reported in `negated`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntitySet {
    /// Canonical symptom names
    pub symptoms: Vec<String>,

    /// Canonical body regions
    pub body_parts: Vec<String>,

    /// Canonical condition names
    pub conditions: Vec<String>,

    /// Canonical medication names
    pub medications: Vec<String>,

    /// Temporal expressions as written
    pub temporal_expressions: Vec<String>,

    /// Highest asserted severity qualifier
    pub severity: Severity,

    /// Canonical urgency cues
    pub urgency_indicators: Vec<String>,

    /// Onset classification
    #[serde(default)]
    pub duration: DurationClass,

    /// Canonical terms that were found but excluded by negation
    #[serde(default)]
    pub negated: Vec<String>,

    /// Every accepted span in input order
    #[serde(default)]
    pub mentions: Vec<Mention>,
}

impl EntitySet {
    /// Whether nothing clinically relevant was recognized.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
            && self.body_parts.is_empty()
            && self.conditions.is_empty()
            && self.medications.is_empty()
            && self.temporal_expressions.is_empty()
            && self.urgency_indicators.is_empty()
            && !self.severity.is_specified()
    }

    /// Number of asserted entities across all list categories.
    pub fn entity_count(&self) -> usize {
        self.symptoms.len()
            + self.body_parts.len()
            + self.conditions.len()
            + self.medications.len()
            + self.temporal_expressions.len()
            + self.urgency_indicators.len()
    }

    /// Whether the canonical term was recognized and then negated.
    pub fn is_negated(&self, canonical: &str) -> bool {
        self.negated.iter().any(|term| term == canonical)
    }

    /// Whether the utterance said anything about timing.
    pub fn has_timing(&self) -> bool {
        !self.temporal_expressions.is_empty() || self.duration != DurationClass::Unspecified
    }

    /// Surface forms of the asserted mentions of a canonical term.
    pub fn surfaces_of(&self, canonical: &str) -> Vec<String> {
        let mut surfaces: Vec<String> = Vec::new();
        for mention in self
            .mentions
            .iter()
            .filter(|m| !m.negated && m.canonical == canonical)
        {
            if !surfaces.contains(&mention.surface) {
                surfaces.push(mention.surface.clone());
            }
        }
        surfaces
    }

    /// Token position of the first asserted mention of a canonical term.
    pub fn first_position(&self, canonical: &str) -> Option<usize> {
        self.mentions
            .iter()
            .find(|m| !m.negated && m.canonical == canonical)
            .map(|m| m.token_start)
    }

    pub(crate) fn list_mut(&mut self, category: EntityCategory) -> Option<&mut Vec<String>> {
        match category {
            EntityCategory::Symptom => Some(&mut self.symptoms),
            EntityCategory::BodyPart => Some(&mut self.body_parts),
            EntityCategory::Condition => Some(&mut self.conditions),
            EntityCategory::Medication => Some(&mut self.medications),
            EntityCategory::Temporal => Some(&mut self.temporal_expressions),
            EntityCategory::UrgencyCue => Some(&mut self.urgency_indicators),
            EntityCategory::Severity => None,
        }
    }
}
