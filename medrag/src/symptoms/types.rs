//! Scored symptom records and derived urgency events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Urgency;

fn union_into(target: &mut Vec<String>, source: &[String]) {
    for item in source {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

/// A scored symptom, either from one utterance or accumulated over a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomRecord {
    /// Canonical symptom name
    pub name: String,

    /// Confidence in the finding (0.0 to 1.0)
    pub confidence: f32,

    /// Surface forms the patient used
    pub matched_text: Vec<String>,

    /// Urgency tier of the symptom
    pub urgency: Urgency,

    /// Possible causes to hint at
    pub possible_causes: Vec<String>,

    /// Related symptoms mentioned alongside
    #[serde(default)]
    pub related_context: Vec<String>,

    /// When the symptom was first reported
    pub first_seen: DateTime<Utc>,

    /// When the symptom was last reported
    pub last_seen: DateTime<Utc>,

    /// Number of utterances that reported the symptom
    pub occurrence_count: u32,
}

impl SymptomRecord {
    /// Fold a newer observation of the same symptom into this record.
    ///
    /// Confidence and urgency never decrease.
    pub fn merge(&mut self, newer: &SymptomRecord) {
        self.confidence = self.confidence.max(newer.confidence);
        self.urgency = self.urgency.raise(newer.urgency);
        if newer.last_seen > self.last_seen {
            self.last_seen = newer.last_seen;
        }
        if newer.first_seen < self.first_seen {
            self.first_seen = newer.first_seen;
        }
        self.occurrence_count = self.occurrence_count.saturating_add(newer.occurrence_count);
        union_into(&mut self.matched_text, &newer.matched_text);
        union_into(&mut self.possible_causes, &newer.possible_causes);
        union_into(&mut self.related_context, &newer.related_context);
    }
}

/// What produced an urgency event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EscalationKind {
    /// A co-occurrence cluster matched
    Cluster,
    /// An urgency cue phrase was asserted
    Cue,
}

/// A derived urgency signal that is not itself a symptom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrgencyEvent {
    /// Cluster name or canonical cue
    pub name: String,

    /// Origin of the event
    pub kind: EscalationKind,

    /// Tier the session escalates to
    pub urgency: Urgency,

    /// Symptom names or cue phrases that triggered the event
    pub triggers: Vec<String>,

    /// Human-readable description
    #[serde(default)]
    pub description: String,
}

impl UrgencyEvent {
    /// Fold a repeat of the same event into this one.
    pub fn merge(&mut self, repeat: &UrgencyEvent) {
        self.urgency = self.urgency.raise(repeat.urgency);
        union_into(&mut self.triggers, &repeat.triggers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(name: &str, confidence: f32, urgency: Urgency, at: DateTime<Utc>) -> SymptomRecord {
        SymptomRecord {
            name: name.to_string(),
            confidence,
            matched_text: vec![name.to_string()],
            urgency,
            possible_causes: vec![],
            related_context: vec![],
            first_seen: at,
            last_seen: at,
            occurrence_count: 1,
        }
    }

    #[test]
    fn test_merge_keeps_maximums() {
        let start = Utc::now();
        let mut existing = record("headache", 0.9, Urgency::Moderate, start);
        let mut newer = record("headache", 0.7, Urgency::Low, start + Duration::minutes(5));
        newer.matched_text = vec!["head pain".to_string()];

        existing.merge(&newer);

        assert_eq!(existing.confidence, 0.9);
        assert_eq!(existing.urgency, Urgency::Moderate);
        assert_eq!(existing.occurrence_count, 2);
        assert_eq!(existing.first_seen, start);
        assert_eq!(existing.last_seen, start + Duration::minutes(5));
        assert_eq!(existing.matched_text, vec!["headache", "head pain"]);
    }
}
