//! Data-driven rule tables shared by recognition, scoring and prompt assembly.
//!
//! Everything the engine knows about the clinical domain lives here as plain
//! data: which surface phrases map to which canonical terms, how much weight a
//! symptom mention carries, its baseline urgency, and which co-occurring
//! symptoms form a dangerous pattern. The tables are part of
//! [`MedragConfig`](crate::config::MedragConfig), so they can be replaced from a
//! configuration file without touching control flow.
//!
//! The built-in tables are illustrative defaults for a triage assistant and are
//! meant to be tuned; they are not clinical thresholds.

mod defaults;

use crate::models::{DurationClass, EntityCategory, Urgency};
use serde::{Deserialize, Serialize};

/// A canonical term and the surface phrases that refer to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LexiconEntry {
    /// Canonical name reported in entity sets and symptom records
    pub canonical: String,

    /// Category the phrases classify into
    pub category: EntityCategory,

    /// Lower-case surface phrases (one or more words, no punctuation)
    pub aliases: Vec<String>,

    /// Urgency raised by an asserted match (used by urgency cues)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl LexiconEntry {
    /// Create an entry with the given aliases.
    pub fn new(canonical: &str, category: EntityCategory, aliases: &[&str]) -> Self {
        Self {
            canonical: canonical.to_string(),
            category,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            urgency: None,
        }
    }

    /// Attach the urgency an asserted match raises the session to.
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }
}

/// Scoring and triage knowledge about one canonical symptom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomProfile {
    /// Canonical symptom name (must match a symptom lexicon entry)
    pub name: String,

    /// Base confidence of a direct phrase match (0.0 to 1.0)
    pub weight: f32,

    /// Baseline urgency; context never lowers it
    pub urgency: Urgency,

    /// Symptoms whose co-mention raises confidence in this one
    #[serde(default)]
    pub related: Vec<String>,

    /// Possible causes surfaced to the language model as hints
    #[serde(default)]
    pub possible_causes: Vec<String>,

    /// Questions worth asking when this symptom is on the table
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl SymptomProfile {
    /// Create a profile with a weight and baseline urgency.
    pub fn new(name: &str, weight: f32, urgency: Urgency) -> Self {
        Self {
            name: name.to_string(),
            weight,
            urgency,
            related: Vec::new(),
            possible_causes: Vec::new(),
            follow_up_questions: Vec::new(),
        }
    }

    /// Set the related symptoms.
    pub fn related(mut self, related: &[&str]) -> Self {
        self.related = related.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the possible causes.
    pub fn causes(mut self, causes: &[&str]) -> Self {
        self.possible_causes = causes.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the follow-up questions.
    pub fn questions(mut self, questions: &[&str]) -> Self {
        self.follow_up_questions = questions.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// A set of co-occurring symptoms that escalates urgency beyond any single
/// symptom's baseline.
///
/// A cluster matches when every `required` symptom is present and at least
/// `min_supporting` of the `supporting` symptoms are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscalationCluster {
    /// Identifier reported in urgency events
    pub name: String,

    /// Human-readable description of the pattern
    #[serde(default)]
    pub description: String,

    /// Symptoms that must all be present
    #[serde(default)]
    pub required: Vec<String>,

    /// Symptoms of which at least `min_supporting` must be present
    #[serde(default)]
    pub supporting: Vec<String>,

    /// Minimum number of supporting symptoms
    #[serde(default)]
    pub min_supporting: usize,

    /// Urgency the session escalates to on a match
    pub urgency: Urgency,
}

impl EscalationCluster {
    /// Create a cluster.
    pub fn new(
        name: &str,
        description: &str,
        required: &[&str],
        supporting: &[&str],
        min_supporting: usize,
        urgency: Urgency,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: required.iter().map(|s| s.to_string()).collect(),
            supporting: supporting.iter().map(|s| s.to_string()).collect(),
            min_supporting,
            urgency,
        }
    }

    /// All symptom names the cluster refers to.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.supporting.iter())
            .map(String::as_str)
    }
}

/// Phrases that classify how long ago a complaint started.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DurationMarkers {
    /// Minutes to hours
    pub acute: Vec<String>,
    /// Days to about a week
    pub subacute: Vec<String>,
    /// Weeks or longer
    pub chronic: Vec<String>,
}

impl DurationMarkers {
    /// Marker lists in evaluation order (first match wins).
    pub fn in_priority_order(&self) -> [(DurationClass, &[String]); 3] {
        [
            (DurationClass::Acute, self.acute.as_slice()),
            (DurationClass::Subacute, self.subacute.as_slice()),
            (DurationClass::Chronic, self.chronic.as_slice()),
        ]
    }
}

impl Default for DurationMarkers {
    fn default() -> Self {
        defaults::duration_markers()
    }
}

/// The complete rule table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KnowledgeBase {
    /// Alias table for every entity category
    pub lexicon: Vec<LexiconEntry>,

    /// Scoring profiles keyed by canonical symptom name
    pub symptoms: Vec<SymptomProfile>,

    /// Dangerous co-occurrence patterns
    pub clusters: Vec<EscalationCluster>,

    /// Phrases that negate a following match ("no", "denies", "no sign of")
    pub negation_markers: Vec<String>,

    /// Words that end the scope of a negation ("but", "however", "and")
    pub clause_breakers: Vec<String>,

    /// Onset classification markers
    pub duration: DurationMarkers,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            lexicon: defaults::lexicon(),
            symptoms: defaults::symptom_profiles(),
            clusters: defaults::escalation_clusters(),
            negation_markers: defaults::negation_markers(),
            clause_breakers: defaults::clause_breakers(),
            duration: DurationMarkers::default(),
        }
    }
}

impl KnowledgeBase {
    /// An empty rule table; recognizes nothing.
    pub fn empty() -> Self {
        Self {
            lexicon: Vec::new(),
            symptoms: Vec::new(),
            clusters: Vec::new(),
            negation_markers: Vec::new(),
            clause_breakers: Vec::new(),
            duration: DurationMarkers {
                acute: Vec::new(),
                subacute: Vec::new(),
                chronic: Vec::new(),
            },
        }
    }

    /// Look up the scoring profile of a canonical symptom.
    pub fn symptom_profile(&self, name: &str) -> Option<&SymptomProfile> {
        self.symptoms.iter().find(|profile| profile.name == name)
    }

    /// Lexicon entries of one category.
    pub fn entries(&self, category: EntityCategory) -> impl Iterator<Item = &LexiconEntry> {
        self.lexicon
            .iter()
            .filter(move |entry| entry.category == category)
    }

    /// Whether the lexicon defines the given canonical symptom.
    pub fn has_symptom(&self, name: &str) -> bool {
        self.entries(EntityCategory::Symptom)
            .any(|entry| entry.canonical == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles_reference_lexicon_symptoms() {
        let kb = KnowledgeBase::default();
        for profile in &kb.symptoms {
            assert!(
                kb.has_symptom(&profile.name),
                "profile '{}' has no lexicon entry",
                profile.name
            );
        }
    }

    #[test]
    fn test_default_clusters_reference_lexicon_symptoms() {
        let kb = KnowledgeBase::default();
        for cluster in &kb.clusters {
            for member in cluster.members() {
                assert!(
                    kb.has_symptom(member),
                    "cluster '{}' refers to unknown symptom '{}'",
                    cluster.name,
                    member
                );
            }
        }
    }

    #[test]
    fn test_chest_pain_is_critical() {
        let kb = KnowledgeBase::default();
        let profile = kb.symptom_profile("chest pain").unwrap();
        assert_eq!(profile.urgency, Urgency::Critical);
        assert!(profile.weight >= 0.8);
    }

    #[test]
    fn test_knowledge_base_json_round_trip_keeps_cue_urgency() {
        let kb = KnowledgeBase::default();
        let json = serde_json::to_string(&kb).unwrap();
        let parsed: KnowledgeBase = serde_json::from_str(&json).unwrap();
        let cue = parsed
            .entries(EntityCategory::UrgencyCue)
            .find(|entry| entry.canonical == "call emergency services")
            .unwrap();
        assert_eq!(cue.urgency, Some(Urgency::Critical));
    }
}
