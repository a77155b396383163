//! Turns recognized entities into scored symptom records.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{EscalationKind, SymptomRecord, UrgencyEvent};
use crate::config::ScoringConfig;
use crate::knowledge::{EscalationCluster, KnowledgeBase, SymptomProfile};
use crate::models::{EntityCategory, Urgency};
use crate::recognition::{EntitySet, tokenize};

/// Scores symptoms and evaluates escalation rules.
#[derive(Debug)]
pub struct SymptomExtractor {
    profiles: HashMap<String, SymptomProfile>,
    clusters: Vec<EscalationCluster>,
    cue_urgency: HashMap<String, Urgency>,
    scoring: ScoringConfig,
}

impl SymptomExtractor {
    /// Create an extractor from a knowledge base.
    pub fn new(knowledge: &KnowledgeBase, scoring: &ScoringConfig) -> Self {
        let profiles = knowledge
            .symptoms
            .iter()
            .map(|profile| (profile.name.clone(), profile.clone()))
            .collect();

        let cue_urgency = knowledge
            .entries(EntityCategory::UrgencyCue)
            .filter_map(|entry| entry.urgency.map(|u| (entry.canonical.clone(), u)))
            .collect();

        Self {
            profiles,
            clusters: knowledge.clusters.clone(),
            cue_urgency,
            scoring: scoring.clone(),
        }
    }

    /// Score the symptoms of one utterance, stamped with the current time.
    pub fn extract(&self, entities: &EntitySet, text: &str) -> Vec<SymptomRecord> {
        self.extract_at(entities, text, Utc::now())
    }

    /// Score the symptoms of one utterance observed at `observed_at`.
    ///
    /// Records are sorted by confidence, then urgency (both descending), then
    /// first appearance in the utterance.
    pub fn extract_at(
        &self,
        entities: &EntitySet,
        text: &str,
        observed_at: DateTime<Utc>,
    ) -> Vec<SymptomRecord> {
        let words: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|t| !t.boundary)
            .map(|t| t.text)
            .collect();
        let text_mentions = |name: &str| -> bool {
            let needle: Vec<&str> = name.split_whitespace().collect();
            !needle.is_empty()
                && words
                    .windows(needle.len())
                    .any(|window| window.iter().zip(&needle).all(|(a, b)| a == b))
        };

        let severity_present = entities.severity.is_specified();

        let mut scored: Vec<(usize, SymptomRecord)> = entities
            .symptoms
            .iter()
            .enumerate()
            .map(|(order, name)| {
                let profile = self.profiles.get(name);
                let weight = profile.map(|p| p.weight).unwrap_or(self.scoring.default_weight);
                let urgency = profile.map(|p| p.urgency).unwrap_or_default();

                let related_context: Vec<String> = profile
                    .map(|p| {
                        p.related
                            .iter()
                            .filter(|related| {
                                entities.symptoms.contains(*related)
                                    || (!entities.is_negated(related) && text_mentions(related))
                            })
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();

                let mut confidence = weight;
                if severity_present {
                    confidence += self.scoring.severity_bonus;
                }
                if !related_context.is_empty() {
                    confidence += self.scoring.related_bonus;
                }

                let mut matched_text = entities.surfaces_of(name);
                if matched_text.is_empty() {
                    matched_text.push(name.clone());
                }

                let record = SymptomRecord {
                    name: name.clone(),
                    confidence: confidence.clamp(0.0, 1.0),
                    matched_text,
                    urgency,
                    possible_causes: profile.map(|p| p.possible_causes.clone()).unwrap_or_default(),
                    related_context,
                    first_seen: observed_at,
                    last_seen: observed_at,
                    occurrence_count: 1,
                };
                (order, record)
            })
            .collect();

        scored.sort_by(|(order_a, a), (order_b, b)| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
                .then(b.urgency.cmp(&a.urgency))
                .then(order_a.cmp(order_b))
        });

        let records: Vec<SymptomRecord> = scored.into_iter().map(|(_, record)| record).collect();
        debug!(symptoms = records.len(), "Scored symptoms");
        records
    }

    /// Match the cluster table against the union of the current utterance's
    /// symptoms and the accumulated ones.
    pub fn escalations(
        &self,
        current: &[SymptomRecord],
        accumulated: &BTreeMap<String, SymptomRecord>,
    ) -> Vec<UrgencyEvent> {
        let present: HashSet<&str> = current
            .iter()
            .map(|record| record.name.as_str())
            .chain(accumulated.keys().map(String::as_str))
            .collect();

        self.clusters
            .iter()
            .filter(|cluster| !(cluster.required.is_empty() && cluster.min_supporting == 0))
            .filter_map(|cluster| {
                if !cluster.required.iter().all(|name| present.contains(name.as_str())) {
                    return None;
                }
                let supporting: Vec<&String> = cluster
                    .supporting
                    .iter()
                    .filter(|name| present.contains(name.as_str()))
                    .collect();
                if supporting.len() < cluster.min_supporting {
                    return None;
                }

                let triggers = cluster
                    .required
                    .iter()
                    .chain(supporting)
                    .cloned()
                    .collect();
                Some(UrgencyEvent {
                    name: cluster.name.clone(),
                    kind: EscalationKind::Cluster,
                    urgency: cluster.urgency,
                    triggers,
                    description: cluster.description.clone(),
                })
            })
            .collect()
    }

    /// Urgency events for asserted urgency cues that carry a tier.
    pub fn cue_events(&self, entities: &EntitySet) -> Vec<UrgencyEvent> {
        entities
            .urgency_indicators
            .iter()
            .filter_map(|cue| {
                self.cue_urgency.get(cue).map(|urgency| UrgencyEvent {
                    name: cue.clone(),
                    kind: EscalationKind::Cue,
                    urgency: *urgency,
                    triggers: entities.surfaces_of(cue),
                    description: format!("patient used urgent wording ({})", cue),
                })
            })
            .collect()
    }
}
