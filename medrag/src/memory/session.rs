//! The per-conversation session entity and its state machine.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Urgency;
use crate::recognition::EntitySet;
use crate::symptoms::{SymptomExtractor, SymptomRecord, UrgencyEvent};

/// Conversation state.
///
/// `Initial` is the only start state; none are terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No committed turn yet (or just reset)
    #[default]
    Initial,
    /// Collecting the chief complaint
    GatheringInfo,
    /// Symptoms are on the table and being analysed
    SymptomAnalysis,
    /// Possible emergency; sticky until reset
    Emergency,
    /// Checking in on previously discussed symptoms
    FollowUp,
}

impl SessionState {
    /// Get a string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Initial => "INITIAL",
            SessionState::GatheringInfo => "GATHERING_INFO",
            SessionState::SymptomAnalysis => "SYMPTOM_ANALYSIS",
            SessionState::Emergency => "EMERGENCY",
            SessionState::FollowUp => "FOLLOW_UP",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated mentions of a condition or medication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MentionRecord {
    /// Canonical name
    pub name: String,
    /// First utterance that mentioned it
    pub first_seen: DateTime<Utc>,
    /// Latest utterance that mentioned it
    pub last_seen: DateTime<Utc>,
    /// Number of utterances that mentioned it
    pub mention_count: u32,
}

/// One user turn and the reply it received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// 1-based ordinal across the session's lifetime
    pub turn: u32,
    /// When the utterance was received
    pub timestamp: DateTime<Utc>,
    /// The utterance as sent
    pub raw_text: String,
    /// Entities recognized in the utterance
    pub entities: EntitySet,
    /// Symptoms scored from the utterance
    pub symptoms: Vec<SymptomRecord>,
    /// The language model's reply, once committed
    pub ai_response: Option<String>,
    /// Session urgency after this turn
    pub urgency_at_time: Urgency,
}

/// A turn staged by `enrich` and waiting for its reply.
#[derive(Debug, Clone)]
pub(crate) struct PendingTurn {
    pub raw_text: String,
    pub entities: EntitySet,
    pub symptoms: Vec<SymptomRecord>,
    pub staged_at: DateTime<Utc>,
}

/// State change caused by applying a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Transition {
    pub from: SessionState,
    pub to: SessionState,
}

/// Everything accumulated about one conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Caller-supplied identifier
    pub id: String,

    /// When the first turn was received
    pub created_at: DateTime<Utc>,

    /// Current conversation state
    pub state: SessionState,

    /// Recent interactions, oldest first
    pub interactions: VecDeque<Interaction>,

    /// Symptoms reported so far, by canonical name
    pub accumulated_symptoms: BTreeMap<String, SymptomRecord>,

    /// Conditions mentioned so far, by canonical name
    pub accumulated_conditions: BTreeMap<String, MentionRecord>,

    /// Medications mentioned so far, by canonical name
    pub accumulated_medications: BTreeMap<String, MentionRecord>,

    /// Escalations matched so far, one per name
    pub escalations: Vec<UrgencyEvent>,

    /// Highest urgency seen since creation or the last reset
    pub urgency_level: Urgency,

    /// Committed turns since creation or the last reset
    pub total_interactions: u32,

    /// Committed turns that ended in `SYMPTOM_ANALYSIS`
    pub analysis_cycles: u32,

    /// Last time the session changed
    pub last_activity: DateTime<Utc>,
}

/// An owned copy of a session handed to callers.
pub type SessionSnapshot = Session;

fn merge_mentions(target: &mut BTreeMap<String, MentionRecord>, names: &[String], at: DateTime<Utc>) {
    for name in names {
        target
            .entry(name.clone())
            .and_modify(|record| {
                record.last_seen = record.last_seen.max(at);
                record.mention_count = record.mention_count.saturating_add(1);
            })
            .or_insert_with(|| MentionRecord {
                name: name.clone(),
                first_seen: at,
                last_seen: at,
                mention_count: 1,
            });
    }
}

impl Session {
    /// Create an empty session.
    pub fn new(id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at: now,
            state: SessionState::Initial,
            interactions: VecDeque::new(),
            accumulated_symptoms: BTreeMap::new(),
            accumulated_conditions: BTreeMap::new(),
            accumulated_medications: BTreeMap::new(),
            escalations: Vec::new(),
            urgency_level: Urgency::Low,
            total_interactions: 0,
            analysis_cycles: 0,
            last_activity: now,
        }
    }

    /// Accumulated symptoms ordered by confidence (descending), then name.
    pub fn ranked_symptoms(&self) -> Vec<&SymptomRecord> {
        let mut ranked: Vec<&SymptomRecord> = self.accumulated_symptoms.values().collect();
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked
    }

    /// The most recent interaction that received a reply.
    pub fn last_answered_interaction(&self) -> Option<&Interaction> {
        self.interactions
            .iter()
            .rev()
            .find(|interaction| interaction.ai_response.is_some())
    }

    /// Whether anything clinically relevant has been accumulated.
    pub fn has_findings(&self) -> bool {
        !self.accumulated_symptoms.is_empty()
            || !self.accumulated_conditions.is_empty()
            || !self.accumulated_medications.is_empty()
            || !self.escalations.is_empty()
    }

    /// Clear everything except the identity.
    pub(crate) fn reset(&mut self, now: DateTime<Utc>) {
        self.state = SessionState::Initial;
        self.interactions.clear();
        self.accumulated_symptoms.clear();
        self.accumulated_conditions.clear();
        self.accumulated_medications.clear();
        self.escalations.clear();
        self.urgency_level = Urgency::Low;
        self.total_interactions = 0;
        self.analysis_cycles = 0;
        self.last_activity = now;
    }

    /// Merge a turn into the session and advance the state machine.
    pub(crate) fn apply_turn(
        &mut self,
        turn: &PendingTurn,
        ai_response: Option<String>,
        extractor: &SymptomExtractor,
        max_history: usize,
        now: DateTime<Utc>,
    ) -> Transition {
        let from = self.state;

        for record in &turn.symptoms {
            match self.accumulated_symptoms.get_mut(&record.name) {
                Some(existing) => existing.merge(record),
                None => {
                    self.accumulated_symptoms
                        .insert(record.name.clone(), record.clone());
                }
            }
        }
        merge_mentions(
            &mut self.accumulated_conditions,
            &turn.entities.conditions,
            turn.staged_at,
        );
        merge_mentions(
            &mut self.accumulated_medications,
            &turn.entities.medications,
            turn.staged_at,
        );

        let mut events = extractor.escalations(&turn.symptoms, &self.accumulated_symptoms);
        events.extend(extractor.cue_events(&turn.entities));
        for event in events {
            match self.escalations.iter_mut().find(|e| e.name == event.name) {
                Some(existing) => existing.merge(&event),
                None => self.escalations.push(event),
            }
        }

        self.urgency_level = self
            .accumulated_symptoms
            .values()
            .map(|record| record.urgency)
            .chain(self.escalations.iter().map(|event| event.urgency))
            .fold(self.urgency_level, Urgency::raise);

        self.total_interactions = self.total_interactions.saturating_add(1);
        self.interactions.push_back(Interaction {
            turn: self.total_interactions,
            timestamp: turn.staged_at,
            raw_text: turn.raw_text.clone(),
            entities: turn.entities.clone(),
            symptoms: turn.symptoms.clone(),
            ai_response,
            urgency_at_time: self.urgency_level,
        });
        while self.interactions.len() > max_history {
            self.interactions.pop_front();
        }

        self.state = self.next_state();
        if self.state == SessionState::SymptomAnalysis {
            self.analysis_cycles = self.analysis_cycles.saturating_add(1);
        }
        self.last_activity = now;

        Transition {
            from,
            to: self.state,
        }
    }

    /// Evaluate the transition rules in priority order.
    fn next_state(&self) -> SessionState {
        if self.state == SessionState::Emergency {
            return SessionState::Emergency;
        }

        let critical_escalation = self
            .escalations
            .iter()
            .any(|event| event.urgency == Urgency::Critical);
        if self.urgency_level == Urgency::Critical
            && (critical_escalation || self.total_interactions > 1)
        {
            return SessionState::Emergency;
        }

        if self.state == SessionState::FollowUp {
            return SessionState::FollowUp;
        }
        if self.total_interactions == 1 {
            return SessionState::GatheringInfo;
        }
        if !self.accumulated_symptoms.is_empty() {
            return SessionState::SymptomAnalysis;
        }
        SessionState::GatheringInfo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecognitionConfig, ScoringConfig};
    use crate::knowledge::KnowledgeBase;
    use crate::recognition::{EntityRecognizer, LexiconRecognizer};

    struct Harness {
        recognizer: LexiconRecognizer,
        extractor: SymptomExtractor,
    }

    impl Harness {
        fn new() -> Self {
            let kb = KnowledgeBase::default();
            Self {
                recognizer: LexiconRecognizer::new(&kb, &RecognitionConfig::default()),
                extractor: SymptomExtractor::new(&kb, &ScoringConfig::default()),
            }
        }

        fn turn(&self, text: &str) -> PendingTurn {
            let entities = self.recognizer.recognize(text);
            let symptoms = self.extractor.extract(&entities, text);
            PendingTurn {
                raw_text: text.to_string(),
                entities,
                symptoms,
                staged_at: Utc::now(),
            }
        }

        fn apply(&self, session: &mut Session, text: &str) -> Transition {
            let turn = self.turn(text);
            session.apply_turn(&turn, Some("ok".to_string()), &self.extractor, 10, Utc::now())
        }
    }

    #[test]
    fn test_first_critical_turn_gathers_info() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());

        let transition = harness.apply(&mut session, "I have chest pain");

        assert_eq!(transition.from, SessionState::Initial);
        assert_eq!(transition.to, SessionState::GatheringInfo);
        assert_eq!(session.urgency_level, Urgency::Critical);
        assert!(session.escalations.is_empty());
    }

    #[test]
    fn test_cluster_escalates_to_emergency_and_sticks() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());

        harness.apply(&mut session, "I have chest pain");
        harness.apply(&mut session, "It started an hour ago and I feel nauseous");
        assert_eq!(session.state, SessionState::Emergency);
        assert!(
            session
                .escalations
                .iter()
                .any(|e| e.name == "acute_coronary_pattern")
        );

        harness.apply(&mut session, "Actually I feel a bit better now");
        assert_eq!(session.state, SessionState::Emergency);
        assert_eq!(session.urgency_level, Urgency::Critical);
    }

    #[test]
    fn test_non_critical_conversation_moves_to_analysis() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());

        harness.apply(&mut session, "I have a headache");
        assert_eq!(session.state, SessionState::GatheringInfo);
        assert_eq!(session.analysis_cycles, 0);

        harness.apply(&mut session, "It has been there since yesterday");
        assert_eq!(session.state, SessionState::SymptomAnalysis);
        assert_eq!(session.analysis_cycles, 1);
        assert_eq!(session.urgency_level, Urgency::Moderate);
    }

    #[test]
    fn test_small_talk_stays_gathering() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());

        harness.apply(&mut session, "Hello there");
        harness.apply(&mut session, "How are you?");
        assert_eq!(session.state, SessionState::GatheringInfo);
        assert!(!session.has_findings());
    }

    #[test]
    fn test_follow_up_is_sticky_until_emergency() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());
        harness.apply(&mut session, "I have a cough");
        harness.apply(&mut session, "It is dry");
        session.state = SessionState::FollowUp;

        harness.apply(&mut session, "Still coughing a bit");
        assert_eq!(session.state, SessionState::FollowUp);

        harness.apply(&mut session, "Now I have a crushing chest pain");
        assert_eq!(session.state, SessionState::Emergency);
    }

    #[test]
    fn test_history_is_trimmed_without_touching_aggregates() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());

        let turn = harness.turn("I have a fever");
        session.apply_turn(&turn, None, &harness.extractor, 2, Utc::now());
        for text in ["hello", "still here", "anything else"] {
            let turn = harness.turn(text);
            session.apply_turn(&turn, None, &harness.extractor, 2, Utc::now());
        }

        assert_eq!(session.interactions.len(), 2);
        assert_eq!(session.interactions.front().unwrap().turn, 3);
        assert_eq!(session.total_interactions, 4);
        assert!(session.accumulated_symptoms.contains_key("fever"));
    }

    #[test]
    fn test_repeated_symptom_merges() {
        let harness = Harness::new();
        let mut session = Session::new("s1", Utc::now());
        harness.apply(&mut session, "I have a headache");
        harness.apply(&mut session, "The head pain is worse");

        let headache = &session.accumulated_symptoms["headache"];
        assert_eq!(headache.occurrence_count, 2);
        assert_eq!(headache.matched_text, vec!["headache", "head pain"]);
    }

    #[test]
    fn test_reset_clears_everything_but_identity() {
        let harness = Harness::new();
        let created = Utc::now();
        let mut session = Session::new("s1", created);
        harness.apply(&mut session, "I take ibuprofen for my arthritis and have a fever");

        session.reset(Utc::now());

        assert_eq!(session.id, "s1");
        assert_eq!(session.created_at, created);
        assert_eq!(session.state, SessionState::Initial);
        assert_eq!(session.urgency_level, Urgency::Low);
        assert!(session.interactions.is_empty());
        assert!(session.accumulated_symptoms.is_empty());
        assert!(session.accumulated_conditions.is_empty());
        assert!(session.accumulated_medications.is_empty());
        assert_eq!(session.total_interactions, 0);
    }

    #[test]
    fn test_state_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&SessionState::GatheringInfo).unwrap();
        assert_eq!(json, "\"GATHERING_INFO\"");
    }
}
