//! Concurrent session store.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::session::{PendingTurn, Session, SessionSnapshot, SessionState};
use super::validate_session_id;
use crate::config::MemoryConfig;
use crate::recognition::EntitySet;
use crate::symptoms::{SymptomExtractor, SymptomRecord};
use crate::{MedragError, Result};

/// Counters describing the session table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MemoryStats {
    /// Sessions with at least one committed turn
    pub active_sessions: usize,
    /// Staged turns waiting for a commit
    pub pending_interactions: usize,
    /// Committed turns across all live sessions
    pub interactions_total: u64,
    /// Live sessions per conversation state
    pub sessions_by_state: BTreeMap<SessionState, usize>,
    /// Sessions removed by expiry or capacity eviction since start
    pub evicted_total: u64,
}

#[derive(Debug)]
struct SessionSlot {
    /// Committed state; `None` until the first commit
    session: Option<Session>,
    pending: Option<PendingTurn>,
    touched_at: DateTime<Utc>,
    /// Set when the slot was removed from the table while a caller waited on it
    evicted: bool,
}

impl SessionSlot {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            session: None,
            pending: None,
            touched_at: now,
            evicted: false,
        }
    }

    fn last_activity(&self) -> DateTime<Utc> {
        match &self.session {
            Some(session) => session.last_activity.max(self.touched_at),
            None => self.touched_at,
        }
    }
}

fn not_found(session_id: &str) -> MedragError {
    MedragError::SessionNotFound {
        session_id: session_id.to_string(),
    }
}

/// Owner of every live session.
///
/// The table is sharded; each session has its own async mutex so turns of
/// one session are serialized while different sessions proceed in parallel.
#[derive(Debug)]
pub struct ConversationMemory {
    sessions: DashMap<String, Arc<Mutex<SessionSlot>>>,
    extractor: Arc<SymptomExtractor>,
    pub(super) config: MemoryConfig,
    evicted_total: AtomicU64,
}

impl ConversationMemory {
    /// Create an empty store.
    pub fn new(config: MemoryConfig, extractor: Arc<SymptomExtractor>) -> Self {
        Self {
            sessions: DashMap::new(),
            extractor,
            config,
            evicted_total: AtomicU64::new(0),
        }
    }

    /// Memory settings in use.
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Number of session slots, including ones not yet committed.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the table holds no slots.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn existing_slot(&self, session_id: &str) -> Option<Arc<Mutex<SessionSlot>>> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn slot_for_update(&self, session_id: &str, now: DateTime<Utc>) -> Arc<Mutex<SessionSlot>> {
        if let Some(slot) = self.existing_slot(session_id) {
            return slot;
        }

        if self.sessions.len() >= self.config.max_sessions {
            self.evict_least_recently_active();
        }

        let slot = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(SessionSlot::new(now))))
            .value()
            .clone();
        debug!(session_id = %session_id, "Opened session slot");
        slot
    }

    fn is_expired(&self, slot: &SessionSlot, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(self.config.session_ttl) {
            Ok(ttl) => now - slot.last_activity() > ttl,
            Err(_) => false,
        }
    }

    /// Whether a locked slot can no longer serve `session_id`.
    ///
    /// A slot past its TTL is dropped from the table on the spot, so an expired
    /// session is never visible or resumable even before the next sweep.
    fn is_gone(
        &self,
        session_id: &str,
        slot: &Arc<Mutex<SessionSlot>>,
        guard: &mut SessionSlot,
        now: DateTime<Utc>,
    ) -> bool {
        if guard.evicted {
            return true;
        }
        if !self.is_expired(guard, now) {
            return false;
        }

        guard.evicted = true;
        let removed = self
            .sessions
            .remove_if(session_id, |_, current| Arc::ptr_eq(current, slot));
        if removed.is_some() {
            self.evicted_total.fetch_add(1, Ordering::Relaxed);
        }
        debug!(session_id = %session_id, "Dropped expired session ahead of sweep");
        true
    }

    /// Remove the slot if it is idle and `should_evict` agrees.
    fn try_evict(&self, session_id: &str, should_evict: impl Fn(&SessionSlot) -> bool) -> bool {
        let removed = self
            .sessions
            .remove_if(session_id, |_, slot| match slot.try_lock() {
                Ok(mut guard) if should_evict(&guard) => {
                    guard.evicted = true;
                    true
                }
                _ => false,
            });

        if removed.is_some() {
            self.evicted_total.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    fn evict_least_recently_active(&self) {
        let victim = self
            .sessions
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .try_lock()
                    .ok()
                    .map(|slot| (slot.last_activity(), entry.key().clone()))
            })
            .min();

        match victim {
            Some((last_activity, session_id)) if self.try_evict(&session_id, |_| true) => {
                warn!(
                    session_id = %session_id,
                    last_activity = %last_activity,
                    max_sessions = self.config.max_sessions,
                    "Session table full; evicted least recently active session"
                );
            }
            _ => {
                warn!(
                    max_sessions = self.config.max_sessions,
                    "Session table full and every session is busy; admitting anyway"
                );
            }
        }
    }

    /// Stage a turn and return the session as it would look once committed.
    ///
    /// Creates the slot for an unseen id. The committed session is not
    /// changed; a previous uncommitted turn is replaced.
    pub async fn update(
        &self,
        session_id: &str,
        text: &str,
        entities: EntitySet,
        symptoms: Vec<SymptomRecord>,
        now: DateTime<Utc>,
    ) -> Result<SessionSnapshot> {
        validate_session_id(session_id)?;

        let mut guard = loop {
            let slot = self.slot_for_update(session_id, now);
            let mut guard = Arc::clone(&slot).lock_owned().await;
            if !self.is_gone(session_id, &slot, &mut guard, now) {
                break guard;
            }
        };

        let turn = PendingTurn {
            raw_text: text.to_string(),
            entities,
            symptoms,
            staged_at: now,
        };

        let mut prospective = guard
            .session
            .clone()
            .unwrap_or_else(|| Session::new(session_id, now));
        prospective.apply_turn(
            &turn,
            None,
            &self.extractor,
            self.config.max_history,
            now,
        );

        if guard.pending.is_some() {
            debug!(session_id = %session_id, "Replacing uncommitted turn");
        }
        guard.pending = Some(turn);
        guard.touched_at = now;

        Ok(prospective)
    }

    /// Apply the staged turn with the assistant's reply attached.
    pub async fn commit(
        &self,
        session_id: &str,
        ai_response: &str,
        now: DateTime<Utc>,
    ) -> Result<()> {
        validate_session_id(session_id)?;
        let slot = self
            .existing_slot(session_id)
            .ok_or_else(|| not_found(session_id))?;
        let mut guard = slot.lock().await;
        if self.is_gone(session_id, &slot, &mut guard, now) {
            return Err(not_found(session_id));
        }

        let Some(pending) = guard.pending.take() else {
            return Err(MedragError::NoPendingInteraction {
                session_id: session_id.to_string(),
            });
        };

        let created = guard.session.is_none();
        let mut session = guard
            .session
            .take()
            .unwrap_or_else(|| Session::new(session_id, pending.staged_at));
        let transition = session.apply_turn(
            &pending,
            Some(ai_response.to_string()),
            &self.extractor,
            self.config.max_history,
            now,
        );

        if created {
            info!(session_id = %session_id, "Session created");
        }
        if transition.from != transition.to {
            if transition.to == SessionState::Emergency {
                warn!(
                    session_id = %session_id,
                    from = %transition.from,
                    urgency = %session.urgency_level,
                    "Session escalated to emergency"
                );
            } else {
                info!(
                    session_id = %session_id,
                    from = %transition.from,
                    to = %transition.to,
                    "Session state changed"
                );
            }
        }
        info!(
            session_id = %session_id,
            turn = session.total_interactions,
            urgency = %session.urgency_level,
            symptoms = session.accumulated_symptoms.len(),
            "Committed interaction"
        );

        guard.session = Some(session);
        guard.touched_at = now;
        Ok(())
    }

    /// Snapshot of a committed session, unless it has been idle past the TTL.
    pub async fn get_session(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionSnapshot> {
        validate_session_id(session_id)?;
        let slot = self
            .existing_slot(session_id)
            .ok_or_else(|| not_found(session_id))?;
        let mut guard = slot.lock().await;
        if self.is_gone(session_id, &slot, &mut guard, now) {
            return Err(not_found(session_id));
        }
        guard.session.clone().ok_or_else(|| not_found(session_id))
    }

    /// Clear a committed session back to `INITIAL`, dropping any staged turn.
    pub async fn reset_session(&self, session_id: &str, now: DateTime<Utc>) -> Result<()> {
        validate_session_id(session_id)?;
        let slot = self
            .existing_slot(session_id)
            .ok_or_else(|| not_found(session_id))?;
        let mut guard = slot.lock().await;
        let slot_state = &mut *guard;
        if self.is_gone(session_id, &slot, slot_state, now) {
            return Err(not_found(session_id));
        }
        let Some(session) = slot_state.session.as_mut() else {
            return Err(not_found(session_id));
        };

        session.reset(now);
        slot_state.pending = None;
        slot_state.touched_at = now;
        info!(session_id = %session_id, "Session reset");
        Ok(())
    }

    /// Move a session to `FOLLOW_UP`.
    ///
    /// Refused for emergency sessions and for sessions that never reached
    /// symptom analysis.
    pub async fn mark_follow_up(&self, session_id: &str, now: DateTime<Utc>) -> Result<()> {
        validate_session_id(session_id)?;
        let slot = self
            .existing_slot(session_id)
            .ok_or_else(|| not_found(session_id))?;
        let mut guard = slot.lock().await;
        let slot_state = &mut *guard;
        if self.is_gone(session_id, &slot, slot_state, now) {
            return Err(not_found(session_id));
        }
        let Some(session) = slot_state.session.as_mut() else {
            return Err(not_found(session_id));
        };

        if session.state == SessionState::Emergency || session.analysis_cycles == 0 {
            return Err(MedragError::InvalidTransition {
                session_id: session_id.to_string(),
                from: session.state,
                to: SessionState::FollowUp,
            });
        }

        let from = session.state;
        session.state = SessionState::FollowUp;
        session.last_activity = now;
        slot_state.touched_at = now;
        info!(session_id = %session_id, from = %from, to = %SessionState::FollowUp, "Session state changed");
        Ok(())
    }

    /// Remove sessions idle for longer than the TTL.
    ///
    /// Sessions whose lock is held are left for the next sweep. Returns the
    /// number of sessions removed.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let is_expired = |slot: &SessionSlot| self.is_expired(slot, now);

        let mut deferred = 0usize;
        let expired: Vec<String> = self
            .sessions
            .iter()
            .filter_map(|entry| match entry.value().try_lock() {
                Ok(slot) if is_expired(&slot) => Some(entry.key().clone()),
                Ok(_) => None,
                Err(_) => {
                    deferred += 1;
                    None
                }
            })
            .collect();

        let mut evicted = 0usize;
        for session_id in &expired {
            if self.try_evict(session_id, is_expired) {
                evicted += 1;
            } else {
                deferred += 1;
            }
        }

        debug!(
            evicted,
            deferred,
            remaining = self.sessions.len(),
            "Expiry sweep finished"
        );
        evicted
    }

    /// Counters over the live sessions.
    pub async fn stats(&self) -> MemoryStats {
        let slots: Vec<Arc<Mutex<SessionSlot>>> = self
            .sessions
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut stats = MemoryStats {
            evicted_total: self.evicted_total.load(Ordering::Relaxed),
            ..MemoryStats::default()
        };
        for slot in slots {
            let guard = slot.lock().await;
            if guard.evicted {
                continue;
            }
            if let Some(session) = &guard.session {
                stats.active_sessions += 1;
                stats.interactions_total += u64::from(session.total_interactions);
                *stats.sessions_by_state.entry(session.state).or_insert(0) += 1;
            }
            if guard.pending.is_some() {
                stats.pending_interactions += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecognitionConfig, ScoringConfig};
    use crate::knowledge::KnowledgeBase;
    use crate::recognition::{EntityRecognizer, LexiconRecognizer};
    use crate::models::Urgency;
    use chrono::Duration;

    struct Fixture {
        memory: ConversationMemory,
        recognizer: LexiconRecognizer,
        extractor: Arc<SymptomExtractor>,
    }

    impl Fixture {
        fn new(config: MemoryConfig) -> Self {
            let kb = KnowledgeBase::default();
            let extractor = Arc::new(SymptomExtractor::new(&kb, &ScoringConfig::default()));
            Self {
                memory: ConversationMemory::new(config, Arc::clone(&extractor)),
                recognizer: LexiconRecognizer::new(&kb, &RecognitionConfig::default()),
                extractor,
            }
        }

        async fn turn(&self, session_id: &str, text: &str, now: DateTime<Utc>) {
            let entities = self.recognizer.recognize(text);
            let symptoms = self.extractor.extract_at(&entities, text, now);
            self.memory
                .update(session_id, text, entities, symptoms, now)
                .await
                .unwrap();
            self.memory.commit(session_id, "noted", now).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_update_does_not_touch_committed_state() {
        let fx = Fixture::new(MemoryConfig::default());
        let now = Utc::now();
        fx.turn("s1", "I have a headache", now).await;

        let before = fx.memory.get_session("s1", now).await.unwrap();
        let text = "and now a fever";
        let entities = fx.recognizer.recognize(text);
        let symptoms = fx.extractor.extract(&entities, text);
        let prospective = fx
            .memory
            .update("s1", text, entities, symptoms, now)
            .await
            .unwrap();

        assert!(prospective.accumulated_symptoms.contains_key("fever"));
        assert_eq!(prospective.total_interactions, 2);
        assert_eq!(fx.memory.get_session("s1", now).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_uncommitted_session_is_invisible() {
        let fx = Fixture::new(MemoryConfig::default());
        let entities = fx.recognizer.recognize("hello");
        fx.memory
            .update("fresh", "hello", entities, vec![], Utc::now())
            .await
            .unwrap();

        assert!(matches!(
            fx.memory.get_session("fresh", Utc::now()).await,
            Err(MedragError::SessionNotFound { .. })
        ));
        let stats = fx.memory.stats().await;
        assert_eq!(stats.active_sessions, 0);
        assert_eq!(stats.pending_interactions, 1);
    }

    #[tokio::test]
    async fn test_commit_without_pending_turn() {
        let fx = Fixture::new(MemoryConfig::default());
        fx.turn("s1", "hello", Utc::now()).await;

        let result = fx.memory.commit("s1", "again", Utc::now()).await;
        assert!(matches!(
            result,
            Err(MedragError::NoPendingInteraction { .. })
        ));
        assert!(matches!(
            fx.memory.commit("unknown", "reply", Utc::now()).await,
            Err(MedragError::SessionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_expired_sessions_are_evicted() {
        let fx = Fixture::new(MemoryConfig::default());
        let start = Utc::now();
        fx.turn("idle", "I have a cough", start).await;
        fx.turn("busy", "I have a cough", start + Duration::minutes(25)).await;

        let evicted = fx.memory.evict_expired(start + Duration::minutes(31));

        assert_eq!(evicted, 1);
        let later = start + Duration::minutes(31);
        assert!(fx.memory.get_session("idle", later).await.is_err());
        assert!(fx.memory.get_session("busy", later).await.is_ok());
        assert_eq!(fx.memory.stats().await.evicted_total, 1);
    }

    #[tokio::test]
    async fn test_expired_session_is_gone_before_sweep() {
        let fx = Fixture::new(MemoryConfig::default());
        let start = Utc::now();
        fx.turn("s1", "I have chest pain", start).await;
        let later = start + Duration::minutes(31);

        assert!(fx.memory.get_session("s1", start).await.is_ok());
        assert!(matches!(
            fx.memory.get_session("s1", later).await,
            Err(MedragError::SessionNotFound { .. })
        ));
        assert!(fx.memory.is_empty());
        assert_eq!(fx.memory.stats().await.evicted_total, 1);
    }

    #[tokio::test]
    async fn test_update_after_expiry_starts_fresh_session() {
        let fx = Fixture::new(MemoryConfig::default());
        let start = Utc::now();
        fx.turn("s1", "I have chest pain", start).await;
        fx.turn("s1", "and I feel nauseous", start).await;

        let later = start + Duration::minutes(45);
        let entities = fx.recognizer.recognize("hello");
        let prospective = fx
            .memory
            .update("s1", "hello", entities, vec![], later)
            .await
            .unwrap();

        assert_eq!(prospective.total_interactions, 1);
        assert_eq!(prospective.urgency_level, Urgency::Low);
        assert!(prospective.accumulated_symptoms.is_empty());
        assert_eq!(prospective.created_at, later);
    }

    #[tokio::test]
    async fn test_expired_session_refuses_commit_reset_and_follow_up() {
        let fx = Fixture::new(MemoryConfig::default());
        let start = Utc::now();
        for id in ["a", "b", "c"] {
            fx.turn(id, "I have a cough", start).await;
            fx.turn(id, "still coughing", start).await;
        }
        let later = start + Duration::hours(1);

        assert!(matches!(
            fx.memory.commit("a", "reply", later).await,
            Err(MedragError::SessionNotFound { .. })
        ));
        assert!(matches!(
            fx.memory.reset_session("b", later).await,
            Err(MedragError::SessionNotFound { .. })
        ));
        assert!(matches!(
            fx.memory.mark_follow_up("c", later).await,
            Err(MedragError::SessionNotFound { .. })
        ));
        assert!(fx.memory.is_empty());
    }

    #[tokio::test]
    async fn test_locked_sessions_are_deferred() {
        let fx = Fixture::new(MemoryConfig::default());
        let start = Utc::now();
        fx.turn("s1", "I have a cough", start).await;

        let slot = fx.memory.existing_slot("s1").unwrap();
        let held = slot.lock().await;
        assert_eq!(fx.memory.evict_expired(start + Duration::hours(2)), 0);
        drop(held);

        assert_eq!(fx.memory.evict_expired(start + Duration::hours(2)), 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_active() {
        let config = MemoryConfig {
            max_sessions: 2,
            ..MemoryConfig::default()
        };
        let fx = Fixture::new(config);
        let start = Utc::now();
        fx.turn("a", "hello", start).await;
        fx.turn("b", "hello", start + Duration::seconds(10)).await;
        fx.turn("a", "hello again", start + Duration::seconds(20)).await;

        fx.turn("c", "hello", start + Duration::seconds(30)).await;

        assert_eq!(fx.memory.len(), 2);
        assert!(fx.memory.get_session("a", start).await.is_ok());
        assert!(fx.memory.get_session("b", start).await.is_err());
        assert!(fx.memory.get_session("c", start).await.is_ok());
    }

    #[tokio::test]
    async fn test_follow_up_requires_analysis() {
        let fx = Fixture::new(MemoryConfig::default());
        let now = Utc::now();
        fx.turn("s1", "I have a cough", now).await;

        let refused = fx.memory.mark_follow_up("s1", now).await;
        assert!(matches!(
            refused,
            Err(MedragError::InvalidTransition {
                from: SessionState::GatheringInfo,
                to: SessionState::FollowUp,
                ..
            })
        ));

        fx.turn("s1", "It is a dry cough", now).await;
        fx.memory.mark_follow_up("s1", now).await.unwrap();
        assert_eq!(
            fx.memory.get_session("s1", now).await.unwrap().state,
            SessionState::FollowUp
        );
    }

    #[tokio::test]
    async fn test_follow_up_refused_during_emergency() {
        let fx = Fixture::new(MemoryConfig::default());
        let now = Utc::now();
        fx.turn("s1", "I have chest pain", now).await;
        fx.turn("s1", "and I am sweating", now).await;

        let refused = fx.memory.mark_follow_up("s1", now).await;
        assert!(matches!(
            refused,
            Err(MedragError::InvalidTransition {
                from: SessionState::Emergency,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_stats_by_state() {
        let fx = Fixture::new(MemoryConfig::default());
        let now = Utc::now();
        fx.turn("a", "I have a cough", now).await;
        fx.turn("b", "I have a cough", now).await;
        fx.turn("b", "still coughing", now).await;

        let stats = fx.memory.stats().await;
        assert_eq!(stats.active_sessions, 2);
        assert_eq!(stats.interactions_total, 3);
        assert_eq!(stats.sessions_by_state[&SessionState::GatheringInfo], 1);
        assert_eq!(stats.sessions_by_state[&SessionState::SymptomAnalysis], 1);
        assert_eq!(stats.pending_interactions, 0);
    }
}
