//! The enrichment pipeline.
//!
//! [`EnrichmentPipeline`] runs recognition, symptom scoring, session memory
//! and prompt assembly in a fixed order. It is the only entry point a
//! collaborator (HTTP layer, CLI harness) needs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{MedragConfig, validation::validate_config};
use crate::context::{ContextBuilder, ContextMetadata};
use crate::logging::LogGuard;
use crate::memory::{ConversationMemory, MemoryStats, SessionSnapshot, validate_session_id};
use crate::recognition::{EntityRecognizer, EntitySet, LexiconRecognizer};
use crate::symptoms::{SymptomExtractor, SymptomRecord, UrgencyEvent};
use crate::Result;

/// Session table counters reported by [`EnrichmentPipeline::stats`].
pub type PipelineStats = MemoryStats;

/// Result of enriching one utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichResponse {
    /// Prompt to send to the completion service
    pub enriched_prompt: String,

    /// Entities recognized in the utterance
    pub entities: EntitySet,

    /// Symptoms scored from the utterance, ranked
    pub symptoms: Vec<SymptomRecord>,

    /// Escalations matched in the session, including this turn
    pub escalations: Vec<UrgencyEvent>,

    /// The session as it will look once this turn is committed
    pub session_snapshot: SessionSnapshot,

    /// What went into the prompt
    pub metadata: ContextMetadata,

    /// Overall extraction quality for the turn, in [0, 1]
    pub confidence_score: f32,

    /// Nothing was recognized; the prompt rests on the raw input
    pub degraded: bool,
}

/// Orchestrates recognition, scoring, memory and prompt assembly.
#[derive(Debug)]
pub struct EnrichmentPipeline {
    recognizer: Box<dyn EntityRecognizer>,
    extractor: Arc<SymptomExtractor>,
    memory: Arc<ConversationMemory>,
    context_builder: ContextBuilder,
    config: MedragConfig,
    _log_guard: Option<LogGuard>,
}

impl EnrichmentPipeline {
    /// Create a new builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Configuration the pipeline was built with.
    pub fn config(&self) -> &MedragConfig {
        &self.config
    }

    /// Name of the plugged-in recognizer.
    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    /// The session store.
    pub fn memory(&self) -> &Arc<ConversationMemory> {
        &self.memory
    }

    /// Generate a fresh session id.
    pub fn generate_session_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Recognize and score an utterance without touching any session.
    pub fn analyze(&self, text: &str) -> (EntitySet, Vec<SymptomRecord>) {
        self.analyze_at(text, Utc::now())
    }

    fn analyze_at(&self, text: &str, now: DateTime<Utc>) -> (EntitySet, Vec<SymptomRecord>) {
        let entities = self.recognizer.recognize(text);
        let symptoms = self.extractor.extract_at(&entities, text, now);
        (entities, symptoms)
    }

    /// Enrich an utterance for `session_id`.
    ///
    /// The turn is staged, not committed: [`get_session`](Self::get_session)
    /// is unchanged until [`commit`](Self::commit) is called with the reply.
    pub async fn enrich(&self, session_id: &str, text: &str) -> Result<EnrichResponse> {
        validate_session_id(session_id)?;
        let now = Utc::now();

        let (entities, symptoms) = self.analyze_at(text, now);
        let degraded = entities.is_empty();
        if degraded {
            warn!(
                session_id = %session_id,
                recognizer = self.recognizer.name(),
                "No entities recognized; prompt built from raw input"
            );
        }

        let snapshot = self
            .memory
            .update(session_id, text, entities.clone(), symptoms.clone(), now)
            .await?;
        let context = self.context_builder.build(&snapshot, text);
        let confidence_score = confidence_score(
            &entities,
            &symptoms,
            snapshot.total_interactions.saturating_sub(1),
        );

        debug!(
            session_id = %session_id,
            state = %snapshot.state,
            urgency = %snapshot.urgency_level,
            symptoms = symptoms.len(),
            prompt_chars = context.metadata.prompt_chars,
            confidence_score,
            "Enriched utterance"
        );

        Ok(EnrichResponse {
            enriched_prompt: context.prompt,
            entities,
            symptoms,
            escalations: snapshot.escalations.clone(),
            session_snapshot: snapshot,
            metadata: context.metadata,
            confidence_score,
            degraded,
        })
    }

    /// Commit the staged turn with the assistant's reply.
    pub async fn commit(&self, session_id: &str, ai_response: &str) -> Result<()> {
        self.memory.commit(session_id, ai_response, Utc::now()).await
    }

    /// Snapshot of a committed session.
    pub async fn get_session(&self, session_id: &str) -> Result<SessionSnapshot> {
        self.memory.get_session(session_id, Utc::now()).await
    }

    /// Clear a session back to its initial state.
    pub async fn reset_session(&self, session_id: &str) -> Result<()> {
        self.memory.reset_session(session_id, Utc::now()).await
    }

    /// Move a session into follow-up mode.
    pub async fn mark_follow_up(&self, session_id: &str) -> Result<()> {
        self.memory.mark_follow_up(session_id, Utc::now()).await
    }

    /// Session table counters.
    pub async fn stats(&self) -> PipelineStats {
        self.memory.stats().await
    }

    /// Run one expiry sweep now.
    pub fn evict_expired(&self) -> usize {
        self.memory.evict_expired(Utc::now())
    }

    /// Start the background expiry sweep; it stops when `shutdown` is notified.
    pub fn spawn_sweeper(&self, shutdown: Arc<Notify>) -> JoinHandle<()> {
        self.memory.spawn_sweeper(shutdown)
    }
}

/// Weighted quality score of a turn.
///
/// `0.3` for entity coverage, `0.5` for mean symptom confidence and `0.2`
/// for how much history precedes the turn, rounded to two decimals.
pub fn confidence_score(entities: &EntitySet, symptoms: &[SymptomRecord], prior_interactions: u32) -> f32 {
    let entity_score = (entities.entity_count() as f32 * 0.1).min(1.0);
    let symptom_score = if symptoms.is_empty() {
        0.0
    } else {
        symptoms.iter().map(|record| record.confidence).sum::<f32>() / symptoms.len() as f32
    };
    let context_score = (prior_interactions as f32 * 0.1).min(1.0);

    let score = (entity_score * 0.3 + symptom_score * 0.5 + context_score * 0.2).min(1.0);
    (score * 100.0).round() / 100.0
}

/// Builder for [`EnrichmentPipeline`].
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    config: Option<MedragConfig>,
    recognizer: Option<Box<dyn EntityRecognizer>>,
    log_guard: Option<LogGuard>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration (defaults are used otherwise)
    pub fn config(mut self, config: MedragConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the lexicon recognizer
    pub fn recognizer(mut self, recognizer: Box<dyn EntityRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Keep a logging guard alive for the lifetime of the pipeline
    pub fn log_guard(mut self, guard: LogGuard) -> Self {
        self.log_guard = Some(guard);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<EnrichmentPipeline> {
        let config = self.config.unwrap_or_default();
        validate_config(&config)?;

        let recognizer = self.recognizer.unwrap_or_else(|| {
            Box::new(LexiconRecognizer::new(&config.knowledge, &config.recognition))
        });
        let extractor = Arc::new(SymptomExtractor::new(&config.knowledge, &config.scoring));
        let memory = Arc::new(ConversationMemory::new(
            config.memory.clone(),
            Arc::clone(&extractor),
        ));
        let context_builder = ContextBuilder::new(config.context.clone(), &config.knowledge);

        debug!(
            recognizer = recognizer.name(),
            lexicon_entries = config.knowledge.lexicon.len(),
            clusters = config.knowledge.clusters.len(),
            "Built enrichment pipeline"
        );

        Ok(EnrichmentPipeline {
            recognizer,
            extractor,
            memory,
            context_builder,
            config,
            _log_guard: self.log_guard,
        })
    }
}
