//! # medrag
//!
//! Conversational enrichment engine that sits between a chat client and a
//! language-model completion endpoint. Every patient utterance is run through
//! entity recognition, symptom scoring and per-session memory, and comes back
//! as a prompt that carries the whole conversation's clinical context.
//!
//! ## Quick Start
//!
//! ```rust
//! use medrag::prelude::*;
//!
//! # async fn example() -> Result<()> {
//! let pipeline = PipelineBuilder::new().build()?;
//!
//! let response = pipeline.enrich("patient-42", "I have chest pain").await?;
//! // send response.enriched_prompt to the completion service ...
//! pipeline.commit("patient-42", "I'm sorry to hear that. When did it start?").await?;
//!
//! let session = pipeline.get_session("patient-42").await?;
//! assert_eq!(session.total_interactions, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **recognition**: lexicon-driven entity recognizer with negation handling
//! - **symptoms**: confidence scoring and escalation clusters
//! - **memory**: per-session aggregation, the conversation state machine, expiry
//! - **context**: prompt assembly under a character budget
//! - **pipeline**: the entry point collaborators call
//!
//! All state is in memory; nothing is persisted.

pub mod config;
pub mod context;
pub mod knowledge;
pub mod logging;
pub mod memory;
pub mod models;
pub mod pipeline;
pub mod recognition;
pub mod symptoms;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::{init, init_with_defaults};

    pub use crate::config::{ConfigBuilder, ConfigLoader, LogLevel, MedragConfig};

    pub use crate::knowledge::KnowledgeBase;

    pub use crate::models::{DurationClass, EntityCategory, Severity, Urgency};

    pub use crate::recognition::{EntityRecognizer, EntitySet, LexiconRecognizer};

    pub use crate::symptoms::{SymptomRecord, UrgencyEvent};

    pub use crate::memory::{Interaction, SessionSnapshot, SessionState};

    pub use crate::context::{ContextMetadata, EnrichedContext};

    pub use crate::pipeline::{EnrichResponse, EnrichmentPipeline, PipelineBuilder, PipelineStats};

    pub use crate::{MedragError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for medrag operations
#[derive(Debug, thiserror::Error)]
pub enum MedragError {
    /// Caller supplied a malformed argument
    #[error("Validation error: {0}")]
    Validation(String),

    /// No session with this id
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Commit called without a preceding enrich
    #[error("No pending interaction for session {session_id}. Call enrich() before commit()")]
    NoPendingInteraction { session_id: String },

    /// The requested state change is not allowed
    #[error("Session {session_id} cannot move from {from} to {to}")]
    InvalidTransition {
        session_id: String,
        from: memory::SessionState,
        to: memory::SessionState,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for MedragError {
    fn from(err: crate::config::ConfigError) -> Self {
        MedragError::Configuration(err.to_string())
    }
}

/// Result type for medrag operations
pub type Result<T> = std::result::Result<T, MedragError>;

/// Initialize medrag with default configuration
///
/// Loads configuration from the default file locations and `MEDRAG_*`
/// environment variables, then calls [`init`].
pub fn init_with_defaults() -> Result<pipeline::EnrichmentPipeline> {
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .extract()?;
    init(config)
}

/// Initialize medrag with the provided configuration
///
/// Sets up logging as configured and returns an [`EnrichmentPipeline`]
/// that owns the session store. The log writer lives as long as the pipeline.
///
/// # Examples
///
/// ```rust
/// use medrag::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = ConfigBuilder::testing().with_max_history(5).build()?;
/// let pipeline = init(config)?;
/// assert_eq!(pipeline.config().memory.max_history, 5);
/// # Ok(())
/// # }
/// ```
///
/// [`EnrichmentPipeline`]: pipeline::EnrichmentPipeline
pub fn init(config: config::MedragConfig) -> Result<pipeline::EnrichmentPipeline> {
    let guard = logging::init(&config.logging)?;

    pipeline::PipelineBuilder::new()
        .config(config)
        .log_guard(guard)
        .build()
}
