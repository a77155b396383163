//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::knowledge::KnowledgeBase;
use std::path::Path;
use std::time::Duration;

/// Builder for creating MedragConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: MedragConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: MedragConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: MedragConfig) -> Self {
        Self { config }
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Log to a file in addition to (or instead of) stdout
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable logging to stdout
    pub fn with_stdout_logging(mut self, enabled: bool) -> Self {
        self.config.logging.stdout = enabled;
        self
    }

    /// Set the negation window in tokens
    pub fn with_negation_window(mut self, tokens: usize) -> Self {
        self.config.recognition.negation_window = tokens;
        self
    }

    /// Set the number of input characters considered by recognition
    pub fn with_max_input_chars(mut self, chars: usize) -> Self {
        self.config.recognition.max_input_chars = chars;
        self
    }

    /// Replace the scoring weights
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.config.scoring = scoring;
        self
    }

    /// Set the per-session interaction history cap
    pub fn with_max_history(mut self, max_history: usize) -> Self {
        self.config.memory.max_history = max_history;
        self
    }

    /// Set the idle time after which sessions are evicted
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.config.memory.session_ttl = ttl;
        self
    }

    /// Set the maximum number of live sessions
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.config.memory.max_sessions = max_sessions;
        self
    }

    /// Set the background sweep period
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.config.memory.sweep_interval = interval;
        self
    }

    /// Set the prompt character budget
    pub fn with_char_budget(mut self, chars: usize) -> Self {
        self.config.context.char_budget = chars;
        self
    }

    /// Set the interaction count after which the history reminder appears
    pub fn with_history_reminder_after(mut self, interactions: u32) -> Self {
        self.config.context.history_reminder_after = interactions;
        self
    }

    /// Set the number of follow-up questions suggested per prompt
    pub fn with_max_follow_up_questions(mut self, count: usize) -> Self {
        self.config.context.max_follow_up_questions = count;
        self
    }

    /// Replace the rule tables
    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.config.knowledge = knowledge;
        self
    }

    /// Create a development configuration
    ///
    /// - Debug logging in pretty format
    /// - Short session lifetime so expiry is easy to observe
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
            .with_session_ttl(Duration::from_secs(10 * 60))
            .with_sweep_interval(Duration::from_secs(30))
    }

    /// Create a testing configuration
    ///
    /// - Warnings only, compact format
    /// - Small session table
    pub fn testing() -> Self {
        Self::new()
            .with_log_level(LogLevel::Warn)
            .with_log_format(LogFormat::Compact)
            .with_max_sessions(128)
            .with_session_ttl(Duration::from_secs(60))
            .with_sweep_interval(Duration::from_secs(5))
    }

    /// Create a production configuration
    ///
    /// - Info logging as JSON
    /// - Default session limits
    pub fn production() -> Self {
        Self::new()
            .with_log_level(LogLevel::Info)
            .with_log_format(LogFormat::Json)
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<MedragConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
