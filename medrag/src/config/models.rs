//! Configuration model definitions.
//!
//! This module contains the configuration structures for all medrag components.

use crate::knowledge::KnowledgeBase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure for medrag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MedragConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Entity recognition configuration
    pub recognition: RecognitionConfig,

    /// Symptom scoring configuration
    pub scoring: ScoringConfig,

    /// Session memory configuration
    pub memory: MemoryConfig,

    /// Prompt assembly configuration
    pub context: ContextConfig,

    /// Rule tables (lexicon, symptom profiles, escalation clusters)
    pub knowledge: KnowledgeBase,
}

/// Entity recognition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Number of tokens before a match searched for a negation marker
    pub negation_window: usize,

    /// Characters of input considered; the rest is ignored, never rejected
    pub max_input_chars: usize,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            negation_window: 4,
            max_input_chars: 10_000,
        }
    }
}

/// Symptom confidence scoring settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base confidence for symptoms without a profile
    pub default_weight: f32,

    /// Added when the utterance carries a severity qualifier
    pub severity_bonus: f32,

    /// Added when a related symptom is mentioned alongside
    pub related_bonus: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_weight: 0.7,
            severity_bonus: 0.05,
            related_bonus: 0.05,
        }
    }
}

/// Session memory settings.
///
/// Durations are written in humantime form (`"30m"`, `"90s"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemoryConfig {
    /// Raw interactions kept per session (oldest trimmed first)
    pub max_history: usize,

    /// Idle time after which a session is evicted
    #[serde(with = "humantime_serde")]
    pub session_ttl: Duration,

    /// Sessions kept before the least recently active one is evicted
    pub max_sessions: usize,

    /// Period of the background expiry sweep
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_history: 10,
            session_ttl: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Prompt assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContextConfig {
    /// Maximum prompt length in characters (the current input is always kept)
    pub char_budget: usize,

    /// Interaction count after which the history reminder is added
    pub history_reminder_after: u32,

    /// Characters of the previous reply quoted in the prompt
    pub reply_excerpt_chars: usize,

    /// Follow-up questions suggested per prompt
    pub max_follow_up_questions: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            char_budget: 4000,
            history_reminder_after: 1,
            reply_excerpt_chars: 150,
            max_follow_up_questions: 3,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(LogFormat::Default),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}
