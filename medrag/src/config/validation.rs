//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;
use crate::knowledge::KnowledgeBase;
use crate::models::{EntityCategory, Severity};
use crate::recognition::phrase_tokens;

/// Smallest prompt budget that still leaves room for the fixed sections.
pub const MIN_CHAR_BUDGET: usize = 256;

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}

/// Validate the entire configuration.
pub fn validate_config(config: &MedragConfig) -> Result<(), ConfigError> {
    validate_recognition_config(&config.recognition)?;
    validate_scoring_config(&config.scoring)?;
    validate_memory_config(&config.memory)?;
    validate_context_config(&config.context)?;
    validate_knowledge(&config.knowledge)?;

    Ok(())
}

fn validate_recognition_config(config: &RecognitionConfig) -> Result<(), ConfigError> {
    if config.max_input_chars == 0 {
        return Err(invalid("recognition.max_input_chars must be greater than 0"));
    }
    Ok(())
}

fn check_unit_interval(name: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_scoring_config(config: &ScoringConfig) -> Result<(), ConfigError> {
    check_unit_interval("scoring.default_weight", config.default_weight)?;
    check_unit_interval("scoring.severity_bonus", config.severity_bonus)?;
    check_unit_interval("scoring.related_bonus", config.related_bonus)?;
    Ok(())
}

fn validate_memory_config(config: &MemoryConfig) -> Result<(), ConfigError> {
    if config.max_history == 0 {
        return Err(invalid("memory.max_history must be greater than 0"));
    }
    if config.max_sessions == 0 {
        return Err(invalid("memory.max_sessions must be greater than 0"));
    }
    if config.session_ttl.is_zero() {
        return Err(invalid("memory.session_ttl must be greater than 0"));
    }
    if config.sweep_interval.is_zero() {
        return Err(invalid("memory.sweep_interval must be greater than 0"));
    }
    Ok(())
}

fn validate_context_config(config: &ContextConfig) -> Result<(), ConfigError> {
    if config.char_budget < MIN_CHAR_BUDGET {
        return Err(invalid(format!(
            "context.char_budget must be at least {}, got {}",
            MIN_CHAR_BUDGET, config.char_budget
        )));
    }
    Ok(())
}

/// Validate the rule tables.
pub fn validate_knowledge(knowledge: &KnowledgeBase) -> Result<(), ConfigError> {
    for entry in &knowledge.lexicon {
        if entry.canonical.trim().is_empty() {
            return Err(invalid("knowledge.lexicon entries need a canonical name"));
        }
        if entry.aliases.is_empty() {
            return Err(invalid(format!(
                "lexicon entry '{}' has no aliases",
                entry.canonical
            )));
        }
        if let Some(alias) = entry.aliases.iter().find(|a| phrase_tokens(a).is_none()) {
            return Err(invalid(format!(
                "alias '{}' of '{}' must contain words and no punctuation",
                alias, entry.canonical
            )));
        }
        if entry.category == EntityCategory::Severity {
            let tier = entry.canonical.parse::<Severity>().ok();
            if !tier.is_some_and(|t| t.is_specified()) {
                return Err(invalid(format!(
                    "severity entry '{}' must be named mild, moderate or severe",
                    entry.canonical
                )));
            }
        }
    }

    for profile in &knowledge.symptoms {
        if !knowledge.has_symptom(&profile.name) {
            return Err(invalid(format!(
                "symptom profile '{}' has no lexicon entry",
                profile.name
            )));
        }
        check_unit_interval(&format!("weight of '{}'", profile.name), profile.weight)?;
    }

    for cluster in &knowledge.clusters {
        if cluster.required.is_empty() {
            return Err(invalid(format!(
                "escalation cluster '{}' has no required symptoms",
                cluster.name
            )));
        }
        if cluster.min_supporting > cluster.supporting.len() {
            return Err(invalid(format!(
                "escalation cluster '{}' needs {} supporting symptoms but lists {}",
                cluster.name,
                cluster.min_supporting,
                cluster.supporting.len()
            )));
        }
        if let Some(member) = cluster.members().find(|m| !knowledge.has_symptom(m)) {
            return Err(invalid(format!(
                "escalation cluster '{}' refers to unknown symptom '{}'",
                cluster.name, member
            )));
        }
    }

    Ok(())
}
