use colored::*;
use medrag::MedragError;
use medrag::prelude::*;
use serde_json::json;

use crate::commands::OutputFormat;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn symptom() -> Color {
        Color::TrueColor {
            r: 168,
            g: 85,
            b: 247,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }
}

fn error_code(error: &MedragError) -> &'static str {
    match error {
        MedragError::Validation(_) => "VALIDATION_ERROR",
        MedragError::SessionNotFound { .. } => "SESSION_NOT_FOUND",
        MedragError::NoPendingInteraction { .. } => "NO_PENDING_INTERACTION",
        MedragError::InvalidTransition { .. } => "INVALID_TRANSITION",
        MedragError::Configuration(_) => "CONFIGURATION_ERROR",
        MedragError::Logging(_) => "LOGGING_ERROR",
        MedragError::Other(_) => "OTHER_ERROR",
    }
}

/// Report an error in the selected output format.
pub fn output_error(error: &MedragError, output: OutputFormat) {
    if output.is_json() {
        let mut error_response = json!({
            "error": true,
            "code": error_code(error),
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        match error {
            MedragError::SessionNotFound { session_id }
            | MedragError::NoPendingInteraction { session_id } => {
                error_response["details"] = json!({ "session_id": session_id });
            }
            MedragError::InvalidTransition {
                session_id,
                from,
                to,
            } => {
                error_response["details"] = json!({
                    "session_id": session_id,
                    "from": from,
                    "to": to
                });
            }
            _ => {}
        }
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

/// Pretty-print any serializable value as JSON.
pub fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

pub fn format_success(msg: &str) -> String {
    format!(
        "{} {}",
        "✓".color(CliColors::success()).bold(),
        msg.color(CliColors::success())
    )
}

pub fn format_error(msg: &str) -> String {
    format!(
        "{} {}",
        "✗".color(CliColors::error()).bold(),
        msg.color(CliColors::error())
    )
}

pub fn format_warning(msg: &str) -> String {
    format!(
        "{} {}",
        "⚠".color(CliColors::warning()).bold(),
        msg.color(CliColors::warning())
    )
}

pub fn format_info(msg: &str) -> String {
    format!(
        "{} {}",
        "ℹ".color(CliColors::info()).bold(),
        msg.color(CliColors::info())
    )
}

pub fn format_urgency(urgency: Urgency) -> ColoredString {
    match urgency {
        Urgency::Critical => "critical".color(CliColors::error()).bold(),
        Urgency::High => "high".color(CliColors::warning()).bold(),
        Urgency::Moderate => "moderate".color(CliColors::warning()),
        Urgency::Low => "low".color(CliColors::muted()),
    }
}

pub fn format_state(state: SessionState) -> ColoredString {
    match state {
        SessionState::Emergency => state.as_str().color(CliColors::error()).bold(),
        SessionState::SymptomAnalysis => state.as_str().color(CliColors::symptom()),
        SessionState::FollowUp => state.as_str().color(CliColors::success()),
        SessionState::Initial | SessionState::GatheringInfo => {
            state.as_str().color(CliColors::info())
        }
    }
}

fn list_line(label: &str, items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(format!(
            "  {} {}",
            format!("{}:", label).color(CliColors::muted()),
            items.join(", ")
        ))
    }
}

pub fn render_entities(entities: &EntitySet) -> String {
    let mut lines = vec![format!("{}", "Entities".bold())];
    lines.extend(list_line("Symptoms", &entities.symptoms));
    lines.extend(list_line("Body parts", &entities.body_parts));
    lines.extend(list_line("Conditions", &entities.conditions));
    lines.extend(list_line("Medications", &entities.medications));
    lines.extend(list_line("Timing", &entities.temporal_expressions));
    lines.extend(list_line("Urgency cues", &entities.urgency_indicators));
    lines.extend(list_line("Negated", &entities.negated));
    if entities.severity.is_specified() {
        lines.push(format!(
            "  {} {}",
            "Severity:".color(CliColors::muted()),
            entities.severity
        ));
    }
    if entities.duration != DurationClass::Unspecified {
        lines.push(format!(
            "  {} {}",
            "Duration:".color(CliColors::muted()),
            entities.duration
        ));
    }
    if lines.len() == 1 {
        lines.push(format!("  {}", "(nothing recognized)".color(CliColors::muted())));
    }
    lines.join("\n")
}

pub fn render_symptoms(symptoms: &[SymptomRecord]) -> String {
    if symptoms.is_empty() {
        return format!(
            "{}\n  {}",
            "Symptoms".bold(),
            "(none)".color(CliColors::muted())
        );
    }

    let mut lines = vec![format!("{}", "Symptoms".bold())];
    for record in symptoms {
        lines.push(format!(
            "  {} {} {}",
            record.name.color(CliColors::symptom()).bold(),
            format!("{:.2}", record.confidence).color(CliColors::primary()),
            format_urgency(record.urgency)
        ));
        if !record.possible_causes.is_empty() {
            lines.push(format!(
                "    {} {}",
                "possible causes:".color(CliColors::muted()),
                record.possible_causes.join(", ")
            ));
        }
    }
    lines.join("\n")
}

pub fn render_session(session: &SessionSnapshot) -> String {
    let mut lines = vec![
        format!("{} {}", "Session".bold(), session.id.color(CliColors::info())),
        format!("  State: {}", format_state(session.state)),
        format!("  Urgency: {}", format_urgency(session.urgency_level)),
        format!(
            "  Interactions: {} ({} retained)",
            session.total_interactions,
            session.interactions.len()
        ),
    ];

    if !session.accumulated_symptoms.is_empty() {
        lines.push("  Symptoms:".to_string());
        for record in session.ranked_symptoms() {
            lines.push(format!(
                "    - {} {} {} x{}",
                record.name.color(CliColors::symptom()),
                format!("{:.2}", record.confidence),
                format_urgency(record.urgency),
                record.occurrence_count
            ));
        }
    }
    let conditions: Vec<String> = session.accumulated_conditions.keys().cloned().collect();
    lines.extend(list_line("Conditions", &conditions));
    let medications: Vec<String> = session.accumulated_medications.keys().cloned().collect();
    lines.extend(list_line("Medications", &medications));
    for event in &session.escalations {
        lines.push(format!(
            "  {} {} ({})",
            "⚠".color(CliColors::warning()),
            event.description,
            format_urgency(event.urgency)
        ));
    }

    lines.join("\n")
}

pub fn render_stats(stats: &PipelineStats) -> String {
    let mut lines = vec![
        format!("{}", "Session table".bold()),
        format!("  Active sessions: {}", stats.active_sessions),
        format!("  Pending interactions: {}", stats.pending_interactions),
        format!("  Committed interactions: {}", stats.interactions_total),
        format!("  Evicted sessions: {}", stats.evicted_total),
    ];
    for (state, count) in &stats.sessions_by_state {
        lines.push(format!("    {}: {}", format_state(*state), count));
    }
    lines.join("\n")
}

/// One-line summary of an enriched turn.
pub fn render_turn(response: &EnrichResponse) -> String {
    let symptoms: Vec<&str> = response.symptoms.iter().map(|s| s.name.as_str()).collect();
    let mut line = format!(
        "[{}] {} | urgency {} | confidence {:.2}",
        response.metadata.interaction_count,
        format_state(response.metadata.state),
        format_urgency(response.metadata.urgency),
        response.confidence_score
    );
    if !symptoms.is_empty() {
        line.push_str(&format!(" | {}", symptoms.join(", ").color(CliColors::symptom())));
    }
    if response.degraded {
        line.push_str(&format!(" | {}", "nothing recognized".color(CliColors::muted())));
    }
    line
}
