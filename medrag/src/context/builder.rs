use std::collections::HashMap;

use tracing::debug;

use super::{ContextMetadata, EnrichedContext};
use crate::config::ContextConfig;
use crate::knowledge::KnowledgeBase;
use crate::memory::{Interaction, SessionSnapshot, SessionState};
use crate::models::Urgency;
use crate::symptoms::SymptomRecord;

const ASSISTANT_ROLE: &str =
    "You are an empathetic AI medical assistant in an ongoing conversation with a patient.";

const HISTORY_REMINDER: &str = "Write a reply that builds on everything the patient has told you \
     in this conversation, not only on the latest message.";

/// Assembles prompts from session snapshots.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    config: ContextConfig,
    follow_up_questions: HashMap<String, Vec<String>>,
}

/// Sections that may be shrunk to fit the budget.
struct Layout<'a> {
    symptoms: Vec<&'a SymptomRecord>,
    guidance: bool,
    last_exchange: bool,
}

struct Guidance<'a> {
    questions: &'a [String],
    gaps: &'a [String],
    next_steps: &'a [String],
}

impl ContextBuilder {
    /// Create a builder; follow-up questions come from the symptom profiles.
    pub fn new(config: ContextConfig, knowledge: &KnowledgeBase) -> Self {
        let follow_up_questions = knowledge
            .symptoms
            .iter()
            .filter(|profile| !profile.follow_up_questions.is_empty())
            .map(|profile| (profile.name.clone(), profile.follow_up_questions.clone()))
            .collect();

        Self {
            config,
            follow_up_questions,
        }
    }

    /// Prompt settings in use.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Build the prompt for `raw_text` against the session snapshot.
    ///
    /// When the prompt is longer than `char_budget` characters, summary
    /// symptoms are dropped lowest confidence first, then the response
    /// guidance, then the last exchange. The current input is always kept
    /// whole, so the result may still exceed the budget.
    pub fn build(&self, snapshot: &SessionSnapshot, raw_text: &str) -> EnrichedContext {
        let ranked = snapshot.ranked_symptoms();
        let follow_up_questions = self.suggest_questions(&ranked);
        let information_gaps = information_gaps(snapshot);
        let next_steps = next_steps(snapshot.state, snapshot.urgency_level);
        let guidance = Guidance {
            questions: &follow_up_questions,
            gaps: &information_gaps,
            next_steps: &next_steps,
        };

        let mut layout = Layout {
            symptoms: ranked,
            guidance: true,
            last_exchange: snapshot.last_answered_interaction().is_some(),
        };
        let mut dropped_symptoms = Vec::new();
        let mut truncated = false;
        let mut prompt = self.render(snapshot, raw_text, &layout, &guidance);

        while prompt.chars().count() > self.config.char_budget {
            if let Some(record) = layout.symptoms.pop() {
                dropped_symptoms.push(record.name.clone());
            } else if layout.guidance {
                layout.guidance = false;
            } else if layout.last_exchange {
                layout.last_exchange = false;
            } else {
                break;
            }
            truncated = true;
            prompt = self.render(snapshot, raw_text, &layout, &guidance);
        }

        let prompt_chars = prompt.chars().count();
        if truncated {
            debug!(
                session_id = %snapshot.id,
                prompt_chars,
                char_budget = self.config.char_budget,
                dropped = dropped_symptoms.len(),
                "Prompt shortened to fit budget"
            );
        }

        let metadata = ContextMetadata {
            state: snapshot.state,
            urgency: snapshot.urgency_level,
            interaction_count: snapshot.total_interactions,
            included_symptoms: layout
                .symptoms
                .iter()
                .map(|record| record.name.clone())
                .collect(),
            dropped_symptoms,
            truncated,
            prompt_chars,
            follow_up_questions,
            information_gaps,
            next_steps,
            escalations: snapshot
                .escalations
                .iter()
                .map(|event| event.name.clone())
                .collect(),
        };

        EnrichedContext { prompt, metadata }
    }

    fn render(
        &self,
        snapshot: &SessionSnapshot,
        raw_text: &str,
        layout: &Layout<'_>,
        guidance: &Guidance<'_>,
    ) -> String {
        let mut sections = Vec::with_capacity(7);
        sections.push(system_line(snapshot));

        if snapshot.has_findings() {
            sections.push(summary(snapshot, &layout.symptoms));
        }
        if let Some(directive) = directive(snapshot.urgency_level) {
            sections.push(directive.to_string());
        }
        if layout.last_exchange {
            if let Some(interaction) = snapshot.last_answered_interaction() {
                sections.push(self.last_exchange(interaction));
            }
        }

        sections.push(format!("CURRENT PATIENT INPUT:\n\"{}\"", raw_text));

        if layout.guidance {
            sections.push(render_guidance(snapshot.urgency_level, guidance));
        }
        if snapshot.total_interactions > self.config.history_reminder_after {
            sections.push(HISTORY_REMINDER.to_string());
        }

        sections.join("\n\n")
    }

    fn last_exchange(&self, interaction: &Interaction) -> String {
        let mut section = format!(
            "LAST EXCHANGE:\n- Patient said: \"{}\"",
            interaction.raw_text
        );
        if let Some(reply) = &interaction.ai_response {
            section.push_str(&format!(
                "\n- You replied: \"{}\"",
                excerpt(reply, self.config.reply_excerpt_chars)
            ));
        }
        section
    }

    fn suggest_questions(&self, ranked: &[&SymptomRecord]) -> Vec<String> {
        let mut questions: Vec<String> = Vec::new();
        for record in ranked {
            let Some(candidates) = self.follow_up_questions.get(&record.name) else {
                continue;
            };
            for question in candidates {
                if questions.len() >= self.config.max_follow_up_questions {
                    return questions;
                }
                if !questions.contains(question) {
                    questions.push(question.clone());
                }
            }
        }
        questions
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn system_line(snapshot: &SessionSnapshot) -> String {
    let interaction = format!(
        "This is interaction #{} in this conversation.",
        snapshot.total_interactions
    );

    if snapshot.urgency_level == Urgency::Critical {
        return format!(
            "{} URGENT SITUATION DETECTED: give immediate guidance and recommend emergency care. {}",
            ASSISTANT_ROLE, interaction
        );
    }

    let focus = match snapshot.state {
        SessionState::Initial => {
            "The patient is just starting to describe their concerns. Build rapport and collect the basics."
        }
        SessionState::GatheringInfo => {
            "You are collecting details about the symptoms. Ask focused questions until the picture is complete."
        }
        SessionState::SymptomAnalysis => {
            "You have enough symptom information to analyse. Relate the new details to what was said earlier."
        }
        SessionState::Emergency => {
            "This conversation has been flagged as a possible emergency. Keep steering the patient toward emergency care."
        }
        SessionState::FollowUp => {
            "This is a follow-up. Ask how the symptoms discussed earlier have developed."
        }
    };

    format!("{} {} {}", ASSISTANT_ROLE, focus, interaction)
}

fn summary(snapshot: &SessionSnapshot, symptoms: &[&SymptomRecord]) -> String {
    let mut lines = vec![
        "CONVERSATION SUMMARY:".to_string(),
        format!("- Interactions: {}", snapshot.total_interactions),
        format!("- Conversation state: {}", snapshot.state),
    ];

    if !symptoms.is_empty() {
        let listed: Vec<String> = symptoms
            .iter()
            .map(|record| {
                format!(
                    "{} ({} urgency, confidence {:.2})",
                    record.name, record.urgency, record.confidence
                )
            })
            .collect();
        lines.push(format!("- Symptoms discussed: {}", listed.join(", ")));
    }
    if !snapshot.accumulated_conditions.is_empty() {
        let names: Vec<&str> = snapshot
            .accumulated_conditions
            .keys()
            .map(String::as_str)
            .collect();
        lines.push(format!("- Conditions mentioned: {}", names.join(", ")));
    }
    if !snapshot.accumulated_medications.is_empty() {
        let names: Vec<&str> = snapshot
            .accumulated_medications
            .keys()
            .map(String::as_str)
            .collect();
        lines.push(format!("- Medications mentioned: {}", names.join(", ")));
    }
    if !snapshot.escalations.is_empty() {
        let listed: Vec<String> = snapshot
            .escalations
            .iter()
            .map(|event| format!("{} ({})", event.name, event.urgency))
            .collect();
        lines.push(format!("- Warning patterns: {}", listed.join(", ")));
    }
    lines.push(format!("- Overall urgency: {}", snapshot.urgency_level));

    lines.join("\n")
}

fn directive(urgency: Urgency) -> Option<&'static str> {
    match urgency {
        Urgency::Critical => Some(
            "URGENCY DIRECTIVE: The symptoms described may indicate a medical emergency. \
             Tell the patient to call emergency services or go to the nearest emergency \
             department now, before anything else.",
        ),
        Urgency::High => Some(
            "URGENCY DIRECTIVE: These symptoms should be seen by a clinician soon. \
             Recommend that the patient seeks medical care today.",
        ),
        Urgency::Moderate | Urgency::Low => None,
    }
}

fn render_guidance(urgency: Urgency, guidance: &Guidance<'_>) -> String {
    let mut lines = vec!["RESPONSE GUIDANCE:".to_string()];

    if urgency == Urgency::Critical {
        lines.push("- Deal with the urgent situation first".to_string());
        lines.push("- Recommend emergency care while giving immediate guidance".to_string());
    } else {
        lines.push("- Keep an empathetic, supportive tone".to_string());
        lines.push("- Refer back to what the patient has already told you".to_string());
    }
    if !guidance.gaps.is_empty() {
        lines.push(format!(
            "- Information still missing: {}",
            guidance.gaps.join(", ")
        ));
    }
    if !guidance.next_steps.is_empty() {
        lines.push(format!(
            "- Logical next steps: {}",
            guidance.next_steps.join(", ")
        ));
    }
    if !guidance.questions.is_empty() {
        lines.push("- Consider asking:".to_string());
        for question in guidance.questions {
            lines.push(format!("  - {}", question));
        }
    }

    lines.join("\n")
}

/// Facts not yet established for the reported symptoms.
///
/// Only the retained interactions are inspected.
fn information_gaps(snapshot: &SessionSnapshot) -> Vec<String> {
    if snapshot.accumulated_symptoms.is_empty() {
        return Vec::new();
    }

    let interactions = &snapshot.interactions;
    let mut gaps = Vec::new();
    if !interactions.iter().any(|i| i.entities.has_timing()) {
        gaps.push("symptom_duration".to_string());
    }
    if !interactions
        .iter()
        .any(|i| i.entities.severity.is_specified())
    {
        gaps.push("symptom_severity".to_string());
    }
    if !interactions
        .iter()
        .any(|i| !i.entities.body_parts.is_empty())
    {
        gaps.push("symptom_location".to_string());
    }
    gaps
}

fn next_steps(state: SessionState, urgency: Urgency) -> Vec<String> {
    let steps: &[&str] = if urgency == Urgency::Critical {
        &["emergency_guidance", "immediate_action_required"]
    } else {
        match state {
            SessionState::Initial => &["gather_chief_complaint", "build_rapport"],
            SessionState::GatheringInfo if urgency == Urgency::High => {
                &["recommend_prompt_care", "clarify_symptoms", "gather_timeline"]
            }
            SessionState::GatheringInfo => &["clarify_symptoms", "assess_severity", "gather_timeline"],
            SessionState::SymptomAnalysis if urgency == Urgency::High => {
                &["recommend_prompt_care", "provide_analysis"]
            }
            SessionState::SymptomAnalysis => {
                &["provide_analysis", "suggest_next_steps", "offer_reassurance"]
            }
            SessionState::Emergency => &["emergency_guidance", "immediate_action_required"],
            SessionState::FollowUp => &["check_progress", "monitor_symptoms"],
        }
    };
    steps.iter().map(|step| step.to_string()).collect()
}
