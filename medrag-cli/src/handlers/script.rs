//! Script command handler
//!
//! Replays a file of patient utterances through a single session, committing
//! a placeholder reply after every turn, and reports how the session evolved.

use crate::args::ScriptArgs;
use crate::context::MedragCliContext;
use crate::handlers::chat::placeholder_reply;
use crate::output::*;
use colored::Colorize;
use medrag::prelude::*;
use medrag::MedragError;
use serde::Serialize;

/// Per-turn summary of a replayed or interactive exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TurnSummary {
    pub turn: u32,
    pub input: String,
    pub state: SessionState,
    pub urgency: Urgency,
    pub symptoms: Vec<String>,
    pub escalations: Vec<String>,
    pub confidence_score: f32,
    pub prompt_chars: usize,
    pub degraded: bool,
}

impl TurnSummary {
    pub fn from_response(input: &str, response: &EnrichResponse) -> Self {
        Self {
            turn: response.metadata.interaction_count,
            input: input.to_string(),
            state: response.metadata.state,
            urgency: response.metadata.urgency,
            symptoms: response.symptoms.iter().map(|s| s.name.clone()).collect(),
            escalations: response.escalations.iter().map(|e| e.name.clone()).collect(),
            confidence_score: response.confidence_score,
            prompt_chars: response.metadata.prompt_chars,
            degraded: response.degraded,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptReport {
    pub session_id: String,
    pub turns: Vec<TurnSummary>,
    pub final_session: SessionSnapshot,
}

/// Utterances in a script file. Blank lines and `#` comments are skipped.
pub fn parse_script(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Enrich and commit every utterance in order.
///
/// `on_turn` sees each response before it is committed.
pub async fn run_script<F>(
    pipeline: &EnrichmentPipeline,
    session_id: &str,
    utterances: &[String],
    mut on_turn: F,
) -> medrag::Result<ScriptReport>
where
    F: FnMut(&EnrichResponse),
{
    let mut turns = Vec::with_capacity(utterances.len());
    for utterance in utterances {
        let response = pipeline.enrich(session_id, utterance).await?;
        on_turn(&response);
        turns.push(TurnSummary::from_response(utterance, &response));
        pipeline
            .commit(session_id, &placeholder_reply(&response))
            .await?;
    }

    let final_session = pipeline.get_session(session_id).await?;
    Ok(ScriptReport {
        session_id: session_id.to_string(),
        turns,
        final_session,
    })
}

pub async fn handle_script_command(args: ScriptArgs, ctx: &MedragCliContext) -> medrag::Result<()> {
    let contents = std::fs::read_to_string(&args.file).map_err(|e| {
        MedragError::Other(format!("Failed to read {}: {}", args.file.display(), e))
    })?;
    let utterances = parse_script(&contents);
    if utterances.is_empty() {
        return Err(MedragError::Validation(format!(
            "{} contains no utterances",
            args.file.display()
        )));
    }

    let session_id = args
        .session
        .unwrap_or_else(EnrichmentPipeline::generate_session_id);
    let json = ctx.output.is_json();
    let show_prompts = args.show_prompts;

    let report = run_script(&ctx.pipeline, &session_id, &utterances, |response| {
        if json {
            return;
        }
        println!("{}", render_turn(response));
        if show_prompts {
            println!("{}", response.enriched_prompt.color(CliColors::muted()));
            println!();
        }
    })
    .await?;

    if json {
        print_json(&report);
        return Ok(());
    }

    println!();
    println!("{}", render_session(&report.final_session));
    println!();
    println!(
        "{}",
        format_success(&format!(
            "Replayed {} utterances through session {}",
            report.turns.len(),
            report.session_id
        ))
    );
    Ok(())
}
