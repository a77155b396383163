//! Interactive chat handler

use std::io::{BufRead, Write};

use crate::args::ChatArgs;
use crate::commands::OutputFormat;
use crate::context::MedragCliContext;
use crate::handlers::script::TurnSummary;
use crate::output::*;
use colored::Colorize;
use medrag::prelude::*;
use medrag::MedragError;

/// Slash commands understood by the chat loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Session,
    Stats,
    Reset,
    FollowUp,
    Quit,
    Help,
    Unknown(String),
}

impl ChatCommand {
    /// Parse a slash command. Returns `None` for an ordinary utterance.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let name = line.strip_prefix('/')?;
        let name = name.split_whitespace().next().unwrap_or("");
        Some(match name.to_lowercase().as_str() {
            "session" | "s" => ChatCommand::Session,
            "stats" => ChatCommand::Stats,
            "reset" => ChatCommand::Reset,
            "follow-up" | "followup" | "f" => ChatCommand::FollowUp,
            "quit" | "exit" | "q" => ChatCommand::Quit,
            "help" | "h" | "?" => ChatCommand::Help,
            other => ChatCommand::Unknown(other.to_string()),
        })
    }
}

/// Options for [`run_chat`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatOptions {
    pub show_prompt: bool,
    pub manual_replies: bool,
    pub output: OutputFormat,
}

/// Stand-in assistant reply used when no completion service is attached.
pub fn placeholder_reply(response: &EnrichResponse) -> String {
    match response.metadata.follow_up_questions.first() {
        Some(question) => format!("I understand. {}", question),
        None => "I understand. Can you tell me more about how you are feeling?".to_string(),
    }
}

const HELP: &str = "/session    show the accumulated session
/stats      show session table counters
/reset      clear the session
/follow-up  switch the session to follow-up mode
/help       list commands
/quit       leave";

fn io_error(e: std::io::Error) -> MedragError {
    MedragError::Other(format!("I/O error: {}", e))
}

fn read_line<R: BufRead>(input: &mut R) -> medrag::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).map_err(io_error)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn to_json_line<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

/// Drive one session from `input` until end of input or `/quit`.
///
/// Returns the number of committed turns.
pub async fn run_chat<R: BufRead, W: Write>(
    pipeline: &EnrichmentPipeline,
    session_id: &str,
    options: ChatOptions,
    input: &mut R,
    out: &mut W,
) -> medrag::Result<u32> {
    let json = options.output.is_json();
    let mut committed = 0;

    loop {
        if !json {
            write!(out, "{} ", "you>".color(CliColors::info()).bold()).map_err(io_error)?;
            out.flush().map_err(io_error)?;
        }
        let Some(line) = read_line(input)? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        if let Some(command) = ChatCommand::parse(&line) {
            match command {
                ChatCommand::Quit => break,
                ChatCommand::Help => writeln!(out, "{}", HELP).map_err(io_error)?,
                ChatCommand::Session => match pipeline.get_session(session_id).await {
                    Ok(session) if json => {
                        writeln!(out, "{}", to_json_line(&session)).map_err(io_error)?
                    }
                    Ok(session) => writeln!(out, "{}", render_session(&session)).map_err(io_error)?,
                    Err(MedragError::SessionNotFound { .. }) => {
                        writeln!(out, "{}", format_info("No turns committed yet")).map_err(io_error)?
                    }
                    Err(e) => return Err(e),
                },
                ChatCommand::Stats => {
                    let stats = pipeline.stats().await;
                    if json {
                        writeln!(out, "{}", to_json_line(&stats)).map_err(io_error)?;
                    } else {
                        writeln!(out, "{}", render_stats(&stats)).map_err(io_error)?;
                    }
                }
                ChatCommand::Reset => match pipeline.reset_session(session_id).await {
                    Ok(()) => writeln!(out, "{}", format_success("Session reset")).map_err(io_error)?,
                    Err(MedragError::SessionNotFound { .. }) => {
                        writeln!(out, "{}", format_info("No turns committed yet")).map_err(io_error)?
                    }
                    Err(e) => return Err(e),
                },
                ChatCommand::FollowUp => match pipeline.mark_follow_up(session_id).await {
                    Ok(()) => writeln!(out, "{}", format_success("Session moved to follow-up"))
                        .map_err(io_error)?,
                    Err(e @ (MedragError::InvalidTransition { .. }
                    | MedragError::SessionNotFound { .. })) => {
                        writeln!(out, "{}", format_warning(&e.to_string())).map_err(io_error)?
                    }
                    Err(e) => return Err(e),
                },
                ChatCommand::Unknown(name) => writeln!(
                    out,
                    "{}",
                    format_warning(&format!("Unknown command /{} (try /help)", name))
                )
                .map_err(io_error)?,
            }
            continue;
        }

        let response = pipeline.enrich(session_id, &line).await?;
        if json {
            writeln!(out, "{}", to_json_line(&TurnSummary::from_response(&line, &response)))
                .map_err(io_error)?;
        } else {
            writeln!(out, "{}", render_turn(&response)).map_err(io_error)?;
        }
        if options.show_prompt && !json {
            writeln!(out, "{}", response.enriched_prompt.color(CliColors::muted()))
                .map_err(io_error)?;
        }

        let reply = if options.manual_replies {
            if !json {
                write!(out, "{} ", "assistant>".color(CliColors::symptom()).bold())
                    .map_err(io_error)?;
                out.flush().map_err(io_error)?;
            }
            match read_line(input)? {
                Some(reply) if !reply.trim().is_empty() => reply,
                Some(_) => placeholder_reply(&response),
                // Input ended mid-turn; the staged turn is left uncommitted.
                None => break,
            }
        } else {
            let reply = placeholder_reply(&response);
            if !json {
                writeln!(out, "{} {}", "assistant>".color(CliColors::symptom()).bold(), reply)
                    .map_err(io_error)?;
            }
            reply
        };

        pipeline.commit(session_id, &reply).await?;
        committed += 1;
    }

    Ok(committed)
}

pub async fn handle_chat_command(args: ChatArgs, ctx: &MedragCliContext) -> medrag::Result<()> {
    let session_id = args
        .session
        .unwrap_or_else(EnrichmentPipeline::generate_session_id);
    let options = ChatOptions {
        show_prompt: args.show_prompt,
        manual_replies: args.manual_replies,
        output: ctx.output,
    };

    if !options.output.is_json() {
        println!(
            "{}",
            format_info(&format!("Session {} (type /help for commands)", session_id))
        );
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();
    let committed = run_chat(&ctx.pipeline, &session_id, options, &mut input, &mut stdout).await?;

    tracing::debug!(session_id = %session_id, committed, "Chat ended");
    Ok(())
}
