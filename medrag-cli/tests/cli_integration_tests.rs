//! Integration tests for the medrag CLI
//!
//! These tests verify CLI behavior without spawning the binary:
//! - Argument parsing for every command
//! - Script parsing and replay through one session
//! - The interactive chat loop driven from an in-memory reader
//! - Configuration loading and rendering

use std::io::{Cursor, Write};

use clap::Parser;
use medrag::config::{ConfigBuilder, LogLevel};
use medrag::prelude::*;
use medrag_cli::commands::{Cli, Commands, OutputFormat};
use medrag_cli::handlers::*;
use medrag_cli::load_config;

fn pipeline() -> EnrichmentPipeline {
    let config = ConfigBuilder::testing()
        .build()
        .expect("testing preset should be valid");
    PipelineBuilder::new()
        .config(config)
        .build()
        .expect("Failed to build pipeline")
}

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod parsing_tests {
    use super::*;

    #[test]
    fn test_analyze_joins_words() {
        let cli = Cli::try_parse_from(["medrag-cli", "analyze", "I", "have", "a", "fever"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => assert_eq!(args.utterance(), "I have a fever"),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn test_repl_alias_and_global_flags() {
        let cli = Cli::try_parse_from([
            "medrag-cli",
            "repl",
            "--session",
            "patient-7",
            "--show-prompt",
            "-o",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        match cli.command {
            Commands::Chat(args) => {
                assert_eq!(args.session.as_deref(), Some("patient-7"));
                assert!(args.show_prompt);
                assert!(!args.manual_replies);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["medrag-cli", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["medrag-cli", "--log-level", "loud", "version"]).is_err());
        assert!(Cli::try_parse_from(["medrag-cli", "completions", "tcsh"]).is_err());
    }

    #[test]
    fn test_chat_command_parsing() {
        assert_eq!(ChatCommand::parse("I have a cough"), None);
        assert_eq!(ChatCommand::parse("/session"), Some(ChatCommand::Session));
        assert_eq!(ChatCommand::parse("  /QUIT  "), Some(ChatCommand::Quit));
        assert_eq!(ChatCommand::parse("/follow-up now"), Some(ChatCommand::FollowUp));
        assert_eq!(ChatCommand::parse("/stats"), Some(ChatCommand::Stats));
        assert_eq!(
            ChatCommand::parse("/dance"),
            Some(ChatCommand::Unknown("dance".to_string()))
        );
    }
}

#[cfg(test)]
mod script_tests {
    use super::*;

    #[test]
    fn test_parse_script_skips_comments_and_blanks() {
        let utterances = parse_script(
            "# chest pain walk-through\n\nI have chest pain\n   \n  and I feel nauseous  \n# end\n",
        );
        assert_eq!(utterances, strings(&["I have chest pain", "and I feel nauseous"]));
    }

    #[tokio::test]
    async fn test_script_reaches_emergency() {
        let pipeline = pipeline();
        let utterances = strings(&[
            "I have chest pain",
            "It started an hour ago and I feel nauseous",
        ]);

        let mut seen = 0;
        let report = run_script(&pipeline, "script-1", &utterances, |_| seen += 1)
            .await
            .unwrap();

        assert_eq!(seen, 2);
        assert_eq!(report.session_id, "script-1");
        assert_eq!(report.turns.len(), 2);
        assert_eq!(report.turns[0].turn, 1);
        assert_eq!(report.turns[0].state, SessionState::GatheringInfo);
        assert_eq!(report.turns[1].state, SessionState::Emergency);
        assert!(
            report.turns[1]
                .escalations
                .iter()
                .any(|name| name == "acute_coronary_pattern")
        );
        assert_eq!(report.final_session.total_interactions, 2);
        assert!(
            report
                .final_session
                .interactions
                .iter()
                .all(|interaction| interaction.ai_response.is_some())
        );
    }

    #[tokio::test]
    async fn test_script_rejects_bad_session_id() {
        let pipeline = pipeline();
        let result = run_script(&pipeline, "", &strings(&["hello"]), |_| {}).await;
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod chat_tests {
    use super::*;

    fn text_options() -> ChatOptions {
        colored::control::set_override(false);
        ChatOptions::default()
    }

    #[tokio::test]
    async fn test_chat_commits_each_utterance() {
        let pipeline = pipeline();
        let mut input = Cursor::new("I have a headache\n\nand a fever\n/session\n/quit\nnever read\n");
        let mut out = Vec::new();

        let committed = run_chat(&pipeline, "chat-1", text_options(), &mut input, &mut out)
            .await
            .unwrap();
        assert_eq!(committed, 2);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("headache"));
        assert!(printed.contains("State:"));

        let session = pipeline.get_session("chat-1").await.unwrap();
        assert_eq!(session.total_interactions, 2);
        assert!(session.accumulated_symptoms.contains_key("fever"));
    }

    #[tokio::test]
    async fn test_manual_replies_are_committed() {
        let pipeline = pipeline();
        let mut input = Cursor::new("I have a cough\nHow long have you had it?\n");
        let options = ChatOptions {
            manual_replies: true,
            ..text_options()
        };
        let mut out = Vec::new();

        run_chat(&pipeline, "chat-2", options, &mut input, &mut out)
            .await
            .unwrap();

        let session = pipeline.get_session("chat-2").await.unwrap();
        let last = session.interactions.back().unwrap();
        assert_eq!(last.ai_response.as_deref(), Some("How long have you had it?"));
    }

    #[tokio::test]
    async fn test_input_ending_mid_turn_leaves_nothing_committed() {
        let pipeline = pipeline();
        let mut input = Cursor::new("I have a cough\n");
        let options = ChatOptions {
            manual_replies: true,
            ..text_options()
        };
        let mut out = Vec::new();

        let committed = run_chat(&pipeline, "chat-3", options, &mut input, &mut out)
            .await
            .unwrap();
        assert_eq!(committed, 0);
        assert!(pipeline.get_session("chat-3").await.is_err());
    }

    #[tokio::test]
    async fn test_commands_before_first_turn_do_not_fail() {
        let pipeline = pipeline();
        let mut input = Cursor::new("/session\n/reset\n/follow-up\n/help\n/dance\n");
        let mut out = Vec::new();

        let committed = run_chat(&pipeline, "chat-4", text_options(), &mut input, &mut out)
            .await
            .unwrap();
        assert_eq!(committed, 0);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("No turns committed yet"));
        assert!(printed.contains("/quit"));
        assert!(printed.contains("Unknown command /dance"));
    }

    #[tokio::test]
    async fn test_json_output_is_one_turn_per_line() {
        let pipeline = pipeline();
        let mut input = Cursor::new("I have chest pain\nI feel dizzy\n");
        let options = ChatOptions {
            output: OutputFormat::Json,
            ..ChatOptions::default()
        };
        let mut out = Vec::new();

        run_chat(&pipeline, "chat-5", options, &mut input, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        let turns: Vec<serde_json::Value> = printed
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0]["turn"], 1);
        assert_eq!(turns[1]["turn"], 2);
        assert_eq!(turns[0]["urgency"], "critical");
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_value_hides_knowledge_by_default() {
        let config = ConfigBuilder::testing().build().unwrap();

        let value = config_value(&config, false);
        assert!(value.get("knowledge").is_none());
        assert_eq!(value["memory"]["max_sessions"], 128);

        let value = config_value(&config, true);
        assert!(value.get("knowledge").is_some());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[logging]\nlevel = \"debug\"\n\n[memory]\nmax_history = 4\nsession_ttl = \"10m\""
        )
        .unwrap();

        let config = load_config(Some(file.path()), None).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.memory.max_history, 4);
        assert_eq!(config.memory.session_ttl, std::time::Duration::from_secs(600));

        let config = load_config(Some(file.path()), Some(LogLevel::Warn)).unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some(std::path::Path::new("/nonexistent/medrag.toml")), None);
        assert!(matches!(result, Err(medrag::MedragError::Configuration(_))));
    }
}
