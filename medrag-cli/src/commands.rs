//! Command definitions
//!
//! This module contains the top-level parser and the command enum.

use crate::args::*;
use clap::{Parser, Subcommand, ValueEnum};
use medrag::config::LogLevel;
use std::path::PathBuf;

/// Output format for command results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Text,
    /// JSON output for tool integration
    Json,
}

impl OutputFormat {
    pub fn is_json(&self) -> bool {
        *self == OutputFormat::Json
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse()
}

#[derive(Parser, Debug)]
#[command(name = "medrag-cli")]
#[command(about = "Test harness for the medrag enrichment engine", long_about = None)]
#[command(version = medrag::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Recognize entities and score symptoms in one utterance
    #[command(
        long_about = r#"
Run entity recognition and symptom scoring on a single utterance. No session
is created and nothing is remembered.

EXAMPLES:
  medrag-cli analyze "I have had a severe headache since yesterday"
  medrag-cli analyze no fever but a dry cough --output json
"#
    )]
    Analyze(AnalyzeArgs),

    /// Interactive conversation against the enrichment engine
    #[command(
        alias = "repl",
        long_about = r#"
Start an interactive session. Every line you type is enriched and committed,
with either a typed assistant reply (--manual-replies) or a placeholder one.

SLASH COMMANDS:
  /session     Show the accumulated session
  /stats       Show session table counters
  /reset       Clear the session
  /follow-up   Switch the session to follow-up mode
  /help        List commands
  /quit        Leave

EXAMPLES:
  medrag-cli chat
  medrag-cli chat --session patient-42 --show-prompt
"#
    )]
    Chat(ChatArgs),

    /// Replay a file of utterances through one session
    Script(ScriptArgs),

    /// Print the effective configuration
    Config(ConfigArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
