//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Utterance to analyze (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

impl AnalyzeArgs {
    pub fn utterance(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Session ID to use (a new one is generated otherwise)
    #[arg(long, short)]
    pub session: Option<String>,

    /// Print the enriched prompt for every turn
    #[arg(long)]
    pub show_prompt: bool,

    /// Type the assistant replies yourself instead of using a placeholder
    #[arg(long)]
    pub manual_replies: bool,
}

#[derive(Args, Debug)]
pub struct ScriptArgs {
    /// File with one patient utterance per line ('#' starts a comment)
    pub file: PathBuf,

    /// Session ID to use (a new one is generated otherwise)
    #[arg(long, short)]
    pub session: Option<String>,

    /// Print the enriched prompt for every turn
    #[arg(long)]
    pub show_prompts: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Include the knowledge base (lexicon, profiles, clusters) in the output
    #[arg(long)]
    pub knowledge: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
    Elvish,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
