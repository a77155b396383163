//! Command handlers for the medrag CLI

pub mod analyze;
pub mod chat;
pub mod config;
pub mod script;

pub use analyze::handle_analyze_command;
pub use chat::{ChatCommand, ChatOptions, handle_chat_command, placeholder_reply, run_chat};
pub use config::{config_value, handle_config_command};
pub use script::{ScriptReport, TurnSummary, handle_script_command, parse_script, run_script};
