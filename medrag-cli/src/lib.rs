pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;

pub use context::{MedragCliContext, load_config};
pub use output::{
    CliColors, format_error, format_info, format_state, format_success, format_urgency,
    format_warning, output_error, print_json, render_entities, render_session, render_stats,
    render_symptoms, render_turn,
};
