//! Config command handler

use crate::args::ConfigArgs;
use crate::context::MedragCliContext;
use crate::output::*;
use medrag::config::MedragConfig;
use serde_json::Value;

/// The configuration as JSON, without the knowledge base unless asked for.
pub fn config_value(config: &MedragConfig, include_knowledge: bool) -> Value {
    let mut value = serde_json::to_value(config).unwrap_or(Value::Null);
    if !include_knowledge && let Value::Object(map) = &mut value {
        map.remove("knowledge");
    }
    value
}

pub async fn handle_config_command(args: ConfigArgs, ctx: &MedragCliContext) -> medrag::Result<()> {
    let config = ctx.pipeline.config();
    let value = config_value(config, args.knowledge);

    if ctx.output.is_json() {
        print_json(&value);
        return Ok(());
    }

    println!("{}", format_info(&format!("Recognizer: {}", ctx.pipeline.recognizer_name())));
    println!(
        "{}",
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    );
    Ok(())
}
