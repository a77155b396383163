//! Analyze command handler

use crate::args::AnalyzeArgs;
use crate::context::MedragCliContext;
use crate::output::*;
use serde_json::json;

pub async fn handle_analyze_command(args: AnalyzeArgs, ctx: &MedragCliContext) -> medrag::Result<()> {
    let text = args.utterance();
    let (entities, symptoms) = ctx.pipeline.analyze(&text);

    if ctx.output.is_json() {
        print_json(&json!({
            "input": text,
            "entities": entities,
            "symptoms": symptoms,
        }));
        return Ok(());
    }

    println!("{}", render_entities(&entities));
    println!();
    println!("{}", render_symptoms(&symptoms));
    if entities.is_empty() {
        println!();
        println!(
            "{}",
            format_warning("Nothing was recognized; the utterance would be enriched as small talk")
        );
    }
    Ok(())
}
