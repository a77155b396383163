use clap::{CommandFactory, Parser};
use is_terminal::IsTerminal;
use medrag_cli::commands::{Cli, Commands};
use medrag_cli::context::MedragCliContext;
use medrag_cli::handlers::*;
use medrag_cli::output::output_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.output.is_json() || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Version => {
            println!("medrag-cli v{}", medrag::VERSION);
            return;
        }
        Commands::Completions(ref args) => {
            let mut stdout = std::io::stdout();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut Cli::command(),
                "medrag-cli",
                &mut stdout,
            );
            return;
        }
        _ => {}
    }

    let output = cli.output;
    let ctx = match MedragCliContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            output_error(&e, output);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Analyze(args) => handle_analyze_command(args, &ctx).await,
        Commands::Chat(args) => handle_chat_command(args, &ctx).await,
        Commands::Script(args) => handle_script_command(args, &ctx).await,
        Commands::Config(args) => handle_config_command(args, &ctx).await,
        Commands::Version | Commands::Completions(_) => Ok(()),
    };

    // Flush the log writer before a possible exit.
    drop(ctx);

    if let Err(e) = result {
        output_error(&e, output);
        std::process::exit(1);
    }
}
