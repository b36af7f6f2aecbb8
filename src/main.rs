//! Paramlayer CLI entry point.

use clap::Parser;

use paramlayer::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    if !matches!(cli.command, Commands::Serve(_)) {
        paramlayer::cli::init_cli_tracing();
    }

    let result = match cli.command {
        Commands::Init(args) => paramlayer::cli::commands::init::execute(&args, cli.json),
        Commands::Serve(args) => paramlayer::cli::commands::serve::execute(args, config).await,
        Commands::Show(args) => {
            paramlayer::cli::commands::show::execute(args, config, cli.json).await
        }
    };

    if let Err(err) = result {
        paramlayer::cli::handle_error(err, cli.json);
    }
}
