//! job-board binary
//!
//! Thin wrapper over the library: parse args, set up logging, run one command.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use job_board::cli::{Cli, Commands};
use job_board::commands;
use job_board::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::from_env();
    tracing::debug!(?config, in_memory = cli.in_memory, "Starting");

    let outcome = match cli.command {
        Commands::Token(args) => commands::token::execute(args, config).await,
        Commands::Jobs(args) => commands::jobs::execute(args, config, cli.in_memory).await,
        Commands::Catalog(args) => commands::catalog::execute(args, config, cli.in_memory).await,
    };

    if let Err(err) = outcome {
        tracing::error!(code = err.code(), "{}", err);
        eprintln!("error: {}", err.user_message());
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays machine readable.
/// `-v` forces debug, otherwise `RUST_LOG` applies with `info` as fallback.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
