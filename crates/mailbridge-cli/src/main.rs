//! `mailbridge` -- CLI for the desktop mail-app bridge.
//!
//! Provides the following subcommands:
//!
//! - `mailbridge serve` -- speak the method-channel protocol over stdio.
//! - `mailbridge apps` -- list installed mail applications.
//! - `mailbridge open` -- open a mail app, optionally composing a message.

use clap::{Parser, Subcommand};

mod commands;

/// Desktop mail-app bridge CLI.
#[derive(Parser)]
#[command(name = "mailbridge", about = "Desktop mail-app bridge", version)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Serve the method-channel protocol over stdin/stdout.
    Serve(commands::serve::ServeArgs),

    /// List installed mail applications.
    Apps(commands::apps::AppsArgs),

    /// Open a mail application, optionally addressed.
    Open(commands::open::OpenArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    // Logs go to stderr; stdout carries the serve protocol frames.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Apps(args) => commands::apps::run(args).await,
        Commands::Open(args) => commands::open::run(args).await,
    }
}
