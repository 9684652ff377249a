//! # PulseBot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Entry point for the PulseBot CLI, the data side of a health-aware chat bot.
//! It reads the user's daily activity, readiness and sleep records from the
//! provider, strips free text and lists from them, and hands the remaining
//! numbers to prompt templates.
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! pulsebot --help
//!
//! # Print today's sanitized sleep record with request logging
//! pulsebot -v fetch daily_sleep
//!
//! # Render the default prompt
//! pulsebot prompt render
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Display any error and exit with status 1
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (fetch, prompt, history, srv)
mod common; // Provider accessor, sanitizer, fs helpers
mod core; // Errors, config, history, templating

#[derive(Parser, Debug)]
#[command(
    name = "pulsebot",
    about = "🩺 PulseBot: health data for your chat prompts",
    long_about = "Fetch daily activity, readiness and sleep records, strip them down to\n\
                  numeric fields, and render them into prompt templates.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "f")]
    Fetch(commands::fetch::FetchArgs),
    #[command(alias = "p")]
    Prompt(commands::prompt::PromptArgs),
    #[command(alias = "h")]
    History(commands::history::HistoryArgs),
    Srv(commands::srv::SrvArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Fetch(args) => commands::fetch::handle_fetch(args).await,
        Commands::Prompt(args) => commands::prompt::handle_prompt(args).await,
        Commands::History(args) => commands::history::handle_history(args).await,
        Commands::Srv(args) => commands::srv::handle_srv(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
