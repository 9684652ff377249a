//! # PulseBot History Command Group
//!
//! File: cli/src/commands/history/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Manages the local conversation transcript that feeds the `history` prompt
//! variable.
//!
//! ## Examples
//!
//! ```bash
//! pulsebot history add "How did I sleep last night?"
//! pulsebot history add --role assistant "Your sleep score was 88."
//! pulsebot history show --max-chars 500
//! pulsebot history clear
//! ```
//!
use crate::core::config::{self, Config};
use crate::core::error::{PulseError, Result};
use crate::core::history::{ConversationHistory, Role, DEFAULT_SEPARATOR};
use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing::info;

/// # History Command Group Arguments (`HistoryArgs`)
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Print the most recent turns that fit the character budget.
    Show(ShowArgs),
    /// Record a turn.
    Add(AddArgs),
    /// Delete every recorded turn.
    Clear,
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Character budget. Defaults to `history.max_chars` from configuration.
    #[arg(long)]
    max_chars: Option<usize>,

    /// Text placed between turns. Defaults to a blank line.
    #[arg(long)]
    separator: Option<String>,
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// Who produced the turn.
    #[arg(long, value_enum, default_value_t = Role::User)]
    role: Role,

    /// Turn text. Multiple words are joined with spaces.
    #[arg(required = true)]
    text: Vec<String>,
}

/// # Handle History Command (`handle_history`)
pub async fn handle_history(args: HistoryArgs) -> Result<()> {
    info!("Handling history command with args: {:?}", args);
    let cfg = config::load_config().context("Failed to load PulseBot configuration")?;
    let history = ConversationHistory::new(&cfg.history.file);

    match args.command {
        HistoryCommand::Show(show) => {
            let text = show_text(&history, &cfg, &show)?;
            if text.is_empty() {
                eprintln!("No history to show from '{}'.", history.path().display());
            } else {
                println!("{}", text);
            }
        }
        HistoryCommand::Add(add) => {
            let turn = history.append(add.role, &add.text.join(" "))?;
            println!("Recorded {} turn.", turn.role);
        }
        HistoryCommand::Clear => {
            history.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

fn show_text(history: &ConversationHistory, cfg: &Config, args: &ShowArgs) -> Result<String> {
    let max_chars = args.max_chars.unwrap_or(cfg.history.max_chars);
    if max_chars == 0 {
        return Err(anyhow!(PulseError::ArgumentParsing(
            "--max-chars must be greater than zero.".to_string()
        )));
    }
    let separator = args.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
    history.to_text(max_chars, separator)
}
