//! # PulseBot Prompt Command Group
//!
//! File: cli/src/commands/prompt/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Entry point and router for `pulsebot prompt`. Prompts are Tera templates in
//! the configured prompts directory that receive the sanitized provider values
//! and the recent conversation history.
//!
//! ## Examples
//!
//! ```bash
//! # List available prompt templates
//! pulsebot prompt list
//!
//! # Render the default prompt with live provider data
//! pulsebot prompt render
//!
//! # Render a named prompt without touching the network
//! pulsebot prompt render daily/morning --offline --var name=Ada
//! ```
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Handler and arguments for `pulsebot prompt list`.
mod list;
/// Handler and arguments for `pulsebot prompt render`, plus the shared render pipeline.
pub mod render;

/// # Prompt Command Group Arguments (`PromptArgs`)
#[derive(Parser, Debug)]
pub struct PromptArgs {
    #[command(subcommand)]
    command: PromptCommand,
}

/// # Prompt Subcommands (`PromptCommand`)
#[derive(Subcommand, Debug)]
enum PromptCommand {
    /// List prompt templates found in the prompts directory.
    List(list::ListArgs),
    /// Render a prompt template with provider data and history.
    Render(render::RenderArgs),
}

/// # Handle Prompt Command (`handle_prompt`)
///
/// Dispatches to the selected subcommand handler.
pub async fn handle_prompt(args: PromptArgs) -> Result<()> {
    match args.command {
        PromptCommand::List(args) => list::handle_list(args).await?,
        PromptCommand::Render(args) => render::handle_render(args).await?,
    }
    Ok(())
}
