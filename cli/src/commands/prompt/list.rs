//! # PulseBot Prompt List Command
//!
//! File: cli/src/commands/prompt/list.rs
//! Author: Christi Mahu
//!
//! Prints the prompt templates available in the configured prompts directory.
//!
//! ```text
//! Available prompts in '/home/user/.config/pulsebot/prompts':
//!
//!   chat (default)
//!   daily/morning
//!
//! Found 2 prompt(s).
//! ```
//!
use crate::core::config;
use crate::core::error::Result;
use crate::core::templating;
use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing::info;

/// # List Prompt Arguments (`ListArgs`)
///
/// Takes no arguments; present for consistency with the other subcommands.
#[derive(Parser, Debug)]
pub struct ListArgs {}

/// # Handle Prompt List Command (`handle_list`)
pub async fn handle_list(_args: ListArgs) -> Result<()> {
    info!("Handling prompt list command...");
    let cfg = config::load_config().context("Failed to load PulseBot configuration")?;
    let prompts_dir = Path::new(&cfg.prompts.directory);
    let names = templating::list_prompts(prompts_dir)?;
    print!(
        "{}",
        format_listing(prompts_dir, &names, &cfg.prompts.default)
    );
    Ok(())
}

fn format_listing(prompts_dir: &Path, names: &[String], default_name: &str) -> String {
    if names.is_empty() {
        return format!(
            "No prompts found in '{}'.\n\
             Add a template such as '{}/{}{}' or point {} at another directory.\n",
            prompts_dir.display(),
            prompts_dir.display(),
            default_name,
            templating::TEMPLATE_EXTENSION,
            config::ENV_PROMPTS_DIR
        );
    }

    let mut out = format!("Available prompts in '{}':\n\n", prompts_dir.display());
    for name in names {
        if name == default_name {
            out.push_str(&format!("  {} (default)\n", name));
        } else {
            out.push_str(&format!("  {}\n", name));
        }
    }
    out.push_str(&format!("\nFound {} prompt(s).\n", names.len()));
    out
}
