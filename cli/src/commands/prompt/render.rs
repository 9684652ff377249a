//! # PulseBot Prompt Render Command
//!
//! File: cli/src/commands/prompt/render.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Renders a prompt template with the three provider values, the budgeted
//! conversation history and any `--var KEY=VALUE` pairs, then prints it.
//!
//! `render_named_prompt` is the shared pipeline; the data server's
//! `/api/prompts/{name}` route calls it as well.
//!
//! With `--offline` no request is made and every provider value is `{}`. This
//! is useful while editing templates.
//!
use crate::common::oura::{DataAccessor, ProviderSettings, Resource, EMPTY_RECORD};
use crate::core::config::{self, Config};
use crate::core::error::{PulseError, Result};
use crate::core::history::{ConversationHistory, DEFAULT_SEPARATOR};
use crate::core::templating;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::path::Path;
use tracing::{debug, info, warn};

/// # Render Prompt Arguments (`RenderArgs`)
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Template name relative to the prompts directory, without `.tera`.
    /// Defaults to `prompts.default` from configuration.
    pub name: Option<String>,

    /// Extra template variable (KEY=VALUE). Overrides built-in values. Repeatable.
    #[arg(long = "var", value_parser = parse_key_val, action = clap::ArgAction::Append)]
    pub var: Vec<(String, String)>,

    /// Skip the provider and bind `{}` for every record.
    #[arg(long)]
    pub offline: bool,
}

/// Parses a `KEY=VALUE` argument into a trimmed pair.
pub fn parse_key_val(s: &str) -> Result<(String, String)> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| {
            anyhow!(
                "Invalid variable format: '{}'. Expected format: KEY=VALUE",
                s
            )
        })
}

/// # Handle Prompt Render Command (`handle_render`)
pub async fn handle_render(args: RenderArgs) -> Result<()> {
    info!("Handling prompt render command with args: {:?}", args);
    let cfg = config::load_config().context("Failed to load PulseBot configuration")?;

    let accessor = if args.offline {
        None
    } else {
        Some(DataAccessor::new(ProviderSettings::from_config(
            &cfg.provider,
        )?)?)
    };
    let name = args.name.unwrap_or_else(|| cfg.prompts.default.clone());

    let rendered = render_named_prompt(&cfg, accessor.as_ref(), &name, &args.var).await?;
    println!("{}", rendered);
    Ok(())
}

/// # Render Named Prompt (`render_named_prompt`)
///
/// Resolves template `name`, gathers provider values (all `{}` when
/// `accessor` is `None`) and the history text, and renders the template.
///
/// The template is checked before any request is made, so an unknown name
/// fails fast. An unreadable history file degrades to empty history.
pub async fn render_named_prompt(
    cfg: &Config,
    accessor: Option<&DataAccessor>,
    name: &str,
    user_vars: &[(String, String)],
) -> Result<String> {
    let prompts_dir = Path::new(&cfg.prompts.directory);
    if !templating::prompt_path(prompts_dir, name)?.is_file() {
        return Err(anyhow!(PulseError::PromptNotFound {
            name: name.to_string()
        }));
    }

    let values = match accessor {
        Some(accessor) => accessor.prompt_values().await,
        None => Resource::ALL
            .iter()
            .map(|&resource| (resource, EMPTY_RECORD.to_string()))
            .collect(),
    };

    let history = ConversationHistory::new(&cfg.history.file)
        .to_text(cfg.history.max_chars, DEFAULT_SEPARATOR)
        .unwrap_or_else(|e| {
            warn!("Failed to read conversation history, using none: {:#}", e);
            String::new()
        });
    debug!("History text is {} chars", history.chars().count());

    let context = templating::build_prompt_context(&values, &history, user_vars);
    templating::render_prompt(prompts_dir, name, &context)
}
