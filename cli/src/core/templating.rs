//! # PulseBot Prompt Templates
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module renders the prompt templates that consume the provider values.
//! A prompts directory holds `<name>.tera` files (nested directories become
//! `dir/name`). Rendering binds:
//!
//! - `dailyActivity`, `dailyReadiness`, `dailySleep`: sanitized JSON strings (or `{}`)
//! - `history`: the budgeted conversation transcript
//! - any `--var KEY=VALUE` pairs, which win over the above
//!
//! ## Architecture
//!
//! Templates use the Tera engine with autoescaping disabled, so the JSON values
//! land in the prompt verbatim. Template names are restricted to a safe
//! character set because the data server accepts them from request paths.
//!
//! ## Examples
//!
//! ```text
//! {# prompts/chat.tera #}
//! The following is a conversation with a wellness coach.
//! Activity: {{ dailyActivity }}
//! Sleep: {{ dailySleep }}
//!
//! {{ history }}
//! ```
//!
//! ```rust
//! let context = templating::build_prompt_context(&values, &history_text, &vars);
//! let prompt = templating::render_prompt(Path::new("prompts"), "chat", &context)?;
//! ```
//!
use crate::common::oura::Resource;
use crate::core::error::{PulseError, Result};
use anyhow::{anyhow, Context};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File extension identifying prompt templates.
pub const TEMPLATE_EXTENSION: &str = ".tera";

/// Variable carrying the rendered conversation history.
pub const HISTORY_VARIABLE: &str = "history";

/// # List Prompts (`list_prompts`)
///
/// Returns the names of all templates under `prompts_dir`, sorted. Hidden files
/// and directories are skipped. A missing directory yields an empty list.
pub fn list_prompts(prompts_dir: &Path) -> Result<Vec<String>> {
    if !prompts_dir.exists() {
        warn!(
            "Prompts directory '{}' does not exist.",
            prompts_dir.display()
        );
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry_result in WalkDir::new(prompts_dir).min_depth(1) {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to access entry during walk in '{}': {}",
                    prompts_dir.display(),
                    e
                );
                continue;
            }
        };
        let relative_path = match entry.path().strip_prefix(prompts_dir) {
            Ok(p) => p,
            Err(_) => continue,
        };
        if relative_path
            .components()
            .any(|comp| comp.as_os_str().to_string_lossy().starts_with('.'))
        {
            debug!("Skipping hidden path: {}", entry.path().display());
            continue;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = relative_path.to_string_lossy().replace('\\', "/");
        if relative.ends_with(TEMPLATE_EXTENSION) {
            names.push(relative[..relative.len() - TEMPLATE_EXTENSION.len()].to_string());
        }
    }
    names.sort();
    debug!("Found {} prompt template(s)", names.len());
    Ok(names)
}

/// Resolves a template name to its file, rejecting names that could escape `prompts_dir`.
pub fn prompt_path(prompts_dir: &Path, name: &str) -> Result<PathBuf> {
    let valid = !name.is_empty()
        && !name.starts_with('/')
        && name.split('/').all(|segment| {
            !segment.is_empty()
                && !segment.starts_with('.')
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        });
    if !valid {
        return Err(anyhow!(PulseError::ArgumentParsing(format!(
            "Invalid prompt name '{}'. Use letters, digits, '-', '_' and '/' separators.",
            name
        ))));
    }
    Ok(prompts_dir.join(format!("{}{}", name, TEMPLATE_EXTENSION)))
}

/// # Build Prompt Context (`build_prompt_context`)
///
/// Collects the template variables. User variables are inserted last and
/// therefore override provider values and history.
pub fn build_prompt_context(
    values: &[(Resource, String)],
    history: &str,
    user_vars: &[(String, String)],
) -> HashMap<String, String> {
    let mut context = HashMap::new();
    for (resource, value) in values {
        context.insert(resource.prompt_variable().to_string(), value.clone());
    }
    context.insert(HISTORY_VARIABLE.to_string(), history.to_string());
    for (key, value) in user_vars {
        if context.contains_key(key) {
            debug!("User variable '{}' overrides a built-in value", key);
        }
        context.insert(key.clone(), value.clone());
    }
    context
}

/// # Render Prompt (`render_prompt`)
///
/// Renders template `name` from `prompts_dir` with `context_map`.
///
/// ## Errors
///
/// * `PulseError::ArgumentParsing` for an invalid name.
/// * `PulseError::PromptNotFound` if no such template exists.
/// * `PulseError::Template` if Tera fails to parse or render the template.
pub fn render_prompt(
    prompts_dir: &Path,
    name: &str,
    context_map: &HashMap<String, String>,
) -> Result<String> {
    let path = prompt_path(prompts_dir, name)?;
    if !path.is_file() {
        return Err(anyhow!(PulseError::PromptNotFound {
            name: name.to_string()
        }));
    }
    debug!("Rendering prompt template: {}", path.display());

    let template_content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read template file '{}'", path.display()))?;
    let tera_context = tera::Context::from_serialize(context_map).map_err(|e| {
        anyhow!(PulseError::Template { source: e })
            .context("Failed to create Tera context from map")
    })?;
    let rendered = Tera::one_off(&template_content, &tera_context, false).map_err(|e| {
        anyhow!(PulseError::Template { source: e }).context(format!(
            "Tera rendering failed for template file '{}'",
            path.display()
        ))
    })?;
    info!("Rendered prompt '{}' ({} chars)", name, rendered.len());
    Ok(rendered)
}
