//! # PulseBot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module implements the configuration system for PulseBot, handling loading,
//! merging, validation, and access to configuration data. It combines defaults,
//! user settings, project-specific overrides and environment variables.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Environment variables (a `.env` file in the working directory is loaded first):
//!    - `SECRET_OURA_API_KEY` → `provider.access_token`
//!    - `PULSEBOT_API_BASE` → `provider.api_base`
//!    - `PULSEBOT_PROMPTS_DIR` → `prompts.directory`
//!    - `PULSEBOT_HISTORY_FILE` → `history.file`
//! 2. Project-specific `.pulsebot.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! The loaded `Config` is the only place that reads process-wide state. The
//! provider accessor receives an explicit `ProviderSettings` built from it.
//!
//! ## Examples
//!
//! ```toml
//! [provider]
//! api_base = "https://api.ouraring.com"
//! access_token = "..."
//!
//! [prompts]
//! directory = "~/bots/pulse/prompts"
//! default = "chat"
//!
//! [history]
//! file = "~/.local/share/pulsebot/history.jsonl"
//! max_chars = 2000
//! ```
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let accessor = DataAccessor::new(ProviderSettings::from_config(&cfg.provider)?)?;
//! ```
//!
use crate::core::error::{PulseError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Settings for the health-data provider API.
#[derive(Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Scheme and host of the provider API, without the `/v2/...` path.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Bearer credential. Usually supplied through `SECRET_OURA_API_KEY` instead.
    #[serde(default)]
    pub access_token: Option<String>,
}

// Manual impl so the credential never shows up in debug logs.
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_base", &self.api_base)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            access_token: None,
        }
    }
}

/// Where prompt templates live and which one `prompt render` uses by default.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PromptsConfig {
    /// Directory holding `<name>.tera` templates (can use ~). Will be expanded.
    #[serde(default = "default_prompts_dir")]
    pub directory: String,
    /// Template rendered when no name is given.
    #[serde(default = "default_prompt_name")]
    pub default: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            directory: default_prompts_dir(),
            default: default_prompt_name(),
        }
    }
}

/// Conversation transcript settings.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// JSON-lines transcript file (can use ~). Will be expanded.
    #[serde(default = "default_history_file")]
    pub file: String,
    /// Character budget used when rendering the transcript as text.
    #[serde(default = "default_history_max_chars")]
    pub max_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: default_history_file(),
            max_chars: default_history_max_chars(),
        }
    }
}

pub fn default_api_base() -> String {
    "https://api.ouraring.com".to_string()
}
fn default_prompts_dir() -> String {
    "~/.config/pulsebot/prompts".to_string()
}
fn default_prompt_name() -> String {
    "chat".to_string()
}
fn default_history_file() -> String {
    "~/.local/share/pulsebot/history.jsonl".to_string()
}
fn default_history_max_chars() -> usize {
    2000
}

const PROJECT_CONFIG_FILENAME: &str = ".pulsebot.toml";

pub const ENV_ACCESS_TOKEN: &str = "SECRET_OURA_API_KEY";
pub const ENV_API_BASE: &str = "PULSEBOT_API_BASE";
pub const ENV_PROMPTS_DIR: &str = "PULSEBOT_PROMPTS_DIR";
pub const ENV_HISTORY_FILE: &str = "PULSEBOT_HISTORY_FILE";

pub fn load_config() -> Result<Config> {
    load_dotenv();
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    apply_env_overrides(&mut merged_config, |key| std::env::var(key).ok());
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found."),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "PulseBot", "pulsebot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.pulsebot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win over user values whenever they differ from the built-in default.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.provider.api_base = if project_cfg.provider.api_base != default_api_base() {
        project_cfg.provider.api_base
    } else {
        user.provider.api_base
    };
    merged.provider.access_token = project_cfg
        .provider
        .access_token
        .or(user.provider.access_token);
    merged.prompts.directory = if project_cfg.prompts.directory != default_prompts_dir() {
        project_cfg.prompts.directory
    } else {
        user.prompts.directory
    };
    merged.prompts.default = if project_cfg.prompts.default != default_prompt_name() {
        project_cfg.prompts.default
    } else {
        user.prompts.default
    };
    merged.history.file = if project_cfg.history.file != default_history_file() {
        project_cfg.history.file
    } else {
        user.history.file
    };
    merged.history.max_chars = if project_cfg.history.max_chars != default_history_max_chars() {
        project_cfg.history.max_chars
    } else {
        user.history.max_chars
    };
    merged
}

/// Applies environment overrides. `lookup` is `std::env::var` outside of tests.
fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(token) = non_empty(ENV_ACCESS_TOKEN) {
        debug!("Using provider access token from {}", ENV_ACCESS_TOKEN);
        config.provider.access_token = Some(token);
    }
    if let Some(api_base) = non_empty(ENV_API_BASE) {
        debug!("Using provider API base from {}: {}", ENV_API_BASE, api_base);
        config.provider.api_base = api_base;
    }
    if let Some(dir) = non_empty(ENV_PROMPTS_DIR) {
        debug!("Using prompts directory from {}: {}", ENV_PROMPTS_DIR, dir);
        config.prompts.directory = dir;
    }
    if let Some(file) = non_empty(ENV_HISTORY_FILE) {
        debug!("Using history file from {}: {}", ENV_HISTORY_FILE, file);
        config.history.file = file;
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    config.prompts.directory = shellexpand::tilde(&config.prompts.directory).into_owned();
    config.history.file = shellexpand::tilde(&config.history.file).into_owned();
    debug!(
        "Expanded prompts directory: {}, history file: {}",
        config.prompts.directory, config.history.file
    );
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    let api_base = config.provider.api_base.trim();
    if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
        return Err(anyhow!(PulseError::Config(format!(
            "Invalid provider api_base '{}'. Expected an http:// or https:// URL.",
            config.provider.api_base
        ))));
    }
    let prompts_dir = PathBuf::from(&config.prompts.directory);
    if !prompts_dir.exists() {
        warn!(
            "Configured prompts directory '{}' does not exist.",
            prompts_dir.display()
        );
    } else if !prompts_dir.is_dir() {
        return Err(anyhow!(PulseError::Config(format!(
            "Configured prompts path '{}' exists but is not a directory.",
            prompts_dir.display()
        ))));
    }
    if config.prompts.default.trim().is_empty() {
        return Err(anyhow!(PulseError::Config(
            "The default prompt name cannot be empty.".to_string()
        )));
    }
    if config.history.max_chars == 0 {
        return Err(anyhow!(PulseError::Config(
            "history.max_chars must be greater than zero.".to_string()
        )));
    }
    info!("Configuration validation successful.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [provider]
            access_token = "file-token"

            [prompts]
            directory = "~/bots/prompts"

            [history]
            max_chars = 500
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.provider.api_base, default_api_base()); // Default
        assert_eq!(config.provider.access_token.as_deref(), Some("file-token"));
        assert_eq!(config.prompts.directory, "~/bots/prompts"); // Not yet expanded
        assert_eq!(config.prompts.default, "chat");
        assert_eq!(config.history.file, default_history_file());
        assert_eq!(config.history.max_chars, 500);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: std::result::Result<Config, _> = toml::from_str("[provider]\nretries = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let provider = ProviderConfig {
            access_token: Some("super-secret".into()),
            ..Default::default()
        };
        let rendered = format!("{:?}", provider);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let user = Config {
            provider: ProviderConfig {
                api_base: "https://user.example".into(),
                access_token: Some("user-token".into()),
            },
            history: HistoryConfig {
                max_chars: 800,
                ..Default::default()
            },
            ..Default::default()
        };
        let project = Config {
            provider: ProviderConfig {
                access_token: Some("project-token".into()),
                ..Default::default()
            },
            prompts: PromptsConfig {
                default: "morning".into(),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        // Project left api_base at its default, so the user value survives.
        assert_eq!(merged.provider.api_base, "https://user.example");
        assert_eq!(merged.provider.access_token.as_deref(), Some("project-token"));
        assert_eq!(merged.prompts.default, "morning");
        assert_eq!(merged.history.max_chars, 800);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_ACCESS_TOKEN, "env-token"),
            (ENV_API_BASE, "http://127.0.0.1:9999"),
            (ENV_HISTORY_FILE, "   "), // Blank values are ignored.
        ]);
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.provider.access_token.as_deref(), Some("env-token"));
        assert_eq!(config.provider.api_base, "http://127.0.0.1:9999");
        assert_eq!(config.prompts.directory, default_prompts_dir());
        assert_eq!(config.history.file, default_history_file());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            prompts: PromptsConfig {
                directory: "~/prompts_test".to_string(),
                ..Default::default()
            },
            history: HistoryConfig {
                file: "/absolute/history.jsonl".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        assert!(!config.prompts.directory.starts_with('~'));
        assert!(config.prompts.directory.ends_with("prompts_test"));
        assert_eq!(config.history.file, "/absolute/history.jsonl"); // Absolute path unchanged
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let root = tempdir().unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        let repo = root.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let nested = repo.join("src");
        fs::create_dir_all(&nested).unwrap();

        // The config above the repository boundary is not picked up.
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_validate_config_valid() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            prompts: PromptsConfig {
                directory: temp_dir.path().to_string_lossy().to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_api_base() {
        let config = Config {
            provider: ProviderConfig {
                api_base: "api.ouraring.com".into(),
                access_token: None,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid provider api_base"));
    }

    #[test]
    fn test_validate_config_prompts_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let config = Config {
            prompts: PromptsConfig {
                directory: file_path.to_string_lossy().to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }

    #[test]
    fn test_validate_config_zero_budget() {
        let config = Config {
            history: HistoryConfig {
                max_chars: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
