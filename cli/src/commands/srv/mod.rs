//! # PulseBot Data Server
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A small local HTTP server that exposes the sanitized provider values and
//! rendered prompts to a chat front end:
//!
//! - `GET /api/usercollection/{resource}`: the prompt value as `application/json`
//! - `GET /api/prompts/{name}`: the rendered prompt (query parameters become variables)
//! - `GET /healthz`: `ok`
//!
//! ## Architecture
//!
//! - `config.rs`: command-line arguments and effective server settings
//! - `server_logic.rs`: router, handlers, port selection and shutdown
//!
//! ```bash
//! pulsebot srv --port 9000
//! curl http://localhost:9000/api/usercollection/daily_sleep
//! curl 'http://localhost:9000/api/prompts/chat?name=Ada'
//! ```
//!
use crate::common::oura::{DataAccessor, ProviderSettings};
use crate::core::config as app_config;
use crate::core::error::Result;
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// Command-line arguments and server settings.
pub mod config;

/// Axum router, handlers and server loop.
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// Loads PulseBot configuration, builds the provider accessor and runs the
/// server until Ctrl+C or SIGTERM.
pub async fn handle_srv(args: SrvArgs) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let server_config = config::ServerConfig::from_args(&args);
    let app_cfg = app_config::load_config().context("Failed to load PulseBot configuration")?;
    let accessor = DataAccessor::new(ProviderSettings::from_config(&app_cfg.provider)?)?;
    info!("Effective server config: {:?}", server_config);

    let state = Arc::new(server_logic::AppState {
        accessor,
        config: app_cfg,
    });
    server_logic::run_server(server_config, state).await?;

    Ok(())
}
