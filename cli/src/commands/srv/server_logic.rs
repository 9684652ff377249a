//! # PulseBot Data Server Implementation
//!
//! File: cli/src/commands/srv/server_logic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The Axum server behind `pulsebot srv`. Handlers share an `AppState` holding
//! the provider accessor and the loaded configuration.
//!
//! The record route never fails because of the provider: a fetch failure is
//! logged and answered with `200` and `{}`, the same value a prompt would see.
//! Only an unknown resource name yields `404`.
//!
//! ## Architecture
//!
//! 1. Find an available port, starting from the requested one.
//! 2. Build the router with tracing and (optionally) permissive CORS layers.
//! 3. Serve until Ctrl+C or SIGTERM, then shut down gracefully.
//!
use super::config::ServerConfig;
use crate::commands::prompt::render;
use crate::common::oura::{DataAccessor, Resource};
use crate::core::config::Config;
use crate::core::error::{PulseError, Result};
use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

/// Shared handler state.
pub struct AppState {
    pub accessor: DataAccessor,
    pub config: Config,
}

/// # Run Data Server (`run_server`)
///
/// Binds the first available port at or after `config.port` and serves the
/// API until a shutdown signal arrives.
///
/// ## Errors
///
/// Fails if no port is available within ten attempts, the listener cannot be
/// bound, or the server stops with an error.
pub async fn run_server(config: ServerConfig, state: Arc<AppState>) -> Result<()> {
    let max_port_attempts = 10;
    let addr = find_available_port(config.host, config.port, max_port_attempts).await?;

    let app = create_app(state, config.enable_cors);

    println!("\n=================================================================");
    println!("🩺 PulseBot data server");
    println!("🌐 Local URL:     http://localhost:{}", addr.port());
    println!("⚙️  Binding to:    {}", addr);
    println!("🔒 CORS enabled:  {}", config.enable_cors);
    println!("=================================================================\n");
    info!("Starting data server on {}", addr);
    println!("Server starting! Press Ctrl+C to stop.");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind TCP listener to address {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    println!("\nServer shutdown complete.");
    Ok(())
}

/// Resolves on Ctrl+C or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown..."),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM, initiating graceful shutdown...");
            }
            Err(e) => {
                error!(
                    "Failed to install SIGTERM handler: {}. Shutdown on SIGTERM might not work.",
                    e
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// # Find Available Port (`find_available_port`)
///
/// Tries `start_port` and then each following port, up to `max_attempts` ports.
async fn find_available_port(
    req_host: std::net::IpAddr,
    start_port: u16,
    max_attempts: u8,
) -> Result<SocketAddr> {
    let mut current_port = start_port;

    for attempt in 0..max_attempts {
        let addr = SocketAddr::new(req_host, current_port);
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                drop(listener);
                if attempt > 0 {
                    info!(
                        "Port {} was unavailable, successfully bound to available port {}.",
                        start_port, current_port
                    );
                }
                return Ok(addr);
            }
            Err(e) => {
                warn!(
                    "Attempt {}: Port {} on host {} is unavailable (Error: {}). Trying next port...",
                    attempt + 1,
                    current_port,
                    req_host,
                    e
                );
                current_port = match current_port.checked_add(1) {
                    Some(next) => next,
                    None => break,
                };
            }
        }
    }

    anyhow::bail!(
        "Could not find an available port on host {} starting from port {} after trying {} ports.",
        req_host,
        start_port,
        max_attempts
    )
}

/// # Create Axum Application (`create_app`)
///
/// Builds the router with its routes, state and middleware.
pub fn create_app(state: Arc<AppState>, enable_cors: bool) -> Router {
    let cors_layer = if enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        info!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default().include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/api/usercollection/{resource}", get(get_record))
        .route("/api/prompts/{*name}", get(get_prompt))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}

async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
) -> Response {
    let resource = match resource.parse::<Resource>() {
        Ok(r) => r,
        Err(e) => {
            debug!("Rejecting record request: {}", e);
            return (StatusCode::NOT_FOUND, e.to_string()).into_response();
        }
    };
    let body = state.accessor.prompt_value(resource).await;
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut vars: Vec<(String, String)> = query.into_iter().collect();
    vars.sort();

    match render::render_named_prompt(&state.config, Some(&state.accessor), &name, &vars).await {
        Ok(text) => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            text,
        )
            .into_response(),
        Err(e) => match e.downcast_ref::<PulseError>() {
            Some(PulseError::PromptNotFound { .. }) => {
                (StatusCode::NOT_FOUND, e.to_string()).into_response()
            }
            Some(PulseError::ArgumentParsing(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            _ => {
                error!("Failed to render prompt '{}': {:#}", name, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to render prompt.".to_string(),
                )
                    .into_response()
            }
        },
    }
}
