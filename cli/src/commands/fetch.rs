//! # PulseBot Fetch Command
//!
//! File: cli/src/commands/fetch.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `pulsebot fetch` prints the sanitized provider records exactly as a prompt
//! function would receive them. Each value is always valid JSON: a failure to
//! fetch is logged and printed as `{}`. With `--strict` the failure is reported
//! as a command error instead, which is what an operator debugging credentials
//! usually wants.
//!
//! ## Examples
//!
//! ```bash
//! pulsebot fetch daily_sleep
//! # {"score":88,"contributors":{"sleep_balance":90}}
//!
//! pulsebot fetch --all
//! # daily_activity	{"score":71,"steps":8042}
//! # daily_readiness	{}
//! # daily_sleep	{"score":88,"contributors":{"sleep_balance":90}}
//!
//! pulsebot -v fetch --strict daily_readiness
//! ```
//!
use crate::common::oura::{DataAccessor, ProviderSettings, Resource};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use futures_util::future::{join_all, try_join_all};
use serde_json::Value;
use tracing::{debug, info};

/// # Fetch Arguments (`FetchArgs`)
#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Collections to fetch (daily_activity, daily_readiness, daily_sleep).
    #[arg(value_enum, required_unless_present = "all")]
    pub resources: Vec<Resource>,

    /// Fetch all three collections.
    #[arg(long, conflicts_with = "resources")]
    pub all: bool,

    /// Fail instead of printing `{}` when a record cannot be produced.
    #[arg(long)]
    pub strict: bool,
}

impl FetchArgs {
    /// Requested resources without duplicates, in the order given.
    fn selected(&self) -> Vec<Resource> {
        if self.all {
            return Resource::ALL.to_vec();
        }
        let mut selected = Vec::new();
        for resource in &self.resources {
            if !selected.contains(resource) {
                selected.push(*resource);
            }
        }
        selected
    }
}

/// # Handle Fetch Command (`handle_fetch`)
///
/// Loads configuration, builds the accessor and prints one value per resource.
///
/// ## Errors
///
/// Fails when configuration cannot be loaded, no credential is configured, or
/// (with `--strict`) any fetch fails.
pub async fn handle_fetch(args: FetchArgs) -> Result<()> {
    info!("Handling fetch command with args: {:?}", args);
    let cfg = config::load_config().context("Failed to load PulseBot configuration")?;
    let accessor = DataAccessor::new(ProviderSettings::from_config(&cfg.provider)?)?;

    let values = fetch_values(&accessor, &args.selected(), args.strict).await?;
    println!("{}", format_values(&values));
    Ok(())
}

/// Fetches `resources` concurrently. In strict mode the first failure aborts.
pub async fn fetch_values(
    accessor: &DataAccessor,
    resources: &[Resource],
    strict: bool,
) -> Result<Vec<(Resource, String)>> {
    if strict {
        let values = try_join_all(resources.iter().map(|&resource| async move {
            accessor
                .fetch_sanitized(resource)
                .await
                .map(|record| (resource, Value::Object(record).to_string()))
        }))
        .await
        .context("Strict fetch failed")?;
        return Ok(values);
    }
    Ok(join_all(
        resources
            .iter()
            .map(|&resource| async move { (resource, accessor.prompt_value(resource).await) }),
    )
    .await)
}

/// One value prints bare; several print as `<resource>\t<json>` lines.
fn format_values(values: &[(Resource, String)]) -> String {
    debug!("Formatting {} value(s)", values.len());
    match values {
        [(_, single)] => single.clone(),
        _ => values
            .iter()
            .map(|(resource, value)| format!("{}\t{}", resource, value))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
