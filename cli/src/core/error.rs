//! # PulseBot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout PulseBot. It provides
//! a consistent approach to error management with detailed error information
//! and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `PulseError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Two variants matter to the provider accessor, and both are absorbed at its
//! boundary rather than surfaced to the bot:
//! - `TransportFailure`: network, DNS, TLS, non-2xx status or an undecodable body
//! - `NoRecordAvailable`: the `data` list is missing, empty or not a list of objects
//!
//! ## Examples
//!
//! ```rust
//! match accessor.fetch_sanitized(Resource::DailySleep).await {
//!     Ok(record) => println!("{}", serde_json::Value::Object(record)),
//!     Err(PulseError::NoRecordAvailable { resource, .. }) => {
//!         println!("Nothing recorded yet for {}", resource);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for PulseBot.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport failure while fetching '{resource}': {source}")]
    TransportFailure {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("No record available for '{resource}': {reason}")]
    NoRecordAvailable { resource: String, reason: String },

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Prompt template '{name}' not found.")]
    PromptNotFound { name: String },

    #[error("History error: {0}")]
    History(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
