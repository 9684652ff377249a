//! # PulseBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Aggregates the top-level command groups of the PulseBot CLI. Each group
//! defines its own arguments struct and an async `handle_*` function that
//! `main.rs` dispatches to.
//!
//! ## Command Groups
//!
//! - `fetch`: print sanitized provider records
//! - `prompt`: list and render prompt templates
//! - `history`: manage the local conversation transcript
//! - `srv`: serve records and prompts over HTTP
//!

/// Prints sanitized provider records.
pub mod fetch;
/// Manages the conversation transcript. Includes `show`, `add` and `clear`.
pub mod history;
/// Prompt templates. Includes `list` and `render`.
pub mod prompt;
/// Local HTTP data server.
pub mod srv;
