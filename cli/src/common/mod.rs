//! # PulseBot Common Utilities
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers:
//!
//! - `fs`: small filesystem helpers (read-if-exists, append, ensure directories)
//! - `oura`: the authenticated accessor for the provider's daily collections
//! - `sanitize`: recursive removal of free text and lists from a record
//!
//! Nothing here prints to the terminal; output is left to `commands`.
//!

/// Filesystem helpers.
pub mod fs;
/// Provider resources and the data accessor.
pub mod oura;
/// Record sanitizer applied before values reach a prompt.
pub mod sanitize;
