//! # PulseBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components used by the
//! command modules:
//! - `config`: Configuration loading, merging, environment overrides and validation
//! - `error`: Error types and error handling utilities
//! - `history`: The file-backed conversation transcript and its text rendering
//! - `templating`: Prompt template discovery and rendering
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{PulseError, Result}; // For error handling
//! use crate::core::history::ConversationHistory; // For the transcript
//! use crate::core::templating; // For prompt rendering
//! ```
//!
pub mod config;
pub mod error;
pub mod history;
pub mod templating;
