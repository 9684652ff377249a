//! # PulseBot Provider Module (`common::oura`)
//!
//! File: cli/src/common/oura/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything PulseBot knows about the health-data provider:
//!
//! - **`resource`**: the `Resource` enum naming the three daily collections.
//! - **`accessor`**: `DataAccessor`, the authenticated fetch-and-sanitize client,
//!   and `ProviderSettings`, the explicit configuration it is built from.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::oura::{DataAccessor, ProviderSettings, Resource};
//!
//! let accessor = DataAccessor::new(ProviderSettings::from_config(&cfg.provider)?)?;
//! for (resource, value) in accessor.prompt_values().await {
//!     println!("{}\t{}", resource, value);
//! }
//! ```
//!
pub mod accessor;
pub mod resource;

pub use accessor::{DataAccessor, ProviderSettings, EMPTY_RECORD};
pub use resource::Resource;
