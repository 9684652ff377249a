//! # PulseBot Field Sanitizer (`common::sanitize`)
//!
//! File: cli/src/common/sanitize.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Provider records carry identifiers, timestamps, free-text notes and long
//! per-interval sample lists. None of that helps the prompt, and all of it
//! costs tokens. This module prunes a record down to its numeric skeleton:
//!
//! - keys holding a string are removed
//! - keys holding an array are removed outright (arrays are never descended into)
//! - keys holding an object are kept, and the object is pruned recursively
//! - numbers, booleans and `null` are kept untouched
//!
//! The pruning happens in place on a `serde_json::Map`.
//!
//! ## Examples
//!
//! ```rust
//! let mut record = json!({"steps": 500, "tags": ["a"], "meta": {"note": "x", "score": 7}});
//! if let Value::Object(map) = &mut record {
//!     sanitize::strip_text_and_lists(map);
//! }
//! assert_eq!(record, json!({"steps": 500, "meta": {"score": 7}}));
//! ```
//!
use serde_json::{Map, Value};

/// # Strip Text and Lists (`strip_text_and_lists`)
///
/// Removes every string- or array-valued entry from `record`, recursing into
/// nested objects. Nested object keys survive even if they end up empty.
pub fn strip_text_and_lists(record: &mut Map<String, Value>) {
    record.retain(|_, value| match value {
        Value::String(_) | Value::Array(_) => false,
        Value::Object(nested) => {
            strip_text_and_lists(nested);
            true
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    });
}

/// Returns `true` when no string or array remains anywhere in `record`.
pub fn is_sanitized(record: &Map<String, Value>) -> bool {
    record.values().all(|value| match value {
        Value::String(_) | Value::Array(_) => false,
        Value::Object(nested) => is_sanitized(nested),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    })
}
