//! # PulseBot Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! Filesystem helpers. Currently a single submodule:
//!
//! - **`io`**: directory creation, tolerant reads, line appends and whole-file writes,
//!   used by the conversation history store (`core::history`).
//!
//! ```rust
//! use crate::common::fs::io;
//! io::append_line(Path::new("history.jsonl"), r#"{"role":"user","content":"hi"}"#)?;
//! ```
//!

/// Basic file I/O operations (`ensure_dir_exists`, `read_file_if_exists`, `append_line`, `write_string_to_file`).
pub mod io;
