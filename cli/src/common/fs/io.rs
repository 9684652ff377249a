//! # PulseBot Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the conversation history store:
//! - **`ensure_dir_exists`**: creates a directory (and parents) or verifies an existing one.
//! - **`read_file_if_exists`**: reads a file to a string, treating a missing file as `None`.
//! - **`append_line`**: appends one line to a file, creating the file and its parent directory.
//! - **`write_string_to_file`**: replaces a file's content, creating its parent directory.
//!
//! Errors carry the path involved as `anyhow` context.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at `path`, creating it (like `mkdir -p`) if needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!("Path exists but is not a directory: {:?}", path);
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

fn ensure_parent_exists(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

/// Reads a whole file, returning `Ok(None)` when it does not exist.
pub fn read_file_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("File not found, treating as empty: {:?}", path);
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read file {:?}", path)),
    }
}

/// Appends `line` plus a trailing newline to `path`.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent_exists(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open file for appending {:?}", path))?;
    writeln!(file, "{}", line).with_context(|| format!("Failed to append to file {:?}", path))?;
    debug!("Appended {} bytes to {:?}", line.len() + 1, path);
    Ok(())
}

/// Writes `content` to `path`, replacing any existing content.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent_exists(path)?;
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    info!("Wrote content to file: {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_append_creates_parents_and_appends() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/dir/log.jsonl");
        append_line(&file_path, "one")?;
        append_line(&file_path, "two")?;
        assert_eq!(read_file_if_exists(&file_path)?.as_deref(), Some("one\ntwo\n"));
        Ok(())
    }

    #[test]
    fn test_write_replaces_content() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("out.txt");
        write_string_to_file(&file_path, "first")?;
        write_string_to_file(&file_path, "")?;
        assert_eq!(read_file_if_exists(&file_path)?.as_deref(), Some(""));
        Ok(())
    }

    #[test]
    fn test_read_missing_file() -> Result<()> {
        let base_dir = tempdir()?;
        assert_eq!(read_file_if_exists(&base_dir.path().join("nonexistent.txt"))?, None);
        Ok(())
    }
}
