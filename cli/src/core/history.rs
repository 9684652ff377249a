//! # PulseBot Conversation History
//!
//! File: cli/src/core/history.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A local transcript of the conversation, one JSON object per line:
//!
//! ```text
//! {"role":"user","content":"How did I sleep?","timestamp":"2024-05-01T07:30:00Z"}
//! {"role":"assistant","content":"Your sleep score was 88.","timestamp":"2024-05-01T07:30:02Z"}
//! ```
//!
//! The transcript is rendered to text for the `history show` command and for
//! the `history` prompt variable. Rendering walks backwards from the newest
//! turn and stops before the character budget would be exceeded, so the text
//! always holds the most recent contiguous turns.
//!
//! Malformed lines are skipped with a warning rather than failing the read.
//!
use crate::common::fs::io;
use crate::core::error::{PulseError, Result};
use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Separator placed between turns when rendering.
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Who produced a turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("User"),
            Role::Assistant => f.write_str("Assistant"),
        }
    }
}

/// One transcript entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// `"<Role>: <content>"`, the form used in rendered history.
    pub fn line(&self) -> String {
        format!("{}: {}", self.role, self.content)
    }
}

/// File-backed transcript.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    path: PathBuf,
}

impl ConversationHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every well-formed turn, oldest first. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<Turn>> {
        let Some(content) = io::read_file_if_exists(&self.path)? else {
            return Ok(Vec::new());
        };
        let mut turns = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Turn>(line) {
                Ok(turn) => turns.push(turn),
                Err(e) => warn!(
                    "Skipping malformed history line {} in {}: {}",
                    index + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        debug!("Loaded {} turn(s) from {}", turns.len(), self.path.display());
        Ok(turns)
    }

    pub fn append(&self, role: Role, content: &str) -> Result<Turn> {
        if content.trim().is_empty() {
            return Err(anyhow!(PulseError::History(
                "Refusing to record an empty turn.".to_string()
            )));
        }
        let turn = Turn::new(role, content);
        let line = serde_json::to_string(&turn)
            .map_err(|e| anyhow!(PulseError::History(format!("Failed to encode turn: {}", e))))?;
        io::append_line(&self.path, &line)?;
        info!("Recorded {} turn in {}", role, self.path.display());
        Ok(turn)
    }

    pub fn clear(&self) -> Result<()> {
        io::write_string_to_file(&self.path, "")?;
        info!("Cleared history at {}", self.path.display());
        Ok(())
    }

    /// Loads the transcript and renders it with `render_turns`.
    pub fn to_text(&self, max_chars: usize, separator: &str) -> Result<String> {
        Ok(render_turns(&self.load()?, max_chars, separator))
    }
}

/// # Render Turns (`render_turns`)
///
/// Joins the newest turns with `separator`, keeping the total at or below
/// `max_chars` characters. Stops at the first turn (walking backwards) that
/// does not fit; older turns are never used to fill the remaining space.
pub fn render_turns(turns: &[Turn], max_chars: usize, separator: &str) -> String {
    let separator_len = separator.chars().count();
    let mut kept: Vec<String> = Vec::new();
    let mut used = 0usize;

    for turn in turns.iter().rev() {
        let line = turn.line();
        let cost = line.chars().count() + if kept.is_empty() { 0 } else { separator_len };
        if used + cost > max_chars {
            break;
        }
        used += cost;
        kept.push(line);
    }

    kept.reverse();
    kept.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn turns(lines: &[(Role, &str)]) -> Vec<Turn> {
        lines.iter().map(|(role, text)| Turn::new(*role, *text)).collect()
    }

    #[test]
    fn test_render_all_when_budget_allows() {
        let t = turns(&[(Role::User, "hi"), (Role::Assistant, "hello")]);
        assert_eq!(render_turns(&t, 2000, "\n\n"), "User: hi\n\nAssistant: hello");
    }

    #[test]
    fn test_render_keeps_newest_within_budget() {
        let t = turns(&[
            (Role::User, "first question"),
            (Role::Assistant, "ok"),
            (Role::User, "why"),
        ]);
        // "Assistant: ok" (13) + "\n\n" (2) + "User: why" (9) = 24
        let text = render_turns(&t, 24, "\n\n");
        assert_eq!(text, "Assistant: ok\n\nUser: why");
        assert_eq!(render_turns(&t, 23, "\n\n"), "User: why");
    }

    #[test]
    fn test_render_oversized_newest_turn_yields_empty() {
        let t = turns(&[(Role::User, "short"), (Role::Assistant, "x".repeat(50).as_str())]);
        assert_eq!(render_turns(&t, 20, "\n\n"), "");
    }

    #[test]
    fn test_render_counts_characters_not_bytes() {
        let t = turns(&[(Role::User, "héllo wörld")]);
        // "User: héllo wörld" is 17 characters but 19 bytes.
        assert_eq!(render_turns(&t, 17, "\n"), "User: héllo wörld");
    }

    #[test]
    fn test_append_load_clear() -> Result<()> {
        let dir = tempdir()?;
        let history = ConversationHistory::new(dir.path().join("chat/history.jsonl"));
        assert!(history.load()?.is_empty());

        history.append(Role::User, "How did I sleep?")?;
        history.append(Role::Assistant, "Score 88.")?;
        let loaded = history.load()?;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].role, Role::User);
        assert_eq!(
            history.to_text(2000, DEFAULT_SEPARATOR)?,
            "User: How did I sleep?\n\nAssistant: Score 88."
        );

        history.clear()?;
        assert!(history.load()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_append_rejects_empty() {
        let dir = tempdir().unwrap();
        let history = ConversationHistory::new(dir.path().join("h.jsonl"));
        assert!(history.append(Role::User, "   ").is_err());
    }

    #[test]
    fn test_load_skips_malformed_lines() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("h.jsonl");
        let good = serde_json::to_string(&Turn::new(Role::Assistant, "fine"))?;
        std::fs::write(&path, format!("not json\n\n{}\n{{\"role\":\"robot\"}}\n", good))?;

        let loaded = ConversationHistory::new(&path).load()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "fine");
        Ok(())
    }
}
