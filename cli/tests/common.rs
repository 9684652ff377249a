//! # PulseBot CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. `TestEnv` gives
//! each test an isolated home, working directory, prompts directory and
//! history file so the user's real configuration is never read.
//!

// Each test crate uses a different subset of these helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get PulseBot Command (`pulsebot_cmd`)
///
/// ## Panics
/// Panics if the `pulsebot` binary cannot be found via `Command::cargo_bin`.
pub fn pulsebot_cmd() -> Command {
    Command::cargo_bin("pulsebot").expect("Failed to find pulsebot binary for testing")
}

/// An isolated environment for one test.
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("home")).expect("Failed to create home");
        fs::create_dir_all(root.path().join("work")).expect("Failed to create work dir");
        fs::create_dir_all(root.path().join("prompts")).expect("Failed to create prompts dir");
        Self { root }
    }

    pub fn prompts_dir(&self) -> PathBuf {
        self.root.path().join("prompts")
    }

    pub fn history_file(&self) -> PathBuf {
        self.root.path().join("history.jsonl")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn write_prompt(&self, name: &str, content: &str) {
        let path = self.prompts_dir().join(format!("{}.tera", name));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create prompt parent");
        }
        fs::write(path, content).expect("Failed to write prompt");
    }

    /// A `pulsebot` command with no provider credential configured.
    pub fn cmd_without_token(&self) -> Command {
        let home = self.root.path().join("home");
        let mut cmd = pulsebot_cmd();
        cmd.current_dir(self.work_dir())
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("XDG_DATA_HOME", home.join(".local/share"))
            .env("PULSEBOT_PROMPTS_DIR", self.prompts_dir())
            .env("PULSEBOT_HISTORY_FILE", self.history_file())
            .env_remove("SECRET_OURA_API_KEY")
            .env_remove("PULSEBOT_API_BASE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// A `pulsebot` command talking to `api_base` with a test credential.
    pub fn cmd(&self, api_base: &str) -> Command {
        let mut cmd = self.cmd_without_token();
        cmd.env("SECRET_OURA_API_KEY", "test-token")
            .env("PULSEBOT_API_BASE", api_base);
        cmd
    }
}

/// Base URL that refuses connections.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:1";

pub fn read_history(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}
