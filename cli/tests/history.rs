//! # PulseBot History Integration Tests
//!
//! File: cli/tests/history.rs
//! Author: Christi Mahu
//!
//! Covers `pulsebot history add`, `show` and `clear`.
//!

mod common;
use common::{read_history, TestEnv};
use predicates::prelude::*;

#[test]
fn test_add_show_clear() {
    let env = TestEnv::new();

    env.cmd_without_token()
        .args(["history", "add", "How did I sleep?"])
        .assert()
        .success()
        .stdout("Recorded User turn.\n");
    env.cmd_without_token()
        .args(["history", "add", "--role", "assistant", "Score 88."])
        .assert()
        .success();

    let raw = read_history(&env.history_file());
    assert_eq!(raw.lines().count(), 2);
    assert!(raw.contains("\"role\":\"assistant\""));

    env.cmd_without_token()
        .args(["history", "show"])
        .assert()
        .success()
        .stdout("User: How did I sleep?\n\nAssistant: Score 88.\n");

    env.cmd_without_token()
        .args(["history", "show", "--max-chars", "15"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No history to show"));

    env.cmd_without_token()
        .args(["history", "clear"])
        .assert()
        .success()
        .stdout("History cleared.\n");
    assert_eq!(read_history(&env.history_file()), "");

    env.cmd_without_token()
        .args(["history", "show"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("No history to show"));
}

#[test]
fn test_show_budget_keeps_newest() {
    let env = TestEnv::new();
    for text in ["one", "two", "three"] {
        env.cmd_without_token()
            .args(["history", "add", text])
            .assert()
            .success();
    }

    // "User: two" (9) + " | " (3) + "User: three" (11) = 23
    env.cmd_without_token()
        .args(["history", "show", "--max-chars", "23", "--separator", " | "])
        .assert()
        .success()
        .stdout("User: two | User: three\n");
}

#[test]
fn test_add_rejects_empty_text() {
    let env = TestEnv::new();
    env.cmd_without_token()
        .args(["history", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty turn"));
}

#[test]
fn test_show_rejects_zero_budget() {
    let env = TestEnv::new();
    env.cmd_without_token()
        .args(["history", "show", "--max-chars", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-chars must be greater than zero"));
}
