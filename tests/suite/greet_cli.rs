//! End-to-end runs of the `greet` binary.

use std::time::{Duration, Instant};

use deadline_core::NAME_PROMPT;
use tempfile::tempdir;

use crate::common::{GREET, feed, finish, spawn};

fn prompt_line() -> String {
    format!("{NAME_PROMPT}\n")
}

#[test]
fn greets_entered_name() {
    let home = tempdir().expect("tempdir");
    let started = Instant::now();
    let mut child = spawn(GREET, &[], home.path());
    drop(feed(&mut child, "John Doe\n"));

    let run = finish(child, started);
    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, format!("{}Hello John Doe\n", prompt_line()));
    assert_eq!(run.stderr, "");
}

#[test]
fn empty_name_is_a_failure() {
    let home = tempdir().expect("tempdir");
    let started = Instant::now();
    let mut child = spawn(GREET, &[], home.path());
    drop(feed(&mut child, ""));

    let run = finish(child, started);
    assert_eq!(run.status.code(), Some(1));
    assert_eq!(run.stdout, prompt_line());
    assert_eq!(run.stderr, "you entered an empty name\n");
}

#[test]
fn silent_user_gets_fallback_after_deadline() {
    let home = tempdir().expect("tempdir");
    let started = Instant::now();
    let mut child = spawn(GREET, &[], home.path());
    // Hold stdin open so the read never completes.
    let stdin = feed(&mut child, "");

    let run = finish(child, started);
    drop(stdin);

    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, format!("{}Hello Default Name\n", prompt_line()));
    assert_eq!(run.stderr, "", "deadline exceeded must not be reported");
    assert!(run.elapsed >= Duration::from_secs(5), "returned early: {:?}", run.elapsed);
    assert!(run.elapsed < Duration::from_secs(9), "overran deadline: {:?}", run.elapsed);
}

#[test]
fn unwritable_log_dir_keeps_output_clean() {
    let home = tempdir().expect("tempdir");
    // A plain file where the log directory should go blocks both candidates.
    std::fs::write(home.path().join(".deadline"), b"").expect("block log dir");
    let started = Instant::now();
    let mut child = spawn(GREET, &[], home.path());
    drop(feed(&mut child, "John Doe\n"));

    let run = finish(child, started);
    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, format!("{}Hello John Doe\n", prompt_line()));
    assert_eq!(run.stderr, "");
}
