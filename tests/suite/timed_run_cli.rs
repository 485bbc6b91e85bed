//! End-to-end runs of the `timed-run` binary (Unix: needs `sleep` and signals).

use std::thread;
use std::time::{Duration, Instant};

use tempfile::tempdir;

use crate::common::{Finished, TIMED_RUN, finish, spawn};

fn run_with(args: &[&str]) -> Finished {
    let home = tempdir().expect("tempdir");
    let started = Instant::now();
    let child = spawn(TIMED_RUN, args, home.path());
    finish(child, started)
}

fn run_and_signal(args: &[&str], signal: libc::c_int, after: Duration) -> Finished {
    let home = tempdir().expect("tempdir");
    let started = Instant::now();
    let child = spawn(TIMED_RUN, args, home.path());
    thread::sleep(after);
    let pid = i32::try_from(child.id()).expect("pid fits");
    let rc = unsafe { libc::kill(pid, signal) };
    assert_eq!(rc, 0, "failed to signal timed-run");
    finish(child, started)
}

#[test]
fn wrong_arity_prints_usage() {
    for args in [&[][..], &["sleep"][..], &["sleep", "1", "2"][..]] {
        let run = run_with(args);
        assert_eq!(run.status.code(), Some(1));
        assert_eq!(run.stdout, "");
        assert_eq!(run.stderr, format!("Usage: {TIMED_RUN} <command> <argument>\n"));
    }
}

#[test]
fn successful_command_exits_zero() {
    let run = run_with(&["true", "ignored"]);
    assert!(run.status.success(), "stderr: {}", run.stderr);
    assert_eq!(run.stdout, "");
    assert_eq!(run.stderr, "");
}

#[test]
fn failing_command_exits_one() {
    let run = run_with(&["false", "ignored"]);
    assert_eq!(run.status.code(), Some(1));
    assert!(run.stderr.starts_with("`false` failed:"), "stderr: {}", run.stderr);
}

#[test]
fn missing_command_exits_one() {
    let run = run_with(&["definitely-not-a-real-program-xyz", "1"]);
    assert_eq!(run.status.code(), Some(1));
    assert!(
        run.stderr.starts_with("failed to start `definitely-not-a-real-program-xyz`"),
        "stderr: {}",
        run.stderr
    );
}

#[test]
fn deadline_kills_long_command() {
    let run = run_with(&["sleep", "10"]);
    assert_eq!(run.status.code(), Some(1));
    assert_eq!(run.stdout, "");
    assert_eq!(run.stderr, "`sleep` killed: deadline exceeded\n");
    assert!(run.elapsed >= Duration::from_secs(5), "killed early: {:?}", run.elapsed);
    assert!(run.elapsed < Duration::from_secs(9), "kill was late: {:?}", run.elapsed);
}

#[test]
fn sigint_cancels_early_with_notice() {
    let run = run_and_signal(&["sleep", "10"], libc::SIGINT, Duration::from_secs(1));
    assert_eq!(run.status.code(), Some(1));
    assert_eq!(run.stdout, "Got signal: interrupt\n");
    assert_eq!(run.stderr, "`sleep` killed: interrupt\n");
    assert!(run.elapsed < Duration::from_secs(4), "interrupt ignored: {:?}", run.elapsed);
}

#[test]
fn sigterm_cancels_early_with_notice() {
    let run = run_and_signal(&["sleep", "10"], libc::SIGTERM, Duration::from_secs(1));
    assert_eq!(run.status.code(), Some(1));
    assert_eq!(run.stdout, "Got signal: terminated\n");
    assert_eq!(run.stderr, "`sleep` killed: terminated\n");
    assert!(run.elapsed < Duration::from_secs(4), "interrupt ignored: {:?}", run.elapsed);
}
