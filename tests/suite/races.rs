//! Library-level races through the public `deadline_core` API.

use std::thread;
use std::time::{Duration, Instant};

use tokio::time::sleep;

use deadline_core::{
    CancelCause, CancelToken, ChannelInterrupts, CommandSpec, Deadline, ExecutionError, InterruptKind,
    NoInterrupts, RaceOutcome, race_with_deadline, supervise,
};

fn sleeper(duration: Duration) -> impl FnOnce(CancelToken) -> Result<u64, ()> + Send {
    move |_| {
        thread::sleep(duration);
        Ok(42)
    }
}

#[tokio::test]
async fn deadline_ordering_decides_the_outcome() {
    let op = Duration::from_millis(120);

    let d1 = Deadline::after(Duration::from_millis(40));
    assert_eq!(race_with_deadline(d1, sleeper(op)).await, RaceOutcome::TimedOut);

    let d3 = Deadline::after(Duration::from_secs(3));
    assert_eq!(race_with_deadline(d3, sleeper(op)).await, RaceOutcome::Completed(42));
}

#[tokio::test]
async fn timed_out_race_resolves_to_fallback_and_deadline_kind() {
    let outcome = race_with_deadline(Deadline::after(Duration::from_millis(50)), sleeper(Duration::from_millis(300))).await;
    assert_eq!(outcome.clone().or_fallback(7), Ok(7));
    let err = outcome.into_result().unwrap_err();
    assert!(err.is_deadline_exceeded());
}

#[cfg(unix)]
#[tokio::test]
async fn supervised_command_stops_on_interrupt() {
    let (sender, mut interrupts) = ChannelInterrupts::new();
    tokio::spawn(async move {
        sleep(Duration::from_millis(200)).await;
        sender.send(InterruptKind::Interrupt);
    });

    let mut notice = Vec::new();
    let started = Instant::now();
    let result = supervise(Duration::from_secs(5), &mut interrupts, &mut notice, |token| {
        CommandSpec::new("sleep", ["10"]).run(token)
    })
    .await;

    match result {
        Err(ExecutionError::Cancelled { program, cause }) => {
            assert_eq!(program, "sleep");
            assert_eq!(cause, CancelCause::Interrupt(InterruptKind::Interrupt));
        }
        other => panic!("expected cancellation, got {other:?}"),
    }
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(String::from_utf8(notice).unwrap(), "Got signal: interrupt\n");
}

#[cfg(unix)]
#[tokio::test]
async fn supervised_command_finishing_in_time_succeeds() {
    let mut notice = Vec::new();
    let result = supervise(Duration::from_secs(5), &mut NoInterrupts, &mut notice, |token| {
        CommandSpec::new("sleep", ["0"]).run(token)
    })
    .await;
    assert!(result.is_ok(), "{result:?}");
    assert!(notice.is_empty());
}
