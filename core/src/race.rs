use std::panic::{self, AssertUnwindSafe};
use std::thread;

use deadline_types::{CancelCause, RaceOutcome};
use tokio::sync::oneshot;

use crate::{CancelToken, Deadline};

/// Run a blocking `op` on its own thread and race it against `deadline`.
///
/// The worker reports through a single-slot channel. If the deadline wins, the
/// worker's token is cancelled and [`RaceOutcome::TimedOut`] is returned
/// immediately; the thread is not joined and whatever it produces later is
/// dropped. Operations that can observe the token should stop early, the rest
/// run to completion in the background.
///
/// A deadline that is already due wins even if the worker has also finished:
/// a due deadline never starts `op`, and a result that arrives once the
/// deadline has passed is discarded. A panic inside `op` is resumed on the
/// caller.
pub async fn race_with_deadline<V, E, F>(deadline: Deadline, op: F) -> RaceOutcome<V, E>
where
    F: FnOnce(CancelToken) -> Result<V, E> + Send + 'static,
    V: Send + 'static,
    E: Send + 'static,
{
    let token = CancelToken::new();
    // Timers round up to the next tick, so a due deadline can still be pending
    // on its first poll.
    if deadline.has_expired() {
        return abandon(&token);
    }

    let (tx, rx) = oneshot::channel();

    let worker_token = token.clone();
    thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| op(worker_token)));
        if tx.send(result).is_err() {
            tracing::debug!("Deadline worker finished after the race was decided; result discarded");
        }
    });

    tokio::select! {
        biased;

        () = deadline.elapsed() => abandon(&token),
        reported = rx => match reported {
            Ok(Ok(_)) if deadline.has_expired() => abandon(&token),
            Ok(Ok(result)) => {
                tracing::debug!(ok = result.is_ok(), "Blocking worker finished before deadline");
                RaceOutcome::from_result(result)
            }
            Ok(Err(payload)) => panic::resume_unwind(payload),
            // The worker always sends unless its thread was torn down without unwinding.
            Err(_) => panic::resume_unwind(Box::new("deadline worker exited without reporting")),
        },
    }
}

fn abandon<V, E>(token: &CancelToken) -> RaceOutcome<V, E> {
    token.cancel(CancelCause::Deadline);
    tracing::info!("Deadline exceeded; abandoning blocking worker");
    RaceOutcome::TimedOut
}
