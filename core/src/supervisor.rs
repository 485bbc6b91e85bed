use std::convert::Infallible;
use std::future::{Future, pending};
use std::io::Write;
use std::time::Duration;

use deadline_types::CancelCause;

use crate::{CancelToken, Deadline, InterruptSource};

/// Run `op` under a deadline that an operator interrupt can cut short.
///
/// `op` receives a fresh [`CancelToken`]. The token is cancelled when
/// `timeout` elapses or when `interrupts` delivers its first event, whichever
/// comes first; the other source then has no further effect on the token. On
/// an interrupt, `Got signal: <kind>` is written to `notice` before the token
/// is cancelled. Interrupts after the first are logged and ignored.
///
/// The result is whatever `op` returns once it unwinds. `op` is responsible for
/// honoring the token; this function never drops it early.
pub async fn supervise<S, W, F, Fut, T, E>(
    timeout: Duration,
    interrupts: &mut S,
    notice: &mut W,
    op: F,
) -> Result<T, E>
where
    S: InterruptSource,
    W: Write + ?Sized,
    F: FnOnce(CancelToken) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let token = CancelToken::new();
    let deadline = Deadline::after(timeout);
    tracing::debug!(?timeout, "Starting supervised run");

    let run = op(token.clone());
    tokio::pin!(run);
    let watcher = watch(deadline, &token, interrupts, notice);
    tokio::pin!(watcher);

    tokio::select! {
        result = &mut run => result,
        never = &mut watcher => match never {},
    }
}

/// Drive `token` from the deadline and the interrupt source. Never resolves.
async fn watch<S, W>(deadline: Deadline, token: &CancelToken, interrupts: &mut S, notice: &mut W) -> Infallible
where
    S: InterruptSource,
    W: Write + ?Sized,
{
    let mut deadline_armed = true;
    let mut listening = true;
    let mut interrupted = false;

    loop {
        tokio::select! {
            () = deadline.elapsed(), if deadline_armed => {
                deadline_armed = false;
                if token.cancel(CancelCause::Deadline) {
                    tracing::info!("Deadline exceeded; cancelling supervised run");
                }
            }
            event = interrupts.next_interrupt(), if listening => match event {
                Some(event) if interrupted => {
                    tracing::warn!(signal = event.kind.signal_name(), "Interrupt already handled; ignoring");
                }
                Some(event) => {
                    interrupted = true;
                    if let Err(e) = writeln!(notice, "Got signal: {}", event.kind).and_then(|()| notice.flush()) {
                        tracing::warn!("Failed to write interrupt notice: {e}");
                    }
                    if token.cancel(CancelCause::Interrupt(event.kind)) {
                        tracing::info!(signal = event.kind.signal_name(), "Interrupt received; cancelling supervised run");
                    } else {
                        tracing::debug!(signal = event.kind.signal_name(), "Interrupt arrived after cancellation");
                    }
                }
                None => listening = false,
            },
            else => {
                let never: Infallible = pending().await;
                match never {}
            }
        }
    }
}
