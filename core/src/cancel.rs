use std::sync::{Arc, OnceLock};

use deadline_types::{CancelCause, CancelState};
use tokio_util::sync::CancellationToken;

/// Single-use broadcast cancellation signal for one race.
///
/// Clones share state. The first [`cancel`](Self::cancel) records its cause and
/// wakes every waiter; later calls are no-ops and report `false`.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: CancellationToken,
    cause: Arc<OnceLock<CancelCause>>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trigger cancellation. Returns `true` only for the call that performed
    /// the `Active -> Cancelled` transition.
    pub fn cancel(&self, cause: CancelCause) -> bool {
        // The cause is published before waiters are woken, so anyone returning
        // from `cancelled()` can read it.
        if self.cause.set(cause).is_err() {
            return false;
        }
        self.inner.cancel();
        true
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cause.get().is_some()
    }

    #[must_use]
    pub fn state(&self) -> CancelState {
        if self.is_cancelled() {
            CancelState::Cancelled
        } else {
            CancelState::Active
        }
    }

    /// The source that won, once cancelled.
    #[must_use]
    pub fn cause(&self) -> Option<CancelCause> {
        self.cause.get().copied()
    }

    /// Resolves once the token is cancelled. Cancel-safe.
    pub async fn cancelled(&self) {
        self.inner.cancelled().await;
    }
}
