use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// Absolute point in time after which an in-flight operation is abandoned.
///
/// Backed by tokio's clock, so paused test time drives it like a real timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(Instant);

impl Deadline {
    /// Deadline `timeout` from now.
    #[must_use]
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        // Saturate instead of overflowing the clock for absurd timeouts.
        let at = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + Duration::from_secs(86_400 * 365 * 30));
        Self(at)
    }

    #[must_use]
    pub fn at(instant: Instant) -> Self {
        Self(instant)
    }

    /// A deadline that has already passed.
    #[must_use]
    pub fn expired() -> Self {
        Self(Instant::now())
    }

    #[must_use]
    pub fn instant(self) -> Instant {
        self.0
    }

    #[must_use]
    pub fn remaining(self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    #[must_use]
    pub fn has_expired(self) -> bool {
        Instant::now() >= self.0
    }

    /// Resolves once the deadline has passed.
    pub async fn elapsed(self) {
        sleep_until(self.0).await;
    }
}
