//! Race outcomes.

use thiserror::Error;

/// The deadline elapsed before the raced operation reported back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("context deadline exceeded")]
pub struct DeadlineExceeded;

/// Result of racing one operation against one deadline.
///
/// Exactly one variant is produced per race. A late value never upgrades a
/// `TimedOut` outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum RaceOutcome<V, E> {
    Completed(V),
    Failed(E),
    TimedOut,
}

impl<V, E> RaceOutcome<V, E> {
    pub fn from_result(result: Result<V, E>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(err) => Self::Failed(err),
        }
    }

    #[must_use]
    pub fn is_timed_out(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    /// Substitute `fallback` when the deadline won. Operation errors pass through.
    pub fn or_fallback(self, fallback: V) -> Result<V, E> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Failed(err) => Err(err),
            Self::TimedOut => Ok(fallback),
        }
    }

    /// Collapse into a `Result` whose error keeps the two failure kinds apart.
    pub fn into_result(self) -> Result<V, RaceError<E>> {
        match self {
            Self::Completed(value) => Ok(value),
            Self::Failed(err) => Err(RaceError::Operation(err)),
            Self::TimedOut => Err(RaceError::DeadlineExceeded(DeadlineExceeded)),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> RaceOutcome<U, E> {
        match self {
            Self::Completed(value) => RaceOutcome::Completed(f(value)),
            Self::Failed(err) => RaceOutcome::Failed(err),
            Self::TimedOut => RaceOutcome::TimedOut,
        }
    }
}

/// Failure side of a race: either the operation's own error or the deadline.
#[derive(Debug, Error)]
pub enum RaceError<E> {
    #[error(transparent)]
    DeadlineExceeded(DeadlineExceeded),
    #[error(transparent)]
    Operation(E),
}

impl<E> RaceError<E> {
    #[must_use]
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded(_))
    }
}
