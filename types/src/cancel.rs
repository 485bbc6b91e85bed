//! Cancellation state shared by every cancellable race.

use std::fmt;

use crate::InterruptKind;

/// Lifecycle of a cancellation token. `Active -> Cancelled` happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CancelState {
    #[default]
    Active,
    Cancelled,
}

/// Which source performed the `Active -> Cancelled` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelCause {
    /// The race deadline elapsed.
    Deadline,
    /// An operator interrupt arrived first.
    Interrupt(InterruptKind),
}

impl fmt::Display for CancelCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelCause::Deadline => f.write_str("deadline exceeded"),
            CancelCause::Interrupt(kind) => write!(f, "{kind}"),
        }
    }
}
