//! Operator interrupt events.

use std::fmt;
use std::time::Instant;

/// Interrupt kinds a supervised run listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptKind {
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM.
    Terminate,
}

impl InterruptKind {
    /// The kinds a supervised command is cancelled by unless configured otherwise.
    pub const DEFAULT_SET: [InterruptKind; 2] = [InterruptKind::Interrupt, InterruptKind::Terminate];

    /// Conventional signal name (`SIGINT`, `SIGTERM`).
    #[must_use]
    pub const fn signal_name(self) -> &'static str {
        match self {
            InterruptKind::Interrupt => "SIGINT",
            InterruptKind::Terminate => "SIGTERM",
        }
    }

    /// Human-readable description, as printed in the interrupt notice.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            InterruptKind::Interrupt => "interrupt",
            InterruptKind::Terminate => "terminated",
        }
    }
}

impl fmt::Display for InterruptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One delivered interrupt: which signal and when it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptEvent {
    pub kind: InterruptKind,
    pub received_at: Instant,
}

impl InterruptEvent {
    #[must_use]
    pub fn now(kind: InterruptKind) -> Self {
        Self {
            kind,
            received_at: Instant::now(),
        }
    }
}
