//! Sources of operator interrupts.
//!
//! The supervisor only sees the [`InterruptSource`] capability. Production code
//! installs [`OsInterrupts`]; tests drive a [`ChannelInterrupts`] instead.

use std::future::Future;

use deadline_types::{InterruptEvent, InterruptKind};
use tokio::sync::mpsc;

/// Capability: "tell me about termination requests".
pub trait InterruptSource {
    /// Wait for the next interrupt. `None` means the source is closed and will
    /// never deliver again. Must be cancel-safe.
    fn next_interrupt(&mut self) -> impl Future<Output = Option<InterruptEvent>> + Send;
}

/// A source that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInterrupts;

impl InterruptSource for NoInterrupts {
    async fn next_interrupt(&mut self) -> Option<InterruptEvent> {
        None
    }
}

// ============================================================================
// Channel-backed source
// ============================================================================

/// Sending half paired with a [`ChannelInterrupts`].
#[derive(Debug, Clone)]
pub struct InterruptSender(mpsc::UnboundedSender<InterruptEvent>);

impl InterruptSender {
    /// Deliver `kind` now. Returns `false` if the receiving side is gone.
    pub fn send(&self, kind: InterruptKind) -> bool {
        self.0.send(InterruptEvent::now(kind)).is_ok()
    }
}

/// Interrupts delivered through an in-process channel.
#[derive(Debug)]
pub struct ChannelInterrupts(mpsc::UnboundedReceiver<InterruptEvent>);

impl ChannelInterrupts {
    #[must_use]
    pub fn new() -> (InterruptSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (InterruptSender(tx), Self(rx))
    }
}

impl InterruptSource for ChannelInterrupts {
    async fn next_interrupt(&mut self) -> Option<InterruptEvent> {
        self.0.recv().await
    }
}

// ============================================================================
// OS signals
// ============================================================================

#[cfg(unix)]
mod os {
    use std::future::poll_fn;
    use std::io;
    use std::task::Poll;

    use deadline_types::{InterruptEvent, InterruptKind};
    use tokio::signal::unix::{Signal, SignalKind, signal};

    use super::InterruptSource;

    /// Process signals (SIGINT, SIGTERM) delivered by the OS.
    ///
    /// Installing a listener replaces the default "terminate the process"
    /// disposition for the listed signals for the rest of the process lifetime.
    #[derive(Debug)]
    pub struct OsInterrupts {
        streams: Vec<(InterruptKind, Option<Signal>)>,
    }

    impl OsInterrupts {
        pub fn install(kinds: &[InterruptKind]) -> io::Result<Self> {
            let mut streams: Vec<(InterruptKind, Option<Signal>)> = Vec::with_capacity(kinds.len());
            for &kind in kinds {
                if streams.iter().any(|(installed, _)| *installed == kind) {
                    continue;
                }
                let signal_kind = match kind {
                    InterruptKind::Interrupt => SignalKind::interrupt(),
                    InterruptKind::Terminate => SignalKind::terminate(),
                };
                streams.push((kind, Some(signal(signal_kind)?)));
                tracing::debug!(signal = kind.signal_name(), "Installed signal listener");
            }
            Ok(Self { streams })
        }

        #[cfg(test)]
        pub(super) fn listener_count(&self) -> usize {
            self.streams.len()
        }
    }

    impl InterruptSource for OsInterrupts {
        async fn next_interrupt(&mut self) -> Option<InterruptEvent> {
            poll_fn(|cx| {
                let mut open = false;
                for (kind, slot) in &mut self.streams {
                    let Some(stream) = slot.as_mut() else {
                        continue;
                    };
                    match stream.poll_recv(cx) {
                        Poll::Ready(Some(())) => return Poll::Ready(Some(InterruptEvent::now(*kind))),
                        Poll::Ready(None) => *slot = None,
                        Poll::Pending => open = true,
                    }
                }
                if open { Poll::Pending } else { Poll::Ready(None) }
            })
            .await
        }
    }
}

#[cfg(windows)]
mod os {
    use std::io;

    use deadline_types::{InterruptEvent, InterruptKind};
    use tokio::signal::windows::{CtrlC, ctrl_c};

    use super::InterruptSource;

    /// Console Ctrl-C delivered by the OS. Windows has no SIGTERM equivalent for
    /// console processes, so `Terminate` is accepted and never fires.
    #[derive(Debug)]
    pub struct OsInterrupts {
        ctrl_c: Option<CtrlC>,
    }

    impl OsInterrupts {
        pub fn install(kinds: &[InterruptKind]) -> io::Result<Self> {
            let ctrl_c = if kinds.contains(&InterruptKind::Interrupt) {
                Some(ctrl_c()?)
            } else {
                None
            };
            Ok(Self { ctrl_c })
        }
    }

    impl InterruptSource for OsInterrupts {
        async fn next_interrupt(&mut self) -> Option<InterruptEvent> {
            let stream = self.ctrl_c.as_mut()?;
            stream.recv().await?;
            Some(InterruptEvent::now(InterruptKind::Interrupt))
        }
    }
}

pub use os::OsInterrupts;
