//! Deadline races for blocking work and supervised commands.
//!
//! Two entry points share one pattern: an operation competes against a
//! [`Deadline`] and the first to resolve decides the outcome.
//!
//! ```text
//! race_with_deadline(deadline, op)          supervise(timeout, interrupts, notice, op)
//!        |                                          |
//!   worker thread --oneshot--+                 CancelToken <-- deadline timer
//!   deadline timer ----------+-> RaceOutcome        ^------- InterruptSource
//!                                                   |
//!                                              op(token) -> Result
//! ```
//!
//! Both paths hand the operation a [`CancelToken`]. The coordinator cancels it
//! when the deadline wins so a cooperative worker can stop early; the
//! supervisor cancels it on deadline or interrupt and waits for the operation
//! to unwind.

mod cancel;
pub mod config;
mod deadline;
pub mod greeting;
pub mod interrupt;
pub mod process;
mod race;
mod supervisor;

pub use cancel::CancelToken;
pub use config::{GreetConfig, SuperviseConfig};
pub use deadline::Deadline;
pub use greeting::{NAME_PROMPT, NameError, ask_name, greeting_line, read_name};
pub use interrupt::{ChannelInterrupts, InterruptSender, InterruptSource, NoInterrupts, OsInterrupts};
pub use process::{CommandSpec, ExecutionError};
pub use race::race_with_deadline;
pub use supervisor::supervise;

pub use deadline_types::{
    CancelCause, CancelState, DeadlineExceeded, EmptyInputError, InterruptEvent, InterruptKind,
    NonEmptyName, RaceError, RaceOutcome,
};
