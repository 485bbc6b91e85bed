//! Shared plumbing for the `greet` and `timed-run` binaries.
//!
//! ```text
//! greet:     init_tracing() -> ask_name(stdin, stdout) -> "Hello <name>"
//! timed-run: init_tracing() -> CommandLine::parse(args) -> supervise(run_command)
//! ```
//!
//! Both binaries keep stdout and stderr for their own output; tracing goes to
//! a log file or nowhere.

pub mod args;
pub mod logging;

pub use args::{CommandLine, UsageError};
pub use logging::init_tracing;
