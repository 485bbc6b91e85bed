//! Core domain types for deadline races.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the workspace.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod cancel;
mod interrupt;
mod outcome;

pub use cancel::{CancelCause, CancelState};
pub use interrupt::{InterruptEvent, InterruptKind};
pub use outcome::{DeadlineExceeded, RaceError, RaceOutcome};

use std::fmt;
use std::ops::Deref;

use thiserror::Error;

// ============================================================================
// NonEmpty Name
// ============================================================================

/// A line of user input guaranteed to be non-empty.
///
/// Only the line terminator is stripped before the check; a line made of
/// spaces is still a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyName(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("you entered an empty name")]
pub struct EmptyInputError;

impl NonEmptyName {
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyInputError> {
        let value = value.into();
        if value.is_empty() {
            Err(EmptyInputError)
        } else {
            Ok(Self(value))
        }
    }

    /// Build a name from a raw line, dropping a trailing `\n` or `\r\n`.
    pub fn from_line(line: &str) -> Result<Self, EmptyInputError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Self::new(line)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NonEmptyName {
    type Error = EmptyInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for NonEmptyName {
    type Error = EmptyInputError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyName> for String {
    fn from(value: NonEmptyName) -> Self {
        value.0
    }
}

impl Deref for NonEmptyName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
