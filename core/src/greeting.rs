//! The name prompt: a blocking line read raced against a deadline.

use std::io::{self, BufRead, Write};

use deadline_types::{CancelCause, EmptyInputError, NonEmptyName, RaceOutcome};
use thiserror::Error;

use crate::{CancelToken, Deadline, GreetConfig, race_with_deadline};

pub const NAME_PROMPT: &str = "Your name please? Press the key Enter when done";

#[derive(Debug, Error)]
pub enum NameError {
    #[error(transparent)]
    Empty(#[from] EmptyInputError),
    #[error("failed to read name: {0}")]
    Io(#[from] io::Error),
    #[error("name prompt cancelled: {0}")]
    Cancelled(CancelCause),
}

impl NameError {
    #[must_use]
    pub fn is_empty_input(&self) -> bool {
        matches!(self, NameError::Empty(_))
    }
}

/// Write the prompt to `output`, then read one line from `input`.
///
/// End of input counts as an empty line. Bytes that are not valid UTF-8 are
/// replaced rather than rejected.
pub fn read_name<R, W>(input: &mut R, output: &mut W) -> Result<NonEmptyName, NameError>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    writeln!(output, "{NAME_PROMPT}")?;
    output.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(NonEmptyName::from_line(&String::from_utf8_lossy(&line))?)
}

/// Ask for a name, giving up after `config.timeout`.
///
/// The read runs on a dedicated thread that owns `input` and `output`. On
/// timeout that thread is left blocked on `input`.
///
/// The prompt is written exactly once only if the worker starts before the
/// deadline. A deadline that is already due, or one that fires before the
/// thread gets scheduled, leaves `output` untouched.
pub async fn ask_name<R, W>(config: &GreetConfig, input: R, output: W) -> RaceOutcome<NonEmptyName, NameError>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let deadline = Deadline::after(config.timeout);
    race_with_deadline(deadline, move |token: CancelToken| {
        let (mut input, mut output) = (input, output);
        if let Some(cause) = token.cause() {
            return Err(NameError::Cancelled(cause));
        }
        read_name(&mut input, &mut output)
    })
    .await
}

/// The line printed once a name is settled.
#[must_use]
pub fn greeting_line(name: &str) -> String {
    format!("Hello {name}\n")
}
