use thiserror::Error;

use deadline_core::CommandSpec;

/// Malformed invocation. Displays as the usage line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Usage: {program} <command> <argument>")]
pub struct UsageError {
    pub program: String,
}

/// `timed-run <command> <argument>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    pub argument: String,
}

impl CommandLine {
    /// Parse `argv`, including the program name in position zero.
    pub fn parse<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "timed-run".to_string());
        let rest: Vec<String> = args.collect();
        match <[String; 2]>::try_from(rest) {
            Ok([command, argument]) => Ok(Self { command, argument }),
            Err(_) => Err(UsageError { program }),
        }
    }

    #[must_use]
    pub fn into_command(self) -> CommandSpec {
        CommandSpec::new(self.command, [self.argument])
    }
}
