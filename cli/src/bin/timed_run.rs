//! Run `<command> <argument>` for at most five seconds.
//!
//! SIGINT or SIGTERM cancels the run early after printing `Got signal: ...`.
//! Any execution failure, including being killed, exits with status 1.

use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use deadline_cli::{CommandLine, init_tracing};
use deadline_core::{OsInterrupts, SuperviseConfig, supervise};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(&SuperviseConfig::default()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &SuperviseConfig) -> Result<()> {
    let command = CommandLine::parse(env::args())?.into_command();
    let mut interrupts =
        OsInterrupts::install(&config.interrupts).context("failed to install signal handlers")?;

    tracing::info!(program = command.program(), args = ?command.args(), "Running command");
    supervise(config.timeout, &mut interrupts, &mut io::stdout(), |token| command.run(token)).await?;
    Ok(())
}
