//! Ask for a name on stdin, greet it on stdout.
//!
//! The user has five seconds to answer; after that the fallback name is
//! greeted instead. Any other failure (including an empty answer) is printed
//! to stderr with exit status 1.

use std::io::{self, BufReader, Write};
use std::process::ExitCode;

use anyhow::Result;
use deadline_core::{GreetConfig, ask_name, greeting_line};
use deadline_cli::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(&GreetConfig::default()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &GreetConfig) -> Result<()> {
    // The read thread owns stdin; on timeout it stays blocked until the process exits.
    let outcome = ask_name(config, BufReader::new(io::stdin()), io::stdout()).await;
    if outcome.is_timed_out() {
        tracing::info!(fallback = %config.fallback_name, "No name before deadline; using fallback");
    }

    let name = outcome.map(String::from).or_fallback(config.fallback_name.clone())?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(greeting_line(&name).as_bytes())?;
    stdout.flush()?;
    Ok(())
}
