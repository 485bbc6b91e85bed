//! Tracing setup for the binaries.
//!
//! stdout and stderr belong to the programs' own output, so events go to a
//! log file. `RUST_LOG` selects the filter (default `info`).

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_DIR: &str = ".deadline";
const LOG_FILE: &str = "deadline.log";

pub fn init_tracing() {
    let (log_file, init_warnings) = open_log_file();

    // No log file: leave tracing without a subscriber rather than mixing logs
    // into the program output.
    let Some((log_path, file)) = log_file else {
        return;
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(env_filter)
        .try_init();
    if installed.is_err() {
        return;
    }

    tracing::debug!(path = %log_path.display(), "Logging initialized");
    for warning in init_warnings {
        tracing::warn!("{warning}");
    }
}

fn open_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!("Failed to create log dir {}: {e}", parent.display()));
            continue;
        }

        match OpenOptions::new().create(true).append(true).open(&candidate) {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!("Failed to open log file {}: {e}", candidate.display()));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.deadline/logs/deadline.log
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(LOG_DIR).join("logs").join(LOG_FILE));
    }

    // Fallback: ./.deadline/logs/deadline.log
    candidates.push(PathBuf::from(LOG_DIR).join("logs").join(LOG_FILE));

    candidates
}
