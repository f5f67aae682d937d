//! Logger setup
//!
//! The interactive UI owns the terminal, so it logs to a file. Plain
//! commands log to stderr. `RUST_LOG` overrides the verbosity flags.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// `<data-local-dir>/appsweep/appsweep.log`
pub fn default_log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "appsweep").map(|dirs| dirs.data_local_dir().join("appsweep.log"))
}

/// Filter for `-v` repeated `verbosity` times.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbosity: u8, target: &LogTarget) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(level_for(verbosity)));
    builder.format_timestamp_secs();

    if let LogTarget::File(path) = target {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // A logger may already be installed (tests, embedding); keep it.
    let _ = builder.try_init();
    Ok(())
}
