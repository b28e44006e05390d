//! File logging.
//!
//! The terminal belongs to the UI, so log lines go to `flurry.log` in the
//! platform data directory.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing::Level;

pub const LOG_FILE_NAME: &str = "flurry.log";

/// Path of the log file, if a data directory is known.
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "flurry").map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Install the global subscriber. Without a data directory nothing is logged.
pub fn init(verbose: bool) -> color_eyre::Result<()> {
    let Some(path) = log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
