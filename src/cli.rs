use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::db::DEFAULT_FILE;

/// Personal task tracker.
/// Runs a terminal menu and an HTTP API side by side over one JSON file.
#[derive(Parser, Debug)]
#[command(name = "tasktracker", version, about = "Personal task tracker with a terminal menu and HTTP API")]
pub struct Cli {
    /// Path to the JSON task file shared by both front ends.
    #[arg(long, env = "TASKTRACKER_FILE", default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Port for the HTTP API.
    #[arg(long, env = "TASKTRACKER_PORT", default_value_t = 9000)]
    pub port: u16,

    /// Where log output is written. The terminal is busy with the menu.
    #[arg(long, default_value = "tasktracker.log")]
    pub log_file: PathBuf,

    /// How long result messages stay on screen, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub flash_ms: u64,
}

impl Cli {
    /// Display time for transient messages.
    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}
