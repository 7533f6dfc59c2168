//! # tasktracker - personal task tracker
//!
//! Two front ends over one JSON file:
//!
//! - an interactive terminal menu (add, update status, list, filter, delete)
//! - a small HTTP API on port 9000 (`/tasks`, `/add`, `/update`, `/delete`)
//!
//! Both run in the same process. The HTTP server lives on a background thread
//! and is abandoned when the user leaves the menu. Neither front end keeps tasks
//! in memory between operations: every action reads `tasks.json`, changes it
//! and writes it back.
//!
//! ## Quick Start
//!
//! ```bash
//! # Menu in this terminal, API on http://localhost:9000
//! tasktracker
//!
//! # Somewhere else
//! curl -X POST localhost:9000/add -d '{"description":"buy milk"}'
//! curl localhost:9000/tasks
//! curl -X POST 'localhost:9000/delete?id=1'
//! ```
//!
//! Use `--file` and `--port` to point at another task file or port. Logs go to
//! `tasktracker.log`; set `RUST_LOG=debug` to see every request.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

pub mod cli;
pub mod db;
pub mod error;
pub mod fields;
pub mod logging;
pub mod server;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod painter;
    pub mod run;
    pub mod scene;
    pub mod spinner;
}

use cli::Cli;
use db::TaskStore;
use error::AppError;
use server::HttpServer;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_file) {
        eprintln!("Failed to open log file {}: {e}", cli.log_file.display());
    }

    if let Err(e) = run(&cli) {
        error!("Error running task manager: {e}");
        eprintln!("Error running task manager: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let store = Arc::new(TaskStore::new(&cli.file));
    info!(file = %store.path().display(), "using task file");

    // The handle is never shut down: the server goes away with the process.
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let _server = match HttpServer::bind(addr, Arc::clone(&store)).and_then(HttpServer::spawn) {
        Ok(handle) => {
            if let Some(addr) = handle.local_addr() {
                info!("Web server running on http://{addr}");
            }
            Some(handle)
        }
        Err(e) => {
            error!("HTTP front end not started: {e}");
            None
        }
    };

    tui::run::run_tui(store, cli.flash()).map_err(AppError::Terminal)?;
    info!("terminal closed, exiting");
    Ok(())
}
