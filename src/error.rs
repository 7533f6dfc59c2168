//! Error types for the task tracker.

use std::io;
use std::net::SocketAddr;

/// Failure while persisting the task file.
///
/// These never leave the store: `TaskStore::save` logs and drops them.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Encoding the collection failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Startup and front-end failures surfaced to the operator.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The terminal could not be initialised or drawn to.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// The HTTP listener could not be bound.
    #[error("cannot listen on {addr}: {reason}")]
    Bind { addr: SocketAddr, reason: String },

    /// The HTTP thread could not be started.
    #[error("cannot start HTTP thread: {0}")]
    Spawn(#[source] io::Error),
}
