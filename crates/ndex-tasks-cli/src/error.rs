//! Error handling for the ndex-tasks CLI.
//!
//! Core task errors pass through transparently; the CLI adds variants for
//! the concerns it owns (server, watcher, arguments). At the binary
//! boundary errors become miette reports so diagnostics render nicely.

use ndex_tasks::TaskError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Errors from the task-runner core (registry, clean, bundling)
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Development server errors
    #[error("Server error: {0}")]
    Server(String),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Directory expected to exist but missing
    #[error("Directory not found: {}\n\nHint: run 'ndex-tasks build' first", .0.display())]
    DirNotFound(PathBuf),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report for terminal rendering.
pub fn into_report(err: CliError) -> miette::Report {
    miette::miette!("{}", err)
}
