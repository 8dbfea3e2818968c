//! Error types for the task-runner core.
//!
//! Follows the taxonomy of failures the orchestrator can surface:
//! configuration errors (unknown target, malformed registry), clean errors
//! (output directory could not be cleared), and bundle errors (an individual
//! configuration failed). None of these are retried or recovered locally;
//! they propagate to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the task-runner core.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Target name is not present in the registry.
    #[error("Unknown target '{target}'\n\nHint: available targets: {available}")]
    UnknownTarget {
        /// The name that was requested
        target: String,
        /// Comma-separated list of registered target names
        available: String,
    },

    /// Output directory could not be removed or recreated.
    #[error("Failed to clean output directory {}: {source}", .dir.display())]
    Clean {
        /// Directory that was being cleaned
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bundler executable could not be started at all.
    #[error("Failed to spawn bundler '{program}': {source}\n\nHint: is it installed and on PATH?")]
    Spawn {
        /// Program that was being invoked
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// One bundling configuration failed.
    #[error("Bundle '{output}' failed: {reason}")]
    Bundle {
        /// Output filename of the failed configuration
        output: String,
        /// Diagnostic from the underlying tool invocation
        reason: String,
    },

    /// Malformed configuration (empty target, bad config file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors outside the clean step (suite generation, root resolution)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `TaskError` as the default error type.
pub type Result<T, E = TaskError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_target_names_alternatives() {
        let err = TaskError::UnknownTarget {
            target: "prod".to_string(),
            available: "build, dist".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Unknown target 'prod'"));
        assert!(msg.contains("build, dist"));
    }

    #[test]
    fn clean_error_names_directory() {
        let err = TaskError::Clean {
            dir: PathBuf::from("build"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to clean output directory"));
        assert!(msg.contains("build"));
    }

    #[test]
    fn bundle_error_names_output() {
        let err = TaskError::Bundle {
            output: "ndex.min.js".to_string(),
            reason: "exit status: 1".to_string(),
        };
        assert!(err.to_string().contains("ndex.min.js"));
    }
}
