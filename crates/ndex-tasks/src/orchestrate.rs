//! The target build orchestrator.
//!
//! For one named target: resolve its configurations from the registry, clear
//! the target's output directory, submit every configuration to the bundler
//! concurrently, and aggregate completion. The clean is awaited before
//! fan-out so bundler writes never race with directory deletion. The
//! aggregate resolves only after every submitted bundle has settled; if any
//! failed, the first failure (in completion order) is returned and the rest
//! are logged.
//!
//! No retries, no cancellation: once submitted, a bundle runs to completion
//! or failure, and a failed target may leave the output directory partially
//! populated.

use crate::bundler::{BundleOutcome, Bundler};
use crate::error::{Result, TaskError};
use crate::registry::TargetRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// Aggregate result of building one target.
#[derive(Debug, Clone)]
pub struct TargetSummary {
    /// Target that was built
    pub target: String,
    /// Per-configuration outcomes, in completion order
    pub outcomes: Vec<BundleOutcome>,
    /// Wall time for the whole fan-out
    pub duration: Duration,
}

/// Coordinates clean, concurrent fan-out, and aggregation for build targets.
pub struct Orchestrator {
    registry: TargetRegistry,
    bundler: Arc<dyn Bundler>,
    root: PathBuf,
}

impl Orchestrator {
    /// Create an orchestrator over a registry and a bundler, rooted at the
    /// project directory.
    pub fn new(registry: TargetRegistry, bundler: Arc<dyn Bundler>, root: PathBuf) -> Self {
        Self {
            registry,
            bundler,
            root,
        }
    }

    /// Output directory for a target: a directory literally named after it,
    /// under the project root.
    pub fn out_dir(&self, target: &str) -> PathBuf {
        self.root.join(target)
    }

    /// Build every configuration registered for `target`.
    ///
    /// Fails fast with [`TaskError::UnknownTarget`] before touching the
    /// filesystem if the target is not registered. Otherwise cleans the
    /// output directory, runs all configurations concurrently, and resolves
    /// once all of them have settled.
    pub async fn run(&self, target: &str) -> Result<TargetSummary> {
        let configs = self.registry.resolve(target)?.to_vec();
        let out_dir = self.out_dir(target);

        tracing::info!(target, configs = configs.len(), "building target");

        clean_dir(&out_dir).await?;

        let start = Instant::now();
        let mut set = JoinSet::new();
        for config in configs {
            let bundler = Arc::clone(&self.bundler);
            let out_dir = out_dir.clone();
            set.spawn(async move { bundler.bundle(&config, &out_dir).await });
        }

        let mut outcomes = Vec::new();
        let mut first_err: Option<TaskError> = None;
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok(outcome)) => outcomes.push(outcome),
                Ok(Err(err)) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    } else {
                        tracing::warn!(target, %err, "additional bundle failure");
                    }
                }
                Err(join_err) if join_err.is_panic() => {
                    std::panic::resume_unwind(join_err.into_panic())
                }
                // Tasks are never aborted, so cancellation cannot occur here.
                Err(_) => {}
            }
        }

        if let Some(err) = first_err {
            return Err(err);
        }

        Ok(TargetSummary {
            target: target.to_string(),
            outcomes,
            duration: start.elapsed(),
        })
    }
}

/// Remove the contents of `dir`, creating it if it does not exist.
///
/// The directory itself is kept so concurrently-starting writers always have
/// a destination.
pub async fn clean_dir(dir: &Path) -> Result<()> {
    let clean_err = |source| TaskError::Clean {
        dir: dir.to_path_buf(),
        source,
    };

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return tokio::fs::create_dir_all(dir).await.map_err(clean_err);
        }
        Err(e) => return Err(clean_err(e)),
    };

    while let Some(entry) = entries.next_entry().await.map_err(clean_err)? {
        let path = entry.path();
        let file_type = entry.file_type().await.map_err(clean_err)?;
        if file_type.is_dir() {
            tokio::fs::remove_dir_all(&path).await.map_err(clean_err)?;
        } else {
            tokio::fs::remove_file(&path).await.map_err(clean_err)?;
        }
    }

    Ok(())
}
