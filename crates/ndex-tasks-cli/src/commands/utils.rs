//! Shared utilities for command implementations.

use crate::error::{CliError, Result};
use crate::ui;
use ndex_tasks::{Orchestrator, TargetSummary, TasksConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolve the project root: the given directory, or the current one.
pub fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }

    Ok(root)
}

/// Load configuration and run the orchestrator for one target.
pub async fn run_target(root: &Path, target: &str) -> Result<TargetSummary> {
    let config = TasksConfig::load(root)?;
    run_target_with(&config, root, target).await
}

/// Run the orchestrator for one target with an already-loaded configuration.
pub async fn run_target_with(
    config: &TasksConfig,
    root: &Path,
    target: &str,
) -> Result<TargetSummary> {
    let registry = config.registry()?;
    let bundler = Arc::new(config.exec_bundler());

    let orchestrator = Orchestrator::new(registry, bundler, root.to_path_buf());

    ui::info(&format!("Building target '{}'", target));
    let summary = orchestrator.run(target).await?;

    let bundles = summary.outcomes.len();
    ui::success(&format!(
        "Built {} bundle{} for '{}' in {}",
        bundles,
        if bundles == 1 { "" } else { "s" },
        target,
        ui::format_duration(summary.duration)
    ));

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_root_rejects_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("ndex.tasks.json");
        std::fs::write(&file, "{}").unwrap();

        let err = resolve_root(Some(file)).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn resolve_root_accepts_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = resolve_root(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(root, temp.path());
    }
}
