//! The bundler seam.
//!
//! Bundling is performed by an external tool, not by this crate. The
//! [`Bundler`] trait is the boundary: the orchestrator submits one
//! [`BundleConfig`] at a time and observes an outcome or an error.
//! [`ExecBundler`] spawns the configured executable per configuration,
//! inheriting stdio so the tool's own diagnostics reach the terminal
//! unwrapped. Tests substitute recording fakes through the same trait.

use crate::error::{Result, TaskError};
use crate::registry::BundleConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The result of running one bundle configuration to completion.
#[derive(Debug, Clone)]
pub struct BundleOutcome {
    /// Path of the primary artifact the bundler was asked to write
    pub output: PathBuf,
    /// Wall time for this configuration
    pub duration: Duration,
}

/// External bundling process, invoked once per configuration.
#[async_trait]
pub trait Bundler: Send + Sync {
    /// Run one configuration, writing its artifacts into `out_dir`.
    async fn bundle(&self, config: &BundleConfig, out_dir: &Path) -> Result<BundleOutcome>;
}

/// Production bundler: spawns an external executable (esbuild by default)
/// with arguments derived from the configuration.
#[derive(Debug, Clone)]
pub struct ExecBundler {
    program: String,
    extra_args: Vec<String>,
}

impl ExecBundler {
    /// Create a bundler that invokes `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append fixed arguments to every invocation (loader flags, defines).
    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Program this bundler invokes.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for one configuration.
    fn args_for(&self, config: &BundleConfig, out_dir: &Path) -> Vec<String> {
        let mut args: Vec<String> = config.entry.clone();
        args.push("--bundle".to_string());
        args.push(format!(
            "--outfile={}",
            out_dir.join(&config.output).display()
        ));
        if config.minify {
            args.push("--minify".to_string());
        }
        if let Some(name) = &config.library {
            args.push("--format=iife".to_string());
            args.push(format!("--global-name={}", name));
        }
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

#[async_trait]
impl Bundler for ExecBundler {
    async fn bundle(&self, config: &BundleConfig, out_dir: &Path) -> Result<BundleOutcome> {
        let start = Instant::now();
        let args = self.args_for(config, out_dir);

        tracing::debug!(program = %self.program, ?args, "spawning bundler");

        let status = tokio::process::Command::new(&self.program)
            .args(&args)
            .status()
            .await
            .map_err(|source| TaskError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(TaskError::Bundle {
                output: config.output.clone(),
                reason: format!("{} exited with {}", self.program, status),
            });
        }

        Ok(BundleOutcome {
            output: out_dir.join(&config.output),
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BundleConfig;

    #[test]
    fn args_for_plain_config() {
        let bundler = ExecBundler::new("esbuild");
        let config = BundleConfig::new(["spec/index.js"], "spec.js");
        let args = bundler.args_for(&config, Path::new("build"));

        assert_eq!(args[0], "spec/index.js");
        assert!(args.contains(&"--bundle".to_string()));
        assert!(args.iter().any(|a| a.starts_with("--outfile=") && a.ends_with("spec.js")));
        assert!(!args.contains(&"--minify".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--global-name")));
    }

    #[test]
    fn args_for_library_config() {
        let bundler = ExecBundler::new("esbuild");
        let config = BundleConfig::new(["lib/ndex.js"], "ndex.min.js")
            .library("Ndex")
            .minify(true);
        let args = bundler.args_for(&config, Path::new("dist"));

        assert!(args.contains(&"--minify".to_string()));
        assert!(args.contains(&"--format=iife".to_string()));
        assert!(args.contains(&"--global-name=Ndex".to_string()));
    }

    #[test]
    fn extra_args_come_last() {
        let bundler =
            ExecBundler::new("esbuild").extra_args(vec!["--loader:.coffee=js".to_string()]);
        let config = BundleConfig::new(["lib/ndex.js"], "ndex.js");
        let args = bundler.args_for(&config, Path::new("dist"));

        assert_eq!(args.last().unwrap(), "--loader:.coffee=js");
    }

    #[tokio::test]
    async fn succeeding_program_yields_outcome() {
        // `true` ignores its arguments and exits 0
        let bundler = ExecBundler::new("true");
        let config = BundleConfig::new(["lib/ndex.js"], "ndex.js");
        let outcome = bundler.bundle(&config, Path::new("dist")).await.unwrap();
        assert!(outcome.output.ends_with("ndex.js"));
    }

    #[tokio::test]
    async fn failing_program_yields_bundle_error() {
        let bundler = ExecBundler::new("false");
        let config = BundleConfig::new(["lib/ndex.js"], "ndex.js");
        let err = bundler.bundle(&config, Path::new("dist")).await.unwrap_err();
        assert!(matches!(err, TaskError::Bundle { .. }));
    }

    #[tokio::test]
    async fn missing_program_yields_spawn_error() {
        let bundler = ExecBundler::new("ndex-tasks-no-such-bundler");
        let config = BundleConfig::new(["lib/ndex.js"], "ndex.js");
        let err = bundler.bundle(&config, Path::new("dist")).await.unwrap_err();
        assert!(matches!(err, TaskError::Spawn { .. }));
    }
}
