//! Build orchestration for the ndex library.
//!
//! This crate holds the task-runner core: a static [`TargetRegistry`] mapping
//! target names to bundle configurations, an [`Orchestrator`] that cleans a
//! target's output directory and fans the configurations out to an external
//! bundler concurrently, and a [`SuiteManifest`] that regenerates the mocha
//! suite entry point from a declarative module list.
//!
//! The bundler itself is an external tool behind the [`Bundler`] trait;
//! [`ExecBundler`] is the production implementation that spawns it as a child
//! process. Tests inject their own implementations through the same seam.

pub mod bundler;
pub mod config;
pub mod error;
pub mod orchestrate;
pub mod registry;
pub mod suite;

pub use bundler::{BundleOutcome, Bundler, ExecBundler};
pub use config::TasksConfig;
pub use error::{Result, TaskError};
pub use orchestrate::{Orchestrator, TargetSummary};
pub use registry::{BundleConfig, ConfigSet, TargetRegistry};
pub use suite::{SuiteItem, SuiteManifest};
