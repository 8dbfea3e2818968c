//! Task-runner configuration.
//!
//! Loaded from `ndex.tasks.json` at the project root, overridden by
//! `NDEX_`-prefixed environment variables, with built-in defaults that
//! mirror the original ndex build wiring. Priority: environment > config
//! file > defaults.

use crate::bundler::ExecBundler;
use crate::error::{Result, TaskError};
use crate::registry::{BundleConfig, ConfigSet, TargetRegistry};
use crate::suite::SuiteManifest;
use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Config file name looked up in the project root.
pub const CONFIG_FILE: &str = "ndex.tasks.json";

/// Deserialized task-runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Bundler executable to invoke
    pub bundler: String,

    /// Fixed arguments appended to every bundler invocation
    #[serde(default)]
    pub bundler_args: Vec<String>,

    /// Target name -> one configuration or an ordered list
    pub targets: BTreeMap<String, ConfigSet>,

    /// Suite entry layout; the built-in ndex suite when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<SuiteManifest>,
}

impl TasksConfig {
    /// Load configuration for a project root.
    pub fn load(root: &Path) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default_config()));

        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            figment = figment.merge(Json::file(config_path));
        }

        figment = figment.merge(Env::prefixed("NDEX_"));

        figment
            .extract()
            .map_err(|e| TaskError::Config(format!("invalid {}: {}", CONFIG_FILE, e)))
    }

    /// Built-in defaults mirroring the original webpack targets.
    pub(crate) fn default_config() -> Self {
        let mut targets = BTreeMap::new();
        targets.insert(
            "build".to_string(),
            ConfigSet::One(BundleConfig::new(["spec/index.js"], "spec.js")),
        );
        targets.insert(
            "dist".to_string(),
            ConfigSet::One(
                BundleConfig::new(["lib/ndex.js"], "ndex.min.js")
                    .library("Ndex")
                    .minify(true),
            ),
        );
        Self {
            bundler: "esbuild".to_string(),
            bundler_args: Vec::new(),
            targets,
            suite: None,
        }
    }

    /// Normalized, validated target registry.
    pub fn registry(&self) -> Result<TargetRegistry> {
        TargetRegistry::from_map(self.targets.clone())
    }

    /// Bundler configured by this file.
    pub fn exec_bundler(&self) -> ExecBundler {
        ExecBundler::new(&self.bundler).extra_args(self.bundler_args.clone())
    }

    /// Suite manifest, falling back to the built-in ndex suite.
    pub fn suite_manifest(&self) -> SuiteManifest {
        self.suite.clone().unwrap_or_default()
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_a_config_file() {
        figment::Jail::expect_with(|jail| {
            let config = TasksConfig::load(jail.directory()).expect("load");
            assert_eq!(config.bundler, "esbuild");

            let registry = config.registry().expect("registry");
            assert!(registry.get("build").is_some());
            assert!(registry.get("dist").is_some());
            Ok(())
        });
    }

    #[test]
    fn config_file_overrides_bundler_and_keeps_default_targets() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, r#"{"bundler": "webpack"}"#)?;

            let config = TasksConfig::load(jail.directory()).expect("load");
            assert_eq!(config.bundler, "webpack");
            assert_eq!(config.registry().expect("registry").len(), 2);
            Ok(())
        });
    }

    #[test]
    fn config_file_targets_merge_over_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"{
                    "targets": {
                        "build": [
                            {"entry": ["spec/index.js"], "output": "spec.js"},
                            {"entry": ["demos/index.js"], "output": "demos.js"}
                        ]
                    }
                }"#,
            )?;

            let config = TasksConfig::load(jail.directory()).expect("load");
            let registry = config.registry().expect("registry");
            assert_eq!(registry.resolve("build").expect("build").len(), 2);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_bundler() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("NDEX_BUNDLER", "rollup");

            let config = TasksConfig::load(jail.directory()).expect("load");
            assert_eq!(config.bundler, "rollup");
            Ok(())
        });
    }

    #[test]
    fn malformed_config_is_a_configuration_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, r#"{"targets": {"build": []}}"#)?;

            let config = TasksConfig::load(jail.directory()).expect("load");
            let err = config.registry().expect_err("empty target must fail");
            assert!(matches!(err, TaskError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn suite_manifest_falls_back_to_defaults() {
        let config = TasksConfig::default();
        let manifest = config.suite_manifest();
        assert_eq!(manifest.items().len(), 3);
    }
}
