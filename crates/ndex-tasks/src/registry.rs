//! Target registry: the static mapping from target names to bundle
//! configurations.
//!
//! The registry is an immutable value constructed once at startup and passed
//! into the orchestrator by reference, never process-wide state. The config
//! file tolerates either a bare configuration or a list per target; that
//! single-or-list shape ([`ConfigSet`]) is normalized to a uniform ordered
//! sequence right here at the registry boundary, so downstream code never
//! sees the ambiguity.

use crate::error::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bundle configuration: an opaque descriptor consumed by the external
/// bundler.
///
/// The orchestrator never interprets these fields; only the bundler adapter
/// turns them into an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Entry modules to bundle
    pub entry: Vec<String>,
    /// Output filename, relative to the target's output directory
    pub output: String,
    /// Global/library export name for distributable bundles (e.g. "Ndex")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    /// Minify the output
    #[serde(default)]
    pub minify: bool,
}

impl BundleConfig {
    /// Create a configuration from entry modules and an output filename.
    pub fn new<I, S>(entry: I, output: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entry: entry.into_iter().map(Into::into).collect(),
            output: output.into(),
            library: None,
            minify: false,
        }
    }

    /// Set the global/library export name.
    pub fn library(mut self, name: impl Into<String>) -> Self {
        self.library = Some(name.into());
        self
    }

    /// Enable or disable minification.
    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }
}

/// A registry entry as written in the config file: either one configuration
/// or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigSet {
    /// A bare single configuration
    One(BundleConfig),
    /// An ordered list of configurations
    Many(Vec<BundleConfig>),
}

impl ConfigSet {
    /// Normalize to a uniform ordered sequence.
    pub fn into_vec(self) -> Vec<BundleConfig> {
        match self {
            ConfigSet::One(config) => vec![config],
            ConfigSet::Many(configs) => configs,
        }
    }
}

impl From<BundleConfig> for ConfigSet {
    fn from(config: BundleConfig) -> Self {
        ConfigSet::One(config)
    }
}

impl From<Vec<BundleConfig>> for ConfigSet {
    fn from(configs: Vec<BundleConfig>) -> Self {
        ConfigSet::Many(configs)
    }
}

/// Immutable mapping from target name to a non-empty ordered sequence of
/// bundle configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRegistry {
    targets: BTreeMap<String, Vec<BundleConfig>>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target, consuming either a bare configuration or a list.
    pub fn register(mut self, name: impl Into<String>, set: impl Into<ConfigSet>) -> Self {
        self.targets.insert(name.into(), set.into().into_vec());
        self
    }

    /// Build a registry from a deserialized target map, validating the
    /// at-least-one-configuration invariant.
    pub fn from_map(map: BTreeMap<String, ConfigSet>) -> Result<Self> {
        let mut targets = BTreeMap::new();
        for (name, set) in map {
            let configs = set.into_vec();
            if configs.is_empty() {
                return Err(TaskError::Config(format!(
                    "target '{}' has no bundle configurations",
                    name
                )));
            }
            for config in &configs {
                if config.entry.is_empty() {
                    return Err(TaskError::Config(format!(
                        "a configuration for target '{}' has no entry modules",
                        name
                    )));
                }
            }
            targets.insert(name, configs);
        }
        Ok(Self { targets })
    }

    /// The default registry for the ndex repository: the spec bundle under
    /// "build" and the distributable library under "dist".
    pub fn defaults() -> Self {
        Self::new()
            .register("build", BundleConfig::new(["spec/index.js"], "spec.js"))
            .register(
                "dist",
                BundleConfig::new(["lib/ndex.js"], "ndex.min.js")
                    .library("Ndex")
                    .minify(true),
            )
    }

    /// Look up a target, or `None` if it is not registered.
    pub fn get(&self, name: &str) -> Option<&[BundleConfig]> {
        self.targets.get(name).map(Vec::as_slice)
    }

    /// Look up a target, failing with a configuration error if absent.
    pub fn resolve(&self, name: &str) -> Result<&[BundleConfig]> {
        self.get(name).ok_or_else(|| TaskError::UnknownTarget {
            target: name.to_string(),
            available: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Registered target names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the registry has no targets.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
