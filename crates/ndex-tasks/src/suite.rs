//! Suite aggregator: generates the mocha suite entry point.
//!
//! The spec bundle is built from a single entry file that requires every
//! test module in a fixed order, with the adapter specs grouped under one
//! `describe` block. [`SuiteManifest`] is the declarative form of that file;
//! rendering it reproduces the entry point byte for byte so the build
//! command can regenerate `spec/index.js` before bundling.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One item of the suite: a bare module or a named group of modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SuiteItem {
    /// A top-level test module, required directly
    Module(String),
    /// A named group rendered as a `describe` block
    Group {
        /// Section name passed to `describe`
        name: String,
        /// Modules required inside the block
        modules: Vec<String>,
    },
}

/// Ordered list of suite items, rendered to a JavaScript entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuiteManifest {
    items: Vec<SuiteItem>,
}

impl SuiteManifest {
    /// Create a manifest from an ordered list of items.
    pub fn new(items: Vec<SuiteItem>) -> Self {
        Self { items }
    }

    /// The ndex suite: the core spec, the three adapter specs grouped under
    /// "Adapters", and the connection spec.
    pub fn defaults() -> Self {
        Self::new(vec![
            SuiteItem::Module("./ndex_spec.coffee".to_string()),
            SuiteItem::Group {
                name: "Adapters".to_string(),
                modules: vec![
                    "./ndex/adapter_spec.coffee".to_string(),
                    "./ndex/adapters/browser_adapter_spec.coffee".to_string(),
                    "./ndex/adapters/worker_adapter_spec.coffee".to_string(),
                ],
            },
            SuiteItem::Module("./ndex/connection_spec.coffee".to_string()),
        ])
    }

    /// Items in declaration order.
    pub fn items(&self) -> &[SuiteItem] {
        &self.items
    }

    /// Render the suite entry point source.
    pub fn render(&self) -> String {
        let mut blocks = Vec::with_capacity(self.items.len());
        for item in &self.items {
            match item {
                SuiteItem::Module(module) => blocks.push(format!("require('{}')", module)),
                SuiteItem::Group { name, modules } => {
                    let mut block = format!("describe('{}', function() {{\n", name);
                    for module in modules {
                        block.push_str(&format!("  require('{}')\n", module));
                    }
                    block.push_str("})");
                    blocks.push(block);
                }
            }
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    /// Write the rendered entry point to `path`, creating parent directories.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.render()).await?;
        Ok(())
    }
}

impl Default for SuiteManifest {
    fn default() -> Self {
        Self::defaults()
    }
}
