//! Build command implementation.
//!
//! The development entry point: regenerate the suite entry file, build
//! every configuration under the "build" target, then serve the output
//! directory with live reload and watch the emitted bundles until Ctrl+C.
//! `--no-serve` stops after the build, for CI.

use crate::cli::BuildArgs;
use crate::commands::{serve, utils};
use crate::error::Result;
use crate::ui;
use ndex_tasks::TasksConfig;

/// Target name this command is bound to.
const TARGET: &str = "build";

/// Execute the build command.
pub async fn execute(args: BuildArgs) -> Result<()> {
    let root = utils::resolve_root(args.root)?;
    let config = TasksConfig::load(&root)?;

    // The spec bundle's entry point is generated, not hand-maintained.
    let spec_dir = root.join("spec");
    if spec_dir.is_dir() {
        let manifest = config.suite_manifest();
        manifest.write_to(&spec_dir.join("index.js")).await?;
        ui::info("Regenerated spec/index.js");
    }

    utils::run_target_with(&config, &root, TARGET).await?;

    if args.no_serve {
        return Ok(());
    }

    serve::serve_and_watch(root.join(TARGET), args.port, args.reload_port).await
}
