//! Dist command implementation.
//!
//! Builds the distributable library bundle and exits. No server, no
//! watcher.

use crate::cli::DistArgs;
use crate::commands::utils;
use crate::error::Result;

/// Target name this command is bound to.
const TARGET: &str = "dist";

/// Execute the dist command.
pub async fn execute(args: DistArgs) -> Result<()> {
    let root = utils::resolve_root(args.root)?;
    utils::run_target(&root, TARGET).await?;
    Ok(())
}
