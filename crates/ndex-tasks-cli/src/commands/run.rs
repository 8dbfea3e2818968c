//! Run command implementation.
//!
//! Builds an arbitrary registered target by name. Unknown targets fail
//! with a configuration error before anything touches the filesystem.

use crate::cli::RunArgs;
use crate::commands::utils;
use crate::error::Result;

/// Execute the run command.
pub async fn execute(args: RunArgs) -> Result<()> {
    let root = utils::resolve_root(args.root)?;
    utils::run_target(&root, &args.target).await?;
    Ok(())
}
