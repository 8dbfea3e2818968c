//! Serve command implementation.
//!
//! Serves an already-built output directory with live reload: the dev
//! server runs in the background while the event loop forwards watcher
//! notifications to connected clients and waits for Ctrl+C.

use crate::cli::ServeArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::serve::{DevServer, OutputWatcher, ReloadEvent, ReloadHub, ServeConfig};
use crate::ui;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;

/// Debounce window for output changes, in milliseconds.
const DEBOUNCE_MS: u64 = 100;

/// Execute the serve command.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let root = utils::resolve_root(args.root)?;
    let dir = root.join(&args.dir);
    if !dir.is_dir() {
        return Err(CliError::DirNotFound(dir));
    }

    serve_and_watch(dir, args.port, args.reload_port).await
}

/// Serve `dir` and broadcast a reload whenever a bundle in it changes.
///
/// Runs until Ctrl+C, or until the server task fails.
pub async fn serve_and_watch(dir: PathBuf, port: u16, reload_port: u16) -> Result<()> {
    let hub = Arc::new(ReloadHub::new());

    let server = DevServer::new(
        ServeConfig {
            port,
            reload_port,
            dir: dir.clone(),
        },
        Arc::clone(&hub),
    );
    let mut server_handle = tokio::spawn(server.start());

    let (watcher, mut change_rx) = OutputWatcher::new(dir.clone(), DEBOUNCE_MS)?;
    ui::info(&format!("Watching for changes in {}", watcher.dir().display()));
    ui::info("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            Some(changed) = change_rx.recv() => {
                let path = changed
                    .strip_prefix(&dir)
                    .unwrap_or(&changed)
                    .display()
                    .to_string();
                ui::info(&format!("Changed: {}", path));
                hub.broadcast(&ReloadEvent::Reload { path }).await;
            }

            _ = signal::ctrl_c() => {
                ui::info("Shutting down");
                break;
            }

            joined = &mut server_handle => {
                return match joined {
                    Ok(Err(e)) => Err(e),
                    Ok(Ok(())) => Ok(()),
                    Err(_) => Err(CliError::Server("Server task aborted".to_string())),
                };
            }
        }
    }

    ui::success("Development server stopped");
    Ok(())
}
