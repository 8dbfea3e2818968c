//! Output watcher with debouncing.
//!
//! Watches the built output directory and forwards changes to emitted
//! JavaScript bundles over a channel; everything else (source maps, stray
//! editor files) is filtered out. Debouncing collapses the bursts of
//! events bundlers produce while writing a file.

use crate::error::{CliError, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Watches a built output directory for changed bundles.
///
/// The underlying watcher stops when this value is dropped, so keep it
/// alive for the lifetime of the event loop.
pub struct OutputWatcher {
    _watcher: RecommendedWatcher,
    dir: PathBuf,
}

impl OutputWatcher {
    /// Watch `dir`, forwarding changed bundle paths over the returned
    /// channel. Events for the same file within the debounce window are
    /// collapsed.
    pub fn new(dir: PathBuf, debounce_ms: u64) -> Result<(Self, mpsc::Receiver<PathBuf>)> {
        if !dir.is_dir() {
            return Err(CliError::DirNotFound(dir));
        }

        let (tx, rx) = mpsc::channel(64);

        let mut debounce = Debounce::new(Duration::from_millis(debounce_ms));

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(_) => return,
            };

            if !matches!(
                event.kind,
                notify::EventKind::Create(_) | notify::EventKind::Modify(_)
            ) {
                return;
            }

            for path in &event.paths {
                if !is_bundle(path) {
                    continue;
                }

                if !debounce.allow(path, Instant::now()) {
                    continue;
                }

                let _ = tx.blocking_send(path.clone());
            }
        })
        .map_err(CliError::Watch)?;

        watcher
            .watch(&dir, RecursiveMode::Recursive)
            .map_err(CliError::Watch)?;

        Ok((Self { _watcher: watcher, dir }, rx))
    }

    /// Directory being watched.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Per-path debounce window. Interleaved events for different bundles are
/// tracked independently, so a burst on one file never resets another's
/// window.
struct Debounce {
    window: Duration,
    last_emit: HashMap<PathBuf, Instant>,
}

impl Debounce {
    fn new(window: Duration) -> Self {
        Self {
            window,
            last_emit: HashMap::new(),
        }
    }

    /// Whether an event for `path` at `now` should be forwarded.
    fn allow(&mut self, path: &Path, now: Instant) -> bool {
        if let Some(last) = self.last_emit.get(path) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }
        self.last_emit.insert(path.to_path_buf(), now);
        true
    }
}

/// Only emitted JavaScript bundles trigger reloads.
fn is_bundle(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("js")
}
