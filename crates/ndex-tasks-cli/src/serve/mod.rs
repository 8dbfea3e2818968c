//! Development server module.
//!
//! Serves the built output directory over HTTP on one port and exposes the
//! live-reload channel (SSE plus the reload client script) on a second
//! port, mirroring the classic livereload split. The output watcher feeds
//! change notifications into the reload hub, which broadcasts them to
//! connected clients.

pub mod hub;
pub mod server;
pub mod watcher;

pub use hub::ReloadHub;
pub use server::{DevServer, ServeConfig};
pub use watcher::OutputWatcher;

use serde::{Deserialize, Serialize};

/// Events pushed over the live-reload channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReloadEvent {
    /// A watched bundle changed; clients should refresh
    Reload {
        /// Path of the changed artifact, relative to the served directory
        path: String,
    },

    /// A client connected to the channel
    ClientConnected { id: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&ReloadEvent::Reload {
            path: "spec.js".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"reload""#));
        assert!(json.contains(r#""path":"spec.js""#));
    }

    #[test]
    fn client_connected_serializes_with_id() {
        let json = serde_json::to_string(&ReloadEvent::ClientConnected { id: 3 }).unwrap();
        assert!(json.contains(r#""type":"client_connected""#));
        assert!(json.contains(r#""id":3"#));
    }
}
