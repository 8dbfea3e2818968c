//! Connected-client registry for the live-reload channel.
//!
//! Tracks SSE subscribers and broadcasts serialized [`ReloadEvent`]s to all
//! of them. Clients whose channel has gone away are pruned during
//! broadcast.

use crate::serve::ReloadEvent;
use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Registry of connected live-reload clients.
#[derive(Default)]
pub struct ReloadHub {
    clients: RwLock<HashMap<usize, mpsc::Sender<String>>>,
    next_id: RwLock<usize>,
}

impl ReloadHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client.
    ///
    /// Returns the client id and the receiving end of its event channel.
    pub fn register(&self) -> (usize, mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = mpsc::channel(64);
        self.clients.write().insert(id, tx);
        (id, rx)
    }

    /// Remove a client from the registry.
    pub fn unregister(&self, id: usize) {
        self.clients.write().remove(&id);
    }

    /// Broadcast an event to every connected client, pruning any whose
    /// receiver has been dropped.
    pub async fn broadcast(&self, event: &ReloadEvent) {
        let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());

        let clients = self.clients.read().clone();
        let mut failed_ids = Vec::new();

        for (id, tx) in clients {
            if tx.send(json.clone()).await.is_err() {
                failed_ids.push(id);
            }
        }

        for id in failed_ids {
            self.unregister(id);
        }
    }

    /// Number of connected clients.
    pub fn client_count(&self) -> usize {
        self.clients.read().len()
    }
}
