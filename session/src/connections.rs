//! Per-game connection table: `player_id -> outbound channel`. Lives
//! inside each `GameHandle` (one table per game), not as a global map
//! keyed on `(game_id, player_id)`, so deleting a game drops its
//! connections for free. Generalized from a single room broadcast
//! channel to a per-player map since the viewer-scoped snapshot differs
//! per player.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::mpsc;

use crate::protocol::ServerEnvelope;

#[derive(Default)]
pub struct ConnectionTable {
    senders: RwLock<HashMap<String, mpsc::UnboundedSender<ServerEnvelope>>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, player_id: String, tx: mpsc::UnboundedSender<ServerEnvelope>) {
        self.senders
            .write()
            .expect("connection table lock poisoned")
            .insert(player_id, tx);
    }

    pub fn remove(&self, player_id: &str) {
        self.senders
            .write()
            .expect("connection table lock poisoned")
            .remove(player_id);
    }

    pub fn player_ids(&self) -> Vec<String> {
        self.senders
            .read()
            .expect("connection table lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Silently drops the message if `player_id` has no live connection
    /// (disconnected, or never connected) — delivery is best-effort, the
    /// viewer-scoped state is always re-sent on the next broadcast.
    pub fn send_to(&self, player_id: &str, envelope: ServerEnvelope) {
        let senders = self.senders.read().expect("connection table lock poisoned");
        if let Some(tx) = senders.get(player_id) {
            let _ = tx.send(envelope);
        }
    }

    pub fn broadcast(&self, build: impl Fn(&str) -> ServerEnvelope) {
        let senders = self.senders.read().expect("connection table lock poisoned");
        for (player_id, tx) in senders.iter() {
            let _ = tx.send(build(player_id));
        }
    }
}
