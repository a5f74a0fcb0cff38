//! Connection registry.
//!
//! The registry is the single owner of live websocket connections: the
//! online count is a size query over it, public events iterate it, and
//! private events filter it by joined user. It owns its own lock; no
//! other component shares connection state.

use axum::extract::ws::Message;
use casedrop_types::UserId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

pub type ConnId = u64;

struct Connection {
    sender: mpsc::UnboundedSender<Message>,
    /// Private room binding, set by a `join` message.
    user: Option<UserId>,
}

#[derive(Default)]
pub struct ConnectionRegistry {
    next_id: AtomicU64,
    connections: Mutex<HashMap<ConnId, Connection>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, sender: mpsc::UnboundedSender<Message>) -> ConnId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections
            .lock()
            .unwrap()
            .insert(id, Connection { sender, user: None });
        id
    }

    pub fn deregister(&self, id: ConnId) {
        self.connections.lock().unwrap().remove(&id);
    }

    /// Bind a connection to a user's private room. A later join replaces
    /// the earlier binding.
    pub fn join(&self, id: ConnId, user: UserId) {
        if let Some(connection) = self.connections.lock().unwrap().get_mut(&id) {
            connection.user = Some(user);
        }
    }

    pub fn online_count(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    /// Deliver to every connection. At-most-once: send failures mean the
    /// socket is already going away and are ignored.
    pub fn send_to_all(&self, text: &str) {
        let connections = self.connections.lock().unwrap();
        for connection in connections.values() {
            let _ = connection.sender.send(Message::Text(text.to_string()));
        }
    }

    /// Deliver only to connections joined to `user`'s room. Silently a
    /// no-op when the user has no live connection.
    pub fn send_to_user(&self, user: &UserId, text: &str) {
        let connections = self.connections.lock().unwrap();
        for connection in connections.values() {
            if connection.user.as_ref() == Some(user) {
                let _ = connection.sender.send(Message::Text(text.to_string()));
            }
        }
    }
}
