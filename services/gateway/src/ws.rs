//! WebSocket endpoint: public feed and private rooms.
//!
//! Every connection receives the public feed. A client that wants its
//! account pushes sends `{"type": "join", "userId": "..."}` to bind the
//! connection to its private room. The online count is announced to
//! everyone whenever a connection comes or goes.

use crate::registry::ConnectionRegistry;
use crate::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State as AxumState;
use axum::response::IntoResponse;
use casedrop_engine::RealtimeBroadcaster;
use casedrop_types::{AccountUpdateEvent, CaseOpenedEvent, UserId};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum InboundMessage {
    #[serde(rename = "join")]
    Join {
        #[serde(rename = "userId")]
        user_id: UserId,
    },
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type")]
pub enum OutboundEvent {
    #[serde(rename = "caseOpened")]
    CaseOpened { payload: CaseOpenedEvent },
    #[serde(rename = "userDataUpdated")]
    UserDataUpdated { payload: AccountUpdateEvent },
    #[serde(rename = "onlineUsers")]
    OnlineUsers { count: usize },
}

/// Engine-facing broadcaster that fans out over the registry.
#[derive(Clone)]
pub struct WsBroadcaster {
    registry: Arc<ConnectionRegistry>,
}

impl WsBroadcaster {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }
}

impl RealtimeBroadcaster for WsBroadcaster {
    fn publish_outcome(&self, event: &CaseOpenedEvent) {
        match serde_json::to_string(&OutboundEvent::CaseOpened {
            payload: event.clone(),
        }) {
            Ok(text) => self.registry.send_to_all(&text),
            Err(err) => warn!(?err, "failed to encode caseOpened event"),
        }
    }

    fn publish_account_update(&self, user: &UserId, event: &AccountUpdateEvent) {
        match serde_json::to_string(&OutboundEvent::UserDataUpdated { payload: *event }) {
            Ok(text) => self.registry.send_to_user(user, &text),
            Err(err) => warn!(?err, "failed to encode userDataUpdated event"),
        }
    }
}

fn announce_online_count(registry: &ConnectionRegistry) {
    let event = OutboundEvent::OnlineUsers {
        count: registry.online_count(),
    };
    if let Ok(text) = serde_json::to_string(&event) {
        registry.send_to_all(&text);
    }
}

pub(crate) async fn ws_handler(
    AxumState(state): AxumState<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state.registry))
}

async fn handle_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    let conn_id = registry.register(tx);
    announce_online_count(&registry);

    let write_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = receiver.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<InboundMessage>(&text) {
                Ok(InboundMessage::Join { user_id }) => {
                    registry.join(conn_id, user_id);
                }
                Err(err) => {
                    warn!(?err, "invalid inbound message");
                }
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    registry.deregister(conn_id);
    announce_online_count(&registry);
    write_task.abort();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_events_are_tagged() {
        let event = OutboundEvent::OnlineUsers { count: 3 };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "onlineUsers");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_join_message_parses() {
        let inbound: InboundMessage =
            serde_json::from_str(r#"{"type": "join", "userId": "player-1"}"#).unwrap();
        let InboundMessage::Join { user_id } = inbound;
        assert_eq!(user_id, UserId::from("player-1"));
    }
}
