//! Video Call Signaling Stub
//! Mission: Broadcast-to-everyone relay over websockets
//!
//! Deliberately a stub: every connected client sees every message, with
//! the room id carried only in the message text. The registry is created
//! at server start and injected through `AppState`, never a module-level
//! singleton.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::debug;

use crate::state::AppState;

/// Live set of open signaling channels for this process, backed by a
/// broadcast channel: one sender, one receiver per connected socket.
#[derive(Clone)]
pub struct SignalingRegistry {
    tx: broadcast::Sender<String>,
}

impl SignalingRegistry {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Send to every connected client. A send error only means nobody is
    /// listening, which is fine.
    pub fn broadcast(&self, message: String) {
        let _ = self.tx.send(message);
    }

    pub fn connection_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// GET /ws/video-call/:room_id
pub async fn video_call_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let registry = state.signaling.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, room_id, registry))
}

async fn handle_socket(socket: WebSocket, room_id: String, registry: SignalingRegistry) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = registry.subscribe();

    debug!("Signaling client joined room {room_id}");
    registry.broadcast(format!("A new user joined the call in room {room_id}"));

    loop {
        tokio::select! {
            // Relay broadcasts to this client
            Ok(message) = rx.recv() => {
                if sender.send(Message::Text(message)).await.is_err() {
                    break;
                }
            }
            // Rebroadcast whatever this client sends
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        registry.broadcast(format!("Message received in room {room_id}: {text}"));
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    debug!("Signaling client left room {room_id}");
    registry.broadcast(format!("A user left the call in room {room_id}"));
}
