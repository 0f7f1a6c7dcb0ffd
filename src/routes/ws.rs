//! WebSocket handler — bidirectional event relay.
//!
//! DESIGN
//! ======
//! On upgrade, generates a connection id and enters a `select!` loop:
//! - Incoming client events → parse + dispatch by event tag
//! - Broadcast events from room peers → forward to the client
//!
//! Dispatch returns the events destined for the sender; peer delivery goes
//! through `services::room::broadcast`. Join replies go to the requester
//! only; draw broadcasts exclude the committer; undo/redo broadcasts reach
//! the whole room, requester included, through the requester's own channel.
//!
//! ERROR HANDLING
//! ==============
//! Unparseable inbound frames (including a `draw` whose elements payload is
//! not a sequence) are logged and dropped — the connection receives no error
//! event and no state changes.

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::consts::CLIENT_CHANNEL_CAPACITY;
use crate::protocol::{ClientEvent, ServerEvent};
use crate::services;
use crate::state::AppState;

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();

    // Per-connection channel for receiving broadcast events from peers.
    let (client_tx, mut client_rx) = mpsc::channel::<ServerEvent>(CLIENT_CHANNEL_CAPACITY);

    info!(%client_id, "ws: client connected");

    // The room this connection has joined, if any.
    let mut current_room: Option<String> = None;

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let replies = dispatch_event(
                            &state,
                            &mut current_room,
                            client_id,
                            &client_tx,
                            text.as_str(),
                        )
                        .await;
                        for event in replies {
                            if send_event(&mut socket, &event).await.is_err() {
                                return;
                            }
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(event) = client_rx.recv() => {
                if send_event(&mut socket, &event).await.is_err() {
                    break;
                }
            }
        }
    }

    if let Some(room_id) = current_room {
        services::room::leave_room(&state, &room_id, client_id).await;
    }
    info!(%client_id, "ws: client disconnected");
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Parse one inbound text frame, apply it, and return events for the sender.
///
/// Kept free of socket concerns so tests can drive the full protocol through
/// plain channels.
async fn dispatch_event(
    state: &AppState,
    current_room: &mut Option<String>,
    client_id: Uuid,
    client_tx: &mpsc::Sender<ServerEvent>,
    text: &str,
) -> Vec<ServerEvent> {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            warn!(%client_id, error = %e, "ws: ignored invalid inbound event");
            return Vec::new();
        }
    };

    match event {
        ClientEvent::JoinRoom { room_id } => {
            // Re-joining moves the connection: leave the old room first.
            if let Some(old_room) = current_room.take() {
                services::room::leave_room(state, &old_room, client_id).await;
            }

            let (elements, index) =
                services::room::join_room(state, &room_id, client_id, client_tx.clone()).await;
            *current_room = Some(room_id);

            vec![ServerEvent::History { elements, index }]
        }

        ClientEvent::Draw { room_id, elements } => {
            let (elements, index) = services::room::commit(state, &room_id, elements).await;
            // The committer already holds the authoritative local state.
            services::room::broadcast(
                state,
                &room_id,
                &ServerEvent::Draw { elements, index },
                Some(client_id),
            )
            .await;
            Vec::new()
        }

        ClientEvent::Undo { room_id } => {
            if let Some((elements, index)) = services::room::undo(state, &room_id).await {
                // Requester included: undone content is not locally derivable.
                services::room::broadcast(state, &room_id, &ServerEvent::Undo { elements, index }, None)
                    .await;
            }
            Vec::new()
        }

        ClientEvent::Redo { room_id } => {
            if let Some((elements, index)) = services::room::redo(state, &room_id).await {
                services::room::broadcast(state, &room_id, &ServerEvent::Redo { elements, index }, None)
                    .await;
            }
            Vec::new()
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), ()> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize outbound event");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}
