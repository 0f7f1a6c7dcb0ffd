//! Room service — join/leave, snapshot commit, undo/redo, and broadcast.
//!
//! DESIGN
//! ======
//! Rooms are created lazily on first reference and live for the process
//! lifetime; only the client map is pruned on disconnect. Every snapshot
//! handed to a caller or taken from one is an owned deep copy, so nothing a
//! client does after the fact can alias server history.
//!
//! Broadcast is best-effort: events go into each client's bounded channel
//! with `try_send`, and a full channel skips that client rather than blocking
//! the room.

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;

use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::history::Snapshot;
use crate::protocol::ServerEvent;
use crate::state::{AppState, RoomState};

/// Subscribe a connection to a room, initializing the room if absent.
///
/// Returns a deep copy of the current snapshot and index for the requesting
/// connection only.
pub async fn join_room(
    state: &AppState,
    room_id: &str,
    client_id: Uuid,
    tx: mpsc::Sender<ServerEvent>,
) -> (Snapshot, usize) {
    let mut rooms = state.rooms.write().await;
    let room = rooms
        .entry(room_id.to_string())
        .or_insert_with(RoomState::new);
    room.clients.insert(client_id, tx);

    info!(%room_id, %client_id, clients = room.clients.len(), "client joined room");
    (room.history.current().clone(), room.history.index())
}

/// Remove a connection from a room. History is retained — an in-flight
/// local-only interaction on the disconnecting client is simply discarded.
pub async fn leave_room(state: &AppState, room_id: &str, client_id: Uuid) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(room_id) else {
        return;
    };
    room.clients.remove(&client_id);
    info!(%room_id, %client_id, remaining = room.clients.len(), "client left room");
}

/// Commit a new snapshot to a room's history.
///
/// Truncates any redo-able future past the current index, appends the
/// snapshot, and returns a deep copy plus the new index for broadcast to the
/// committer's peers.
pub async fn commit(state: &AppState, room_id: &str, elements: Snapshot) -> (Snapshot, usize) {
    let mut rooms = state.rooms.write().await;
    let room = rooms
        .entry(room_id.to_string())
        .or_insert_with(RoomState::new);

    room.history.commit(elements);

    info!(
        %room_id,
        index = room.history.index(),
        history_len = room.history.len(),
        "committed snapshot"
    );
    (room.history.current().clone(), room.history.index())
}

/// Step a room's history back one snapshot.
///
/// Returns the new snapshot and index, or `None` when already at index 0
/// (silent no-op, no broadcast).
pub async fn undo(state: &AppState, room_id: &str) -> Option<(Snapshot, usize)> {
    let mut rooms = state.rooms.write().await;
    let room = rooms
        .entry(room_id.to_string())
        .or_insert_with(RoomState::new);

    let snapshot = room.history.undo()?.clone();
    let index = room.history.index();
    info!(%room_id, index, "undo");
    Some((snapshot, index))
}

/// Step a room's history forward one snapshot.
///
/// Returns the new snapshot and index, or `None` when already at the tip.
pub async fn redo(state: &AppState, room_id: &str) -> Option<(Snapshot, usize)> {
    let mut rooms = state.rooms.write().await;
    let room = rooms
        .entry(room_id.to_string())
        .or_insert_with(RoomState::new);

    let snapshot = room.history.redo()?.clone();
    let index = room.history.index();
    info!(%room_id, index, "redo");
    Some((snapshot, index))
}

/// Send an event to every client in a room, optionally excluding one
/// connection (the committer, for draw broadcasts).
pub async fn broadcast(state: &AppState, room_id: &str, event: &ServerEvent, exclude: Option<Uuid>) {
    let rooms = state.rooms.read().await;
    let Some(room) = rooms.get(room_id) else {
        return;
    };

    for (client_id, tx) in &room.clients {
        if exclude == Some(*client_id) {
            continue;
        }
        if tx.try_send(event.clone()).is_err() {
            debug!(%room_id, %client_id, "client channel full, skipping broadcast");
        }
    }
}
