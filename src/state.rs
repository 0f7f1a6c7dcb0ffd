//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is constructed once at process start and injected into Axum
//! handlers via the `State` extractor. It holds a map of live rooms; each
//! room owns its snapshot history and the set of connected clients. Room
//! entries are created on demand on first reference and mutated only through
//! the draw/undo/redo protocol.
//!
//! CONCURRENCY
//! ===========
//! All mutation goes through the `RwLock` write guard, which serializes
//! commit/undo/redo per process — a commit's truncate-append can never
//! interleave with another commit's read-modify-write on the same room.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::history::RoomHistory;
use crate::protocol::ServerEvent;

/// Per-room live state.
pub struct RoomState {
    /// Snapshot timeline shared by every client in the room.
    pub history: RoomHistory,
    /// Connected clients: connection id → sender for outgoing events.
    pub clients: HashMap<Uuid, mpsc::Sender<ServerEvent>>,
}

impl RoomState {
    #[must_use]
    pub fn new() -> Self {
        Self { history: RoomHistory::new(), clients: HashMap::new() }
    }
}

impl Default for RoomState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared application state. Clone is required by Axum — the rooms map is
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<String, RoomState>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { rooms: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
