//! Sync protocol: the event contract between clients and the room store.
//!
//! DESIGN
//! ======
//! Events are internally tagged JSON text frames over a persistent websocket,
//! one connection per client, each connection associated with exactly one
//! room after joining. Tags are kebab-case: `join-room`, `history`, `draw`,
//! `undo`, `redo`.
//!
//! Undo/redo replies go to the whole room INCLUDING the requester — undone
//! content is not derivable from a local diff, so the requester's element
//! list must be overwritten too. Draw broadcasts exclude the committer, which
//! already holds the authoritative local state.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// Frames sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Subscribe this connection to a room; triggers a `history` reply.
    JoinRoom {
        room_id: String,
    },
    /// Commit a new snapshot to the room's history.
    Draw {
        room_id: String,
        elements: Vec<Element>,
    },
    /// Step the room's history back one snapshot.
    Undo {
        room_id: String,
    },
    /// Step the room's history forward one snapshot.
    Redo {
        room_id: String,
    },
}

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Initial/resynchronization snapshot, sent to the requester on join.
    History {
        elements: Vec<Element>,
        index: usize,
    },
    /// Broadcast of a committed snapshot; the committer is excluded.
    Draw {
        elements: Vec<Element>,
        index: usize,
    },
    /// Snapshot after stepping back, sent to the whole room.
    Undo {
        elements: Vec<Element>,
        index: usize,
    },
    /// Snapshot after stepping forward, sent to the whole room.
    Redo {
        elements: Vec<Element>,
        index: usize,
    },
}
