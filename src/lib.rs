//! Collaborative vector-drawing surface: shared rooms, a linear undo/redo
//! timeline, and the element geometry engine that drives the client.
//!
//! The crate has two halves. The client half is a headless interaction
//! engine: it turns pointer/keyboard input plus geometry results into element
//! mutations and host actions, and never touches the network or the screen.
//! The server half is an Axum websocket relay that owns per-room snapshot
//! history and broadcasts commits, undos, and redos to room members.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`element`] | Element model, id allocation, and construction rules |
//! | [`geometry`] | Hit-testing, cursors, resize transforms, normalization |
//! | [`stroke`] | Freehand stroke smoothing into filled outline paths |
//! | [`camera`] | Pan/zoom camera and screen↔canvas conversions |
//! | [`input`] | Tools and the gesture state machine types |
//! | [`engine`] | The client interaction engine |
//! | [`history`] | Room snapshot history (undo/redo timeline) |
//! | [`protocol`] | Wire events between clients and the server |
//! | [`state`] | Shared server state (rooms map) |
//! | [`services`] | Room join/commit/undo/redo/broadcast |
//! | [`routes`] | Axum router and the websocket relay |
//! | [`consts`] | Shared numeric constants |

pub mod camera;
pub mod consts;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod history;
pub mod input;
pub mod protocol;
pub mod routes;
pub mod services;
pub mod state;
pub mod stroke;
