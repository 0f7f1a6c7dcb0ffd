//! Element model: the vector element entity and its construction rules.
//!
//! DESIGN
//! ======
//! An `Element` is pure persisted data — everything on it goes over the wire
//! and into room history. Transient interaction state (drag offsets, the
//! handle being dragged) lives in the engine's gesture state instead, so a
//! snapshot never needs a stripping pass before transmission.
//!
//! Ids are plain integers, unique within a room's current snapshot. The
//! allocator seeds from wall-clock milliseconds and increments from there, so
//! ids are monotonic within a process and overwhelmingly unique across
//! concurrent clients in the same room.

#[cfg(test)]
#[path = "element_test.rs"]
mod tests;

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Unique identifier for an element within a room snapshot.
pub type ElementId = i64;

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The kind of a drawable element.
///
/// `selection` and `eraser` are tools (interaction modes), not element kinds —
/// see [`crate::input::Tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Straight segment between two endpoints.
    Line,
    /// Axis-aligned rectangle spanning the anchor corners.
    Rectangle,
    /// Circle centered in the anchor box; radius is half the box diagonal.
    Circle,
    /// Rhombus with vertices at the bounding-box edge midpoints.
    Diamond,
    /// Freehand stroke; geometry lives in `points`.
    Pencil,
    /// Text block anchored at its top-left corner, extent from measurement.
    Text,
}

/// Stroke style captured at creation time and frozen on the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in canvas pixels.
    pub width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self { color: "#ffffff".to_string(), width: 2.0 }
    }
}

/// An element as stored in room history and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique id, preserved across updates to the same logical element.
    pub id: ElementId,
    /// Shape kind.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// First anchor corner x.
    pub x1: f64,
    /// First anchor corner y.
    pub y1: f64,
    /// Second anchor corner x.
    pub x2: f64,
    /// Second anchor corner y.
    pub y2: f64,
    /// Raw stroke path for pencil elements; the initial anchor otherwise.
    #[serde(default)]
    pub points: Vec<Point>,
    /// Text payload for text elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Stroke style, set from the active drawing style at creation.
    pub style: Style,
}

impl Element {
    /// Build a new element anchored at `(x1,y1)`–`(x2,y2)`.
    ///
    /// Callers pass an existing `id` when updating an element in place, or a
    /// fresh one from [`IdAllocator::next_id`] for a new element.
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, kind: ElementKind, style: Style, id: ElementId) -> Self {
        Self {
            id,
            kind,
            x1,
            y1,
            x2,
            y2,
            points: vec![Point::new(x1, y1)],
            text: None,
            style,
        }
    }

    /// Center of the anchor box. Render hint, never stored.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Length of the anchor-box diagonal. Render hint for circle previews.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        ((self.x2 - self.x1).powi(2) + (self.y2 - self.y1).powi(2)).sqrt()
    }
}

/// Hands out fresh element ids, seeded from wall-clock milliseconds.
pub struct IdAllocator {
    next: AtomicI64,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        let seed = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(dur) => i64::try_from(dur.as_millis()).unwrap_or(0),
            Err(_) => 0,
        };
        Self { next: AtomicI64::new(seed) }
    }

    /// Return a fresh unique id.
    pub fn next_id(&self) -> ElementId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
