//! Input model: tools, mouse buttons, and the gesture state machine.
//!
//! `Tool` captures the user's intent at pointer-down time. `InputState` is the
//! active gesture being tracked between pointer-down and pointer-up; each
//! active variant carries the context needed to compute deltas and emit the
//! final mutation on release. `Grab` is the ephemeral companion to a selected
//! element — drag offsets live here, never on the element itself, so they can
//! never leak into a broadcast snapshot.

#[cfg(test)]
#[path = "input_test.rs"]
mod tests;

use crate::element::{ElementId, ElementKind, Point};
use crate::geometry::HitPosition;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Selection,
    /// Draw a straight line.
    Line,
    /// Draw a rectangle.
    Rectangle,
    /// Draw a circle.
    Circle,
    /// Draw a diamond.
    Diamond,
    /// Freehand pencil.
    Pencil,
    /// Place a text block.
    Text,
    /// Erase elements under the pointer.
    Eraser,
}

impl Tool {
    /// The element kind this tool creates, if it creates one.
    #[must_use]
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            Self::Line => Some(ElementKind::Line),
            Self::Rectangle => Some(ElementKind::Rectangle),
            Self::Circle => Some(ElementKind::Circle),
            Self::Diamond => Some(ElementKind::Diamond),
            Self::Pencil => Some(ElementKind::Pencil),
            Self::Text => Some(ElementKind::Text),
            Self::Selection | Self::Eraser => None,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Captured drag context joining a selected element for the gesture's
/// lifetime only.
#[derive(Debug, Clone, PartialEq)]
pub enum Grab {
    /// Pointer offset from the element's first anchor corner.
    Corner { offset_x: f64, offset_y: f64 },
    /// Per-point pointer offsets for freehand strokes.
    Points { offsets: Vec<Point> },
}

/// The active gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Sizing a newly created element from its anchor corner.
    Drawing {
        /// Id of the provisional element being sized.
        id: ElementId,
    },
    /// Translating an existing element.
    Moving {
        /// Id of the element being moved.
        id: ElementId,
        /// Captured drag offsets.
        grab: Grab,
        /// Element x1 at gesture start, for click-vs-drag detection.
        orig_x1: f64,
        /// Element y1 at gesture start.
        orig_y1: f64,
    },
    /// Dragging one of an element's resize handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// The handle tag captured at pointer-down.
        handle: HitPosition,
    },
    /// Dragging the canvas itself.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// A text element is open in the host's editable overlay.
    Writing {
        /// Id of the text element being edited.
        id: ElementId,
    },
    /// Eraser is down; elements under the pointer are removed as it moves.
    Erasing,
}
