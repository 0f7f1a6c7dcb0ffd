//! Geometry engine: hit-testing, cursor classification, resize transforms,
//! and coordinate normalization.
//!
//! DESIGN
//! ======
//! Every function here is pure over `(x, y, element)` or `(x, y, elements)` in
//! canvas-space coordinates — the camera has already divided out pan and zoom.
//! Hit classification returns a [`HitPosition`] tag; the engine maps tags to
//! gestures (inside → move, anything else → resize) and cursors.
//!
//! ERROR HANDLING
//! ==============
//! A handle tag that is not valid for an element kind is a caller bug, not a
//! geometry outcome: `resized_coordinates` signals it with [`GeometryError`]
//! and leaves the coordinates unchanged rather than corrupting the element.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;

use crate::consts::{DIAMOND_BORDER_TOLERANCE, HIT_TOLERANCE_PX};
use crate::element::{Element, ElementId, ElementKind};

// =============================================================================
// TYPES
// =============================================================================

/// Which part of an element a point landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPosition {
    /// The element body; grabbing here moves the element.
    Inside,
    /// First endpoint of a line.
    Start,
    /// Second endpoint of a line.
    End,
    /// Top-left corner handle.
    TopLeft,
    /// Top-right corner handle.
    TopRight,
    /// Bottom-left corner handle.
    BottomLeft,
    /// Bottom-right corner handle.
    BottomRight,
    /// Top edge-midpoint handle.
    Top,
    /// Right edge-midpoint handle.
    Right,
    /// Bottom edge-midpoint handle.
    Bottom,
    /// Left edge-midpoint handle.
    Left,
}

/// Resize-cursor category for a hit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Diagonal NW–SE resize.
    NwseResize,
    /// Diagonal NE–SW resize.
    NeswResize,
    /// Vertical resize.
    NsResize,
    /// Horizontal resize.
    EwResize,
    /// Grab (move) cursor.
    Grab,
    /// No special cursor.
    Default,
}

/// Result of testing a point against an element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Id of the element that was hit.
    pub id: ElementId,
    /// Which part of it was hit.
    pub position: HitPosition,
}

/// The four anchor coordinates of an element, as a value type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Coords {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The coordinates of an element.
    #[must_use]
    pub fn of(element: &Element) -> Self {
        Self { x1: element.x1, y1: element.y1, x2: element.x2, y2: element.y2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("handle {handle:?} is not valid for {kind:?}")]
    InvalidHandle { kind: ElementKind, handle: HitPosition },
    #[error("{0:?} elements cannot be resized by handle")]
    Unresizable(ElementKind),
}

// =============================================================================
// HIT-TESTING
// =============================================================================

/// Distance from `(x, y)` to the segment `(x1,y1)`–`(x2,y2)`.
///
/// Standard point-to-segment projection: clamp the projection parameter to
/// `[0, 1]` and measure Euclidean distance to the clamped point.
fn point_to_segment_distance(x: f64, y: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let ax = x - x1;
    let ay = y - y1;
    let bx = x2 - x1;
    let by = y2 - y1;

    let len_sq = bx * bx + by * by;
    let param = if len_sq == 0.0 { -1.0 } else { (ax * bx + ay * by) / len_sq };

    let (px, py) = if param < 0.0 {
        (x1, y1)
    } else if param > 1.0 {
        (x2, y2)
    } else {
        (x1 + param * bx, y1 + param * by)
    };

    let dx = x - px;
    let dy = y - py;
    (dx * dx + dy * dy).sqrt()
}

/// Tag `position` if `(x, y)` is within the hit slop of `(hx, hy)`.
fn near_point(x: f64, y: f64, hx: f64, hy: f64, position: HitPosition) -> Option<HitPosition> {
    if (x - hx).abs() < HIT_TOLERANCE_PX && (y - hy).abs() < HIT_TOLERANCE_PX {
        Some(position)
    } else {
        None
    }
}

/// Classify where `(x, y)` lands on `element`, or `None` for no hit.
#[must_use]
pub fn position_within_element(x: f64, y: f64, element: &Element) -> Option<HitPosition> {
    let Coords { x1, y1, x2, y2 } = Coords::of(element);

    match element.kind {
        ElementKind::Line => near_point(x, y, x1, y1, HitPosition::Start)
            .or_else(|| near_point(x, y, x2, y2, HitPosition::End))
            .or_else(|| {
                let distance = point_to_segment_distance(x, y, x1, y1, x2, y2);
                (distance < HIT_TOLERANCE_PX).then_some(HitPosition::Inside)
            }),

        ElementKind::Rectangle => near_point(x, y, x1, y1, HitPosition::TopLeft)
            .or_else(|| near_point(x, y, x2, y1, HitPosition::TopRight))
            .or_else(|| near_point(x, y, x1, y2, HitPosition::BottomLeft))
            .or_else(|| near_point(x, y, x2, y2, HitPosition::BottomRight))
            .or_else(|| {
                (x >= x1 && x <= x2 && y >= y1 && y <= y2).then_some(HitPosition::Inside)
            }),

        ElementKind::Diamond => {
            let cx = (x1 + x2) / 2.0;
            let cy = (y1 + y2) / 2.0;

            if let Some(vertex) = near_point(x, y, cx, y1, HitPosition::Top)
                .or_else(|| near_point(x, y, x2, cy, HitPosition::Right))
                .or_else(|| near_point(x, y, cx, y2, HitPosition::Bottom))
                .or_else(|| near_point(x, y, x1, cy, HitPosition::Left))
            {
                return Some(vertex);
            }

            let half_w = (x2 - x1).abs() / 2.0;
            let half_h = (y2 - y1).abs() / 2.0;
            if half_w == 0.0 || half_h == 0.0 {
                return None;
            }

            // Normalized Manhattan-diamond metric: 0 at center, 1 on the border.
            let value = (x - cx).abs() / half_w + (y - cy).abs() / half_h;
            (value < 1.0 - DIAMOND_BORDER_TOLERANCE).then_some(HitPosition::Inside)
        }

        ElementKind::Circle => circle_position(x, y, x1, y1, x2, y2),

        ElementKind::Pencil => {
            let on_stroke = element.points.windows(2).any(|pair| {
                point_to_segment_distance(x, y, pair[0].x, pair[0].y, pair[1].x, pair[1].y)
                    < HIT_TOLERANCE_PX
            });
            on_stroke.then_some(HitPosition::Inside)
        }

        ElementKind::Text => {
            (x >= x1 && x <= x2 && y >= y1 && y <= y2).then_some(HitPosition::Inside)
        }
    }
}

/// Circle classification: ring octants, strict interior, then handle points.
fn circle_position(x: f64, y: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Option<HitPosition> {
    let cx = (x1 + x2) / 2.0;
    let cy = (y1 + y2) / 2.0;
    let radius = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt() / 2.0;
    let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();

    // On the ring: classify into one of 8 octants by angle from center,
    // boundaries at odd multiples of π/8.
    if (dist - radius).abs() <= HIT_TOLERANCE_PX {
        let angle = (y - cy).atan2(x - cx);
        let step = std::f64::consts::FRAC_PI_8;

        let octant = if angle > -step && angle <= step {
            HitPosition::Right
        } else if angle > step && angle <= 3.0 * step {
            HitPosition::BottomRight
        } else if angle > 3.0 * step && angle <= 5.0 * step {
            HitPosition::Bottom
        } else if angle > 5.0 * step && angle <= 7.0 * step {
            HitPosition::BottomLeft
        } else if angle > 7.0 * step || angle <= -7.0 * step {
            HitPosition::Left
        } else if angle > -7.0 * step && angle <= -5.0 * step {
            HitPosition::TopLeft
        } else if angle > -5.0 * step && angle <= -3.0 * step {
            HitPosition::Top
        } else {
            HitPosition::TopRight
        };
        return Some(octant);
    }

    // Strictly inside the ring.
    if dist < radius - HIT_TOLERANCE_PX {
        return Some(HitPosition::Inside);
    }

    // Resize handle points at radius from center, compass + diagonals.
    let diag = radius / std::f64::consts::SQRT_2;
    let handles = [
        (cx, cy - radius, HitPosition::Top),
        (cx, cy + radius, HitPosition::Bottom),
        (cx - radius, cy, HitPosition::Left),
        (cx + radius, cy, HitPosition::Right),
        (cx - diag, cy - diag, HitPosition::TopLeft),
        (cx + diag, cy - diag, HitPosition::TopRight),
        (cx - diag, cy + diag, HitPosition::BottomLeft),
        (cx + diag, cy + diag, HitPosition::BottomRight),
    ];
    handles
        .iter()
        .find_map(|&(hx, hy, position)| near_point(x, y, hx, hy, position))
}

/// First element in list order hit by `(x, y)`, with its classification.
///
/// Matching is first-found, so draw order determines pick priority among
/// overlapping elements.
#[must_use]
pub fn element_at_position(x: f64, y: f64, elements: &[Element]) -> Option<Hit> {
    elements.iter().find_map(|element| {
        position_within_element(x, y, element).map(|position| Hit { id: element.id, position })
    })
}

// =============================================================================
// CURSORS
// =============================================================================

/// Map a hit tag to its resize-cursor category. Pure lookup, no state.
#[must_use]
pub fn cursor_for_position(position: HitPosition) -> Cursor {
    match position {
        HitPosition::TopLeft | HitPosition::BottomRight | HitPosition::Start | HitPosition::End => {
            Cursor::NwseResize
        }
        HitPosition::TopRight | HitPosition::BottomLeft => Cursor::NeswResize,
        HitPosition::Top | HitPosition::Bottom => Cursor::NsResize,
        HitPosition::Left | HitPosition::Right => Cursor::EwResize,
        HitPosition::Inside => Cursor::Grab,
    }
}

// =============================================================================
// RESIZE
// =============================================================================

/// New anchor coordinates after dragging `handle` to `(px, py)`.
///
/// # Errors
///
/// Returns [`GeometryError`] when `handle` is not a resize handle for `kind`;
/// the caller must leave the element's coordinates unchanged.
pub fn resized_coordinates(
    px: f64,
    py: f64,
    handle: HitPosition,
    coords: Coords,
    kind: ElementKind,
) -> Result<Coords, GeometryError> {
    let Coords { x1, y1, x2, y2 } = coords;
    let invalid = || GeometryError::InvalidHandle { kind, handle };

    match kind {
        ElementKind::Line | ElementKind::Rectangle => match handle {
            HitPosition::TopLeft | HitPosition::Start => Ok(Coords::new(px, py, x2, y2)),
            HitPosition::TopRight => Ok(Coords::new(x1, py, px, y2)),
            HitPosition::BottomLeft => Ok(Coords::new(px, y1, x2, py)),
            HitPosition::BottomRight | HitPosition::End => Ok(Coords::new(x1, y1, px, py)),
            _ => Err(invalid()),
        },

        ElementKind::Circle => match handle {
            HitPosition::TopLeft => Ok(Coords::new(px, py, x2, y2)),
            HitPosition::TopRight => Ok(Coords::new(x1, py, px, y2)),
            HitPosition::BottomLeft => Ok(Coords::new(px, y1, x2, py)),
            HitPosition::BottomRight => Ok(Coords::new(x1, y1, px, py)),
            // Edge-midpoint handles mirror the opposite edge so the untouched
            // edge stays fixed.
            HitPosition::Top => Ok(Coords::new(x1, py, x2, y1 + y2 - py)),
            HitPosition::Bottom => Ok(Coords::new(x1, y1 + y2 - py, x2, py)),
            HitPosition::Left => Ok(Coords::new(px, y1, x2, y2)),
            HitPosition::Right => Ok(Coords::new(x1, y1, px, y2)),
            _ => Err(invalid()),
        },

        // Diamonds only expose edge-midpoint handles.
        ElementKind::Diamond => match handle {
            HitPosition::Top => Ok(Coords::new(x1, py, x2, y1 + y2 - py)),
            HitPosition::Bottom => Ok(Coords::new(x1, y1 + y2 - py, x2, py)),
            HitPosition::Left => Ok(Coords::new(px, y1, x1 + x2 - px, y2)),
            HitPosition::Right => Ok(Coords::new(x1 + x2 - px, y1, px, y2)),
            _ => Err(invalid()),
        },

        ElementKind::Pencil | ElementKind::Text => Err(GeometryError::Unresizable(kind)),
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Whether a kind needs its coordinates normalized on interaction completion.
///
/// Freehand and text elements are exempt — their coordinate pairs are not
/// corner-ordered.
#[must_use]
pub fn adjustment_required(kind: ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Line | ElementKind::Rectangle | ElementKind::Circle | ElementKind::Diamond
    )
}

/// Canonical anchor ordering for an element. Idempotent.
///
/// Rectangle/circle/diamond store `(x1,y1)` as min-corner and `(x2,y2)` as
/// max-corner. Lines order endpoints left-to-right, top-to-bottom on tie.
/// Exempt kinds come back unchanged.
#[must_use]
pub fn adjusted_coordinates(element: &Element) -> Coords {
    let coords = Coords::of(element);
    let Coords { x1, y1, x2, y2 } = coords;

    match element.kind {
        ElementKind::Line => {
            if x1 < x2 || (x1 == x2 && y1 < y2) {
                coords
            } else {
                Coords::new(x2, y2, x1, y1)
            }
        }
        ElementKind::Rectangle | ElementKind::Circle | ElementKind::Diamond => {
            Coords::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
        }
        ElementKind::Pencil | ElementKind::Text => coords,
    }
}
