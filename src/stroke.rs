//! Stroke smoother: freehand point sequences to renderable filled outlines.
//!
//! DESIGN
//! ======
//! A pencil element stores the raw pointer samples. To render it we first
//! build an enveloping outline polygon (not a centerline) by offsetting each
//! sample perpendicular to the stroke direction at half the brush size, out
//! along one side and back along the other. The outline is then smoothed into
//! a filled path of quadratic segments: each segment's control point is the
//! raw outline point and its endpoint is the midpoint to the next point, so
//! consecutive segments join with a continuous tangent.
//!
//! Degenerate input (fewer than 4 outline points) yields an empty path —
//! callers must tolerate a no-op draw for very short strokes.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod tests;

use std::fmt::Write as _;

use crate::element::Point;

/// One command of a filled outline path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Begin the path at a point.
    MoveTo(Point),
    /// Quadratic curve through `ctrl` ending at `to`.
    QuadTo { ctrl: Point, to: Point },
    /// Close the path back to the start.
    Close,
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Unit perpendicular of the direction from `a` to `b`, or `None` when the
/// points coincide.
fn perpendicular(a: Point, b: Point) -> Option<Point> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return None;
    }
    Some(Point::new(-dy / len, dx / len))
}

/// Build the enveloping outline polygon for a stroke of width `size`.
///
/// Walks the samples forward offsetting to the left of travel, then backward
/// offsetting to the other side, producing a closed loop around the
/// centerline. Coincident consecutive samples reuse the previous direction.
#[must_use]
pub fn stroke_outline(points: &[Point], size: f64) -> Vec<Point> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = size / 2.0;
    let mut left = Vec::with_capacity(points.len());
    let mut right = Vec::with_capacity(points.len());
    let mut last_perp = Point::new(0.0, 0.0);

    for (i, point) in points.iter().enumerate() {
        let perp = if i + 1 < points.len() {
            perpendicular(*point, points[i + 1]).unwrap_or(last_perp)
        } else {
            last_perp
        };
        last_perp = perp;

        left.push(Point::new(point.x + perp.x * half, point.y + perp.y * half));
        right.push(Point::new(point.x - perp.x * half, point.y - perp.y * half));
    }

    right.reverse();
    left.extend(right);
    left
}

/// Smooth an outline polygon into a closed path of quadratic segments.
///
/// Fewer than 4 points yields an empty path.
#[must_use]
pub fn outline_path(outline: &[Point]) -> Vec<PathCommand> {
    if outline.len() < 4 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(outline.len());
    commands.push(PathCommand::MoveTo(outline[0]));
    commands.push(PathCommand::QuadTo {
        ctrl: outline[1],
        to: midpoint(outline[1], outline[2]),
    });

    for i in 2..outline.len() - 1 {
        commands.push(PathCommand::QuadTo {
            ctrl: outline[i],
            to: midpoint(outline[i], outline[i + 1]),
        });
    }

    commands.push(PathCommand::Close);
    commands
}

/// Convenience: raw pencil samples straight to a filled path.
#[must_use]
pub fn smooth_stroke(points: &[Point], size: f64) -> Vec<PathCommand> {
    outline_path(&stroke_outline(points, size))
}

/// Render path commands as SVG path data, 2-decimal precision.
///
/// This is the hand-off format for rendering surfaces that consume paths as
/// strings (e.g. `Path2D`).
#[must_use]
pub fn svg_path_data(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for command in commands {
        // Writing to a String cannot fail; ignore the fmt::Result.
        let _unused = match command {
            PathCommand::MoveTo(p) => write!(out, "M{:.2},{:.2} ", p.x, p.y),
            PathCommand::QuadTo { ctrl, to } => {
                write!(out, "Q{:.2},{:.2} {:.2},{:.2} ", ctrl.x, ctrl.y, to.x, to.y)
            }
            PathCommand::Close => write!(out, "Z"),
        };
    }
    out.trim_end().to_string()
}
