//! Pan/zoom camera and screen↔canvas coordinate conversions.
//!
//! Zoom and pan are orthogonal continuous parameters, not gesture states. All
//! hit-testing and interaction logic runs in canvas space; the camera is the
//! only place pan and zoom are applied or divided out.

#[cfg(test)]
#[path = "camera_test.rs"]
mod tests;

use crate::element::Point;

/// Camera state for the drawing surface.
///
/// `pan_x` / `pan_y` are in canvas units. `zoom` is a scale factor
/// (1.0 = no zoom). `offset_x` / `offset_y` keep the zoom centered on the
/// viewport rather than its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (device-independent pixels) to canvas
    /// coordinates, removing pan, zoom, and the centering offset.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x * self.zoom + self.offset_x) / self.zoom,
            y: (screen.y - self.pan_y * self.zoom + self.offset_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point back to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x * self.zoom - self.offset_x,
            y: canvas.y * self.zoom + self.pan_y * self.zoom - self.offset_y,
        }
    }

    /// Translate the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Set the zoom factor, recomputing the centering offset so the zoom
    /// stays anchored on the middle of a `viewport_w` × `viewport_h` view.
    pub fn set_zoom(&mut self, zoom: f64, viewport_w: f64, viewport_h: f64) {
        self.zoom = zoom;
        self.offset_x = (viewport_w * zoom - viewport_w) / 2.0;
        self.offset_y = (viewport_h * zoom - viewport_h) / 2.0;
    }
}
