//! Client interaction engine: pointer and blur events in, element mutations
//! and host actions out.
//!
//! DESIGN
//! ======
//! The engine owns the local element list, the camera, the active tool and
//! drawing style, and the gesture state machine. Event handlers convert
//! screen points to canvas space, consult the geometry engine, mutate the
//! element list, and return [`Action`]s for the host to process — the engine
//! never talks to the network or paints pixels itself.
//!
//! SYNC
//! ====
//! Outbound synchronization is fire-and-forget: a completed gesture yields
//! `Action::CommitSnapshot` when the element list actually changed since the
//! last emission. Applying a remote snapshot records it as last-emitted and
//! raises a suppress-next-emit flag, so a client never re-broadcasts a
//! snapshot it just received. Remote draw broadcasts are ignored while a
//! local drawing gesture is active; history and undo/redo snapshots always
//! overwrite the local list.

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;

use tracing::warn;

use crate::camera::Camera;
use crate::consts::FONT_SIZE_PX;
use crate::element::{Element, ElementId, ElementKind, IdAllocator, Point, Style};
use crate::geometry::{self, Coords, Cursor, HitPosition};
use crate::input::{Button, Grab, InputState, Tool};

// =============================================================================
// HOST INTERFACES
// =============================================================================

/// Measurement seam for text extent — the host supplies real font metrics.
pub trait TextMeasurer {
    /// Width of `text` rendered at `font_px`, in canvas pixels.
    fn measure_width(&self, text: &str, font_px: f64) -> f64;
}

/// Fixed per-character advance. Good enough for headless hosts and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasurer {
    /// Advance per character as a fraction of the font size.
    pub advance_ratio: f64,
}

impl Default for FixedAdvanceMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasurer for FixedAdvanceMeasurer {
    #[allow(clippy::cast_precision_loss)]
    fn measure_width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * self.advance_ratio
    }
}

/// Actions returned from event handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The element list changed in a committed way; send it to the server.
    CommitSnapshot(Vec<Element>),
    /// Update the pointer cursor.
    SetCursor(Cursor),
    /// Show the editable text overlay at a canvas position.
    OpenTextEditor {
        id: ElementId,
        x: f64,
        y: f64,
        text: String,
    },
    /// The scene changed; repaint.
    RenderNeeded,
}

// =============================================================================
// ENGINE
// =============================================================================

/// The interaction engine. One per connected client, driven by the host's
/// pointer/keyboard wiring on the UI thread.
pub struct Engine {
    elements: Vec<Element>,
    camera: Camera,
    tool: Tool,
    style: Style,
    input: InputState,
    ids: IdAllocator,
    measurer: Box<dyn TextMeasurer + Send>,
    suppress_emit: bool,
    last_emitted: Vec<Element>,
}

impl Engine {
    #[must_use]
    pub fn new(measurer: Box<dyn TextMeasurer + Send>) -> Self {
        Self {
            elements: Vec::new(),
            camera: Camera::default(),
            tool: Tool::default(),
            style: Style::default(),
            input: InputState::Idle,
            ids: IdAllocator::new(),
            measurer,
            suppress_emit: false,
            last_emitted: Vec::new(),
        }
    }

    // --- Host configuration ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Set the active drawing style. Read at element creation only; existing
    /// elements keep the style they were created with.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Set the zoom factor, anchored on the viewport center.
    pub fn set_zoom(&mut self, zoom: f64, viewport_w: f64, viewport_h: f64) {
        self.camera.set_zoom(zoom, viewport_w, viewport_h);
    }

    // --- Queries ---

    /// The local element list in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The active gesture.
    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    // --- Remote snapshot application ---

    /// Apply the initial/resynchronization snapshot from the server.
    pub fn apply_history(&mut self, elements: Vec<Element>) {
        self.suppress_emit = true;
        self.last_emitted.clone_from(&elements);
        self.elements = elements;
        self.run_sync();
    }

    /// Apply a peer's committed snapshot. Ignored while a local drawing
    /// gesture is active — the local provisional element wins until release.
    pub fn apply_remote_draw(&mut self, elements: Vec<Element>) {
        if matches!(self.input, InputState::Drawing { .. }) {
            return;
        }
        self.suppress_emit = true;
        self.last_emitted.clone_from(&elements);
        self.elements = elements;
        self.run_sync();
    }

    /// Apply the snapshot after a room-wide undo. Always overwrites — undone
    /// content is not derivable locally.
    pub fn apply_remote_undo(&mut self, elements: Vec<Element>) {
        self.suppress_emit = true;
        self.last_emitted.clone_from(&elements);
        self.elements = elements;
        self.run_sync();
    }

    /// Apply the snapshot after a room-wide redo.
    pub fn apply_remote_redo(&mut self, elements: Vec<Element>) {
        self.suppress_emit = true;
        self.last_emitted.clone_from(&elements);
        self.elements = elements;
        self.run_sync();
    }

    // --- Pointer events ---

    /// Handle pointer-down at a screen-space point.
    pub fn on_pointer_down(&mut self, screen: Point, button: Button, space_held: bool) -> Vec<Action> {
        if matches!(self.input, InputState::Writing { .. }) {
            return Vec::new();
        }

        if button == Button::Middle || space_held {
            self.input = InputState::Panning { last_screen: screen };
            return Vec::new();
        }

        let pt = self.camera.screen_to_canvas(screen);

        if let Some(kind) = self.tool.element_kind() {
            let id = self.ids.next_id();
            let element = Element::new(pt.x, pt.y, pt.x, pt.y, kind, self.style.clone(), id);
            self.elements.push(element);

            if kind == ElementKind::Text {
                self.input = InputState::Writing { id };
                return vec![
                    Action::OpenTextEditor { id, x: pt.x, y: pt.y, text: String::new() },
                    Action::RenderNeeded,
                ];
            }
            self.input = InputState::Drawing { id };
            return vec![Action::RenderNeeded];
        }

        match self.tool {
            Tool::Selection => self.begin_selection_gesture(pt),
            Tool::Eraser => {
                self.input = InputState::Erasing;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn begin_selection_gesture(&mut self, pt: Point) -> Vec<Action> {
        let Some(hit) = geometry::element_at_position(pt.x, pt.y, &self.elements) else {
            return Vec::new();
        };
        let Some(element) = self.elements.iter().find(|e| e.id == hit.id) else {
            return Vec::new();
        };

        if hit.position == HitPosition::Inside {
            let grab = if element.kind == ElementKind::Pencil {
                Grab::Points {
                    offsets: element
                        .points
                        .iter()
                        .map(|p| Point::new(pt.x - p.x, pt.y - p.y))
                        .collect(),
                }
            } else {
                Grab::Corner { offset_x: pt.x - element.x1, offset_y: pt.y - element.y1 }
            };
            self.input = InputState::Moving {
                id: hit.id,
                grab,
                orig_x1: element.x1,
                orig_y1: element.y1,
            };
        } else {
            self.input = InputState::Resizing { id: hit.id, handle: hit.position };
        }
        Vec::new()
    }

    /// Handle pointer-move at a screen-space point.
    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Action> {
        if let InputState::Panning { last_screen } = self.input {
            self.camera.pan_by(screen.x - last_screen.x, screen.y - last_screen.y);
            self.input = InputState::Panning { last_screen: screen };
            return vec![Action::RenderNeeded];
        }

        let pt = self.camera.screen_to_canvas(screen);
        let mut actions = Vec::new();

        // Hover feedback while idling with the selection tool.
        if self.tool == Tool::Selection && self.input == InputState::Idle {
            let cursor = geometry::element_at_position(pt.x, pt.y, &self.elements)
                .map_or(Cursor::Default, |hit| geometry::cursor_for_position(hit.position));
            actions.push(Action::SetCursor(cursor));
        }

        match self.input.clone() {
            InputState::Drawing { id } => {
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    if element.kind == ElementKind::Pencil {
                        element.points.push(pt);
                    } else {
                        set_coords(element, Coords::new(element.x1, element.y1, pt.x, pt.y));
                    }
                    actions.push(Action::RenderNeeded);
                }
            }

            InputState::Moving { id, grab, .. } => {
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    match grab {
                        Grab::Points { offsets } => {
                            element.points = offsets
                                .iter()
                                .map(|offset| Point::new(pt.x - offset.x, pt.y - offset.y))
                                .collect();
                        }
                        Grab::Corner { offset_x, offset_y } => {
                            let width = element.x2 - element.x1;
                            let height = element.y2 - element.y1;
                            let x1 = pt.x - offset_x;
                            let y1 = pt.y - offset_y;
                            set_coords(element, Coords::new(x1, y1, x1 + width, y1 + height));
                        }
                    }
                    actions.push(Action::RenderNeeded);
                }
            }

            InputState::Resizing { id, handle } => {
                if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
                    match geometry::resized_coordinates(pt.x, pt.y, handle, Coords::of(element), element.kind) {
                        Ok(coords) => {
                            set_coords(element, coords);
                            actions.push(Action::RenderNeeded);
                        }
                        Err(e) => warn!(error = %e, "resize ignored"),
                    }
                }
            }

            InputState::Erasing => {
                if let Some(hit) = geometry::element_at_position(pt.x, pt.y, &self.elements) {
                    self.elements.retain(|e| e.id != hit.id);
                    actions.push(Action::RenderNeeded);
                    if let Some(commit) = self.run_sync() {
                        actions.push(commit);
                    }
                }
            }

            InputState::Idle | InputState::Panning { .. } | InputState::Writing { .. } => {}
        }

        actions
    }

    /// Handle pointer-up at a screen-space point.
    pub fn on_pointer_up(&mut self, _screen: Point) -> Vec<Action> {
        match self.input.clone() {
            InputState::Writing { .. } => Vec::new(),

            InputState::Panning { .. } | InputState::Erasing => {
                self.input = InputState::Idle;
                Vec::new()
            }

            InputState::Drawing { id } | InputState::Resizing { id, .. } => {
                self.normalize(id);
                self.input = InputState::Idle;
                self.finish_gesture()
            }

            InputState::Moving { id, orig_x1, orig_y1, .. } => {
                // A click (no net movement) on a text element re-enters edit
                // mode instead of finalizing.
                if let Some(element) = self.elements.iter().find(|e| e.id == id) {
                    if element.kind == ElementKind::Text
                        && element.x1 == orig_x1
                        && element.y1 == orig_y1
                    {
                        let (x, y) = (element.x1, element.y1);
                        let text = element.text.clone().unwrap_or_default();
                        self.input = InputState::Writing { id };
                        return vec![Action::OpenTextEditor { id, x, y, text }];
                    }
                }
                self.input = InputState::Idle;
                self.finish_gesture()
            }

            InputState::Idle => Vec::new(),
        }
    }

    /// Handle wheel/trackpad scroll: translates the pan offset.
    pub fn on_wheel(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.camera.pan_by(-dx, -dy);
        vec![Action::RenderNeeded]
    }

    /// Commit typed text from the host's editable overlay (focus blur).
    ///
    /// The element's extent is recomputed from measured text: width from the
    /// measurer, height one line of the active font size at the current zoom.
    pub fn on_text_blur(&mut self, text: &str) -> Vec<Action> {
        let InputState::Writing { id } = self.input else {
            return Vec::new();
        };
        self.input = InputState::Idle;

        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            let font_px = FONT_SIZE_PX * self.camera.zoom;
            let width = self.measurer.measure_width(text, font_px);
            element.x2 = element.x1 + width;
            element.y2 = element.y1 + font_px;
            element.text = Some(text.to_string());
        }

        self.finish_gesture()
    }

    // --- Internals ---

    /// Apply coordinate normalization to an element on gesture completion.
    fn normalize(&mut self, id: ElementId) {
        if let Some(element) = self.elements.iter_mut().find(|e| e.id == id) {
            if geometry::adjustment_required(element.kind) {
                let coords = geometry::adjusted_coordinates(element);
                set_coords(element, coords);
            }
        }
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        let mut actions = vec![Action::RenderNeeded];
        if let Some(commit) = self.run_sync() {
            actions.push(commit);
        }
        actions
    }

    /// The outbound-emit decision, run after every element-list change.
    ///
    /// Skips while a gesture is still shaping the list, consumes the
    /// suppress-echo flag raised by remote application, and only emits when
    /// the list actually differs from the last emission.
    fn run_sync(&mut self) -> Option<Action> {
        if matches!(
            self.input,
            InputState::Drawing { .. } | InputState::Moving { .. } | InputState::Resizing { .. }
        ) {
            return None;
        }
        if self.suppress_emit {
            self.suppress_emit = false;
            return None;
        }
        if self.elements == self.last_emitted {
            return None;
        }
        self.last_emitted.clone_from(&self.elements);
        Some(Action::CommitSnapshot(self.elements.clone()))
    }
}

/// Update an element's anchor coordinates, refreshing the stored anchor point
/// for non-freehand kinds.
fn set_coords(element: &mut Element, coords: Coords) {
    element.x1 = coords.x1;
    element.y1 = coords.y1;
    element.x2 = coords.x2;
    element.y2 = coords.y2;
    if element.kind != ElementKind::Pencil {
        element.points = vec![Point::new(coords.x1, coords.y1)];
    }
}
