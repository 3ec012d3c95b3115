//! Camera state and pointer/wheel interaction.
//!
//! The `Camera` is a plain value object handed into the renderers; the
//! `InteractionController` is the only thing that mutates it. The host is
//! responsible for converting screen coordinates into canvas-local pixels
//! before forwarding events here.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::project::ViewMode;

/// Minimum zoom factor.
pub const ZOOM_MIN: f32 = 0.3;
/// Maximum zoom factor.
pub const ZOOM_MAX: f32 = 5.0;
/// Zoom multiplier applied per inward wheel step.
pub const ZOOM_STEP_IN: f32 = 1.1;
/// Zoom multiplier applied per outward wheel step.
pub const ZOOM_STEP_OUT: f32 = 0.9;
/// Degrees of isometric rotation per pixel of horizontal drag.
pub const ROTATE_SENSITIVITY_DEG_PER_PX: f32 = 0.5;

/// Pan, zoom, and isometric rotation state.
///
/// Pan and zoom reset to identity whenever the view or config changes;
/// rotation persists across view switches because it reflects user intent
/// about the viewing angle, independent of what is being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Horizontal pan offset in pixels.
    pub x: f32,
    /// Vertical pan offset in pixels.
    pub y: f32,
    /// Zoom factor, clamped to `[0.3, 5.0]`.
    pub zoom: f32,
    /// Rotation about the vertical axis in degrees (isometric view only).
    pub rotation_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
            rotation_deg: 0.0,
        }
    }
}

impl Camera {
    /// Resets pan and zoom to identity, leaving rotation untouched.
    pub fn reset_pan_zoom(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.zoom = 1.0;
    }

    /// Applies one wheel step. Positive steps zoom in by 1.1, negative steps
    /// zoom out by 0.9; the result always stays within `[0.3, 5.0]`.
    pub fn apply_zoom_step(&mut self, zoom_in: bool) {
        let factor = if zoom_in { ZOOM_STEP_IN } else { ZOOM_STEP_OUT };
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

/// Pointer button identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Modifier-key state accompanying a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// True when any modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

/// A pointer-down event in canvas-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragKind {
    Pan,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    kind: DragKind,
    last_x: f32,
    last_y: f32,
}

/// Translates pointer and wheel input into camera updates.
///
/// The host should grant pointer capture on drag start so moves keep arriving
/// when the pointer leaves the canvas; the controller itself only tracks the
/// logical drag and resets it cleanly on up/cancel.
#[derive(Debug, Clone)]
pub struct InteractionController {
    camera: Camera,
    view: ViewMode,
    drag: Option<DragState>,
}

impl InteractionController {
    pub fn new(view: ViewMode) -> Self {
        Self {
            camera: Camera::default(),
            view,
            drag: None,
        }
    }

    /// The current camera state.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The view the controller is interpreting input for.
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Begins a drag. In the isometric view an unmodified primary-button drag
    /// rotates; every other drag pans.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        let kind = if self.view == ViewMode::Isometric
            && event.button == PointerButton::Primary
            && !event.modifiers.any()
        {
            DragKind::Rotate
        } else {
            DragKind::Pan
        };
        trace!(?kind, x = event.x, y = event.y, "drag start");
        self.drag = Some(DragState {
            kind,
            last_x: event.x,
            last_y: event.y,
        });
    }

    /// Continues a drag. No-op when no drag is active.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let dx = x - drag.last_x;
        let dy = y - drag.last_y;
        drag.last_x = x;
        drag.last_y = y;

        match drag.kind {
            DragKind::Rotate => {
                self.camera.rotation_deg += dx * ROTATE_SENSITIVITY_DEG_PER_PX;
            }
            DragKind::Pan => {
                // Divide by zoom so the content tracks the pointer at any
                // zoom level.
                self.camera.x += dx / self.camera.zoom;
                self.camera.y += dy / self.camera.zoom;
            }
        }
    }

    /// Ends the drag.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Pointer capture was lost or the gesture was cancelled.
    pub fn pointer_cancel(&mut self) {
        self.drag = None;
    }

    /// Applies a wheel step; positive `steps` zoom in.
    pub fn wheel(&mut self, steps: i32) {
        for _ in 0..steps.abs() {
            self.camera.apply_zoom_step(steps > 0);
        }
    }

    /// Switches the active view, resetting pan/zoom but keeping rotation.
    pub fn set_view_mode(&mut self, view: ViewMode) {
        if view != self.view {
            self.view = view;
            self.drag = None;
            self.camera.reset_pan_zoom();
        }
    }

    /// The deck configuration changed; pan/zoom reset, rotation persists.
    pub fn config_changed(&mut self) {
        self.drag = None;
        self.camera.reset_pan_zoom();
    }
}
