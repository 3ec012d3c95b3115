//! Scene composition: applies the camera and dispatches to the active view.

use deckplan_core::DeckConfig;
use tracing::debug;

use crate::camera::Camera;
use crate::project::{fit, ViewMode};
use crate::surface::DrawSurface;
use crate::views::{self, BACKGROUND};

/// Renders one frame of the given view into `surface`.
///
/// Pan and zoom are applied as a canvas-center affine so every view, the
/// isometric one included, pans and zooms uniformly; the camera's rotation
/// only participates in the isometric projection math.
pub fn render_scene(
    surface: &mut dyn DrawSurface,
    config: &DeckConfig,
    camera: &Camera,
    view: ViewMode,
    canvas_w: f32,
    canvas_h: f32,
) {
    debug!(?view, zoom = camera.zoom, rotation = camera.rotation_deg, "render frame");
    surface.clear(BACKGROUND);

    surface.save();
    // Pan sits inside the zoom scale: the controller accumulates dx/zoom, so
    // scaling it back makes the content track the pointer exactly.
    surface.translate(canvas_w / 2.0, canvas_h / 2.0);
    surface.scale(camera.zoom);
    surface.translate(-canvas_w / 2.0 + camera.x, -canvas_h / 2.0 + camera.y);

    let proj = fit(config, canvas_w, canvas_h, view, camera.rotation_deg);
    match view {
        ViewMode::Surface => views::plan::render(surface, config, &proj),
        ViewMode::Framing => views::framing::render(surface, config, &proj),
        ViewMode::Elevation => views::elevation::render(surface, config, &proj),
        ViewMode::Isometric => {
            views::isometric::render(surface, config, &proj, camera.rotation_deg)
        }
    }

    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use deckplan_core::DeckConfig;

    fn frame(view: ViewMode, camera: &Camera) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        render_scene(&mut surface, &DeckConfig::default(), camera, view, 800.0, 600.0);
        surface
    }

    #[test]
    fn test_frame_clears_then_saves() {
        let surface = frame(ViewMode::Surface, &Camera::default());
        assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
        assert!(matches!(surface.commands[1], DrawCommand::Save));
        assert!(matches!(
            surface.commands.last(),
            Some(DrawCommand::Restore)
        ));
    }

    #[test]
    fn test_camera_affine_wraps_every_view() {
        for view in [
            ViewMode::Surface,
            ViewMode::Framing,
            ViewMode::Elevation,
            ViewMode::Isometric,
        ] {
            let camera = Camera {
                x: 30.0,
                y: -10.0,
                zoom: 1.5,
                rotation_deg: 20.0,
            };
            let surface = frame(view, &camera);
            assert_eq!(
                surface.count(|c| matches!(c, DrawCommand::Scale { factor } if *factor == 1.5)),
                1,
                "{:?}",
                view
            );
            assert_eq!(
                surface.count(|c| matches!(c, DrawCommand::Translate { .. })),
                2
            );
        }
    }

    #[test]
    fn test_each_view_emits_content() {
        for view in [
            ViewMode::Surface,
            ViewMode::Framing,
            ViewMode::Elevation,
            ViewMode::Isometric,
        ] {
            let surface = frame(view, &Camera::default());
            // Clear + save/restore + transforms is 6 commands; content adds more.
            assert!(surface.commands.len() > 10, "{:?} drew nothing", view);
        }
    }

    /// Composes the recorded translate/scale/translate prologue into the
    /// device position of a content point.
    fn map_through_prologue(surface: &RecordingSurface, p: glam::Vec2) -> glam::Vec2 {
        let mut transforms = surface.commands.iter().filter_map(|c| match c {
            DrawCommand::Translate { dx, dy } => Some((glam::Vec2::new(*dx, *dy), 1.0)),
            DrawCommand::Scale { factor } => Some((glam::Vec2::ZERO, *factor)),
            _ => None,
        });
        let (outer, _) = transforms.next().expect("outer translate");
        let (_, zoom) = transforms.next().expect("scale");
        let (inner, _) = transforms.next().expect("inner translate");
        outer + (inner + p) * zoom
    }

    #[test]
    fn test_pan_moves_content_by_the_drag_distance() {
        // A drag accumulates dx/zoom of pan; the frame affine must scale it
        // back so the on-screen displacement equals the drag at any zoom.
        let zoom = 2.14;
        let drag = glam::Vec2::new(100.0, -40.0);
        let still = Camera {
            zoom,
            ..Camera::default()
        };
        let panned = Camera {
            x: drag.x / zoom,
            y: drag.y / zoom,
            zoom,
            rotation_deg: 0.0,
        };

        let point = glam::Vec2::new(123.0, 456.0);
        let before = map_through_prologue(&frame(ViewMode::Surface, &still), point);
        let after = map_through_prologue(&frame(ViewMode::Surface, &panned), point);
        assert!((after - before - drag).length() < 1e-3);
    }

    #[test]
    fn test_rotation_only_affects_isometric() {
        let still = Camera::default();
        let rotated = Camera {
            rotation_deg: 35.0,
            ..Camera::default()
        };
        assert_eq!(
            frame(ViewMode::Surface, &still).commands,
            frame(ViewMode::Surface, &rotated).commands
        );
        assert_ne!(
            frame(ViewMode::Isometric, &still).commands,
            frame(ViewMode::Isometric, &rotated).commands
        );
    }
}
