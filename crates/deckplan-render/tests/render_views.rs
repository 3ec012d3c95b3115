//! End-to-end checks across the four views: fit behavior, camera/interaction
//! flows, and frame composition through the public API.

use deckplan_render::{
    footprint_extent, render_scene, Camera, DrawCommand, InteractionController, Modifiers,
    PointerButton, PointerEvent, RecordingSurface, ViewMode,
};

use deckplan_core::{DeckConfig, DeckShape, RailingType, StairLocation};
use proptest::prelude::*;

const VIEWS: [ViewMode; 4] = [
    ViewMode::Surface,
    ViewMode::Framing,
    ViewMode::Elevation,
    ViewMode::Isometric,
];

fn frame(config: &DeckConfig, camera: &Camera, view: ViewMode) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    render_scene(&mut surface, config, camera, view, 800.0, 600.0);
    surface
}

#[test]
fn every_view_renders_every_shape() {
    for shape in [
        DeckShape::Rectangle,
        DeckShape::LShape,
        DeckShape::TShape,
        DeckShape::WrapAround,
    ] {
        let mut config = DeckConfig::default();
        config.shape = shape;
        config.dimensions.extension_width = Some(6.0);
        config.dimensions.extension_depth = Some(8.0);
        assert!(config.validate().is_ok(), "{:?}", shape);

        for view in VIEWS {
            let surface = frame(&config, &Camera::default(), view);
            assert!(
                surface.commands.len() > 10,
                "{:?}/{:?} drew {} commands",
                shape,
                view,
                surface.commands.len()
            );
        }
    }
}

#[test]
fn view_switch_flow_keeps_rotation() {
    let mut controller = InteractionController::new(ViewMode::Isometric);

    // Rotate 80px, zoom in twice, then pan with shift held.
    controller.pointer_down(PointerEvent {
        x: 100.0,
        y: 100.0,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    controller.pointer_move(180.0, 100.0);
    controller.pointer_up();
    controller.wheel(2);
    assert_eq!(controller.camera().rotation_deg, 40.0);

    // Frames at the rotated angle differ from the default angle.
    let config = DeckConfig::default();
    let rotated = frame(&config, controller.camera(), ViewMode::Isometric);
    let still = frame(&config, &Camera::default(), ViewMode::Isometric);
    assert_ne!(rotated.commands, still.commands);

    // Switching to a flat view resets pan/zoom but keeps the angle for the
    // return trip.
    controller.set_view_mode(ViewMode::Surface);
    assert_eq!(controller.camera().zoom, 1.0);
    controller.set_view_mode(ViewMode::Isometric);
    assert_eq!(controller.camera().rotation_deg, 40.0);
}

#[test]
fn config_edit_resets_camera_pan() {
    let mut controller = InteractionController::new(ViewMode::Surface);
    controller.pointer_down(PointerEvent {
        x: 0.0,
        y: 0.0,
        button: PointerButton::Primary,
        modifiers: Modifiers::default(),
    });
    controller.pointer_move(25.0, 40.0);
    controller.pointer_up();
    assert_ne!((controller.camera().x, controller.camera().y), (0.0, 0.0));

    controller.config_changed();
    assert_eq!((controller.camera().x, controller.camera().y), (0.0, 0.0));
}

#[test]
fn railing_and_stairs_toggle_command_volume() {
    let full = DeckConfig::default();
    let mut bare = DeckConfig::default();
    bare.railing = RailingType::None;
    bare.stairs.location = StairLocation::None;

    for view in [ViewMode::Surface, ViewMode::Isometric] {
        let with = frame(&full, &Camera::default(), view).commands.len();
        let without = frame(&bare, &Camera::default(), view).commands.len();
        assert!(with > without, "{:?}: {} vs {}", view, with, without);
    }
}

#[test]
fn elevation_lists_height_before_width() {
    let surface = frame(&DeckConfig::default(), &Camera::default(), ViewMode::Elevation);
    assert_eq!(surface.texts(), vec!["3'", "12'"]);
}

proptest! {
    #[test]
    fn orthographic_views_always_draw_inside_scaled_extent(
        width in 6.0f64..48.0,
        depth in 6.0f64..48.0,
    ) {
        let mut config = DeckConfig::default();
        config.dimensions.width = width;
        config.dimensions.depth = depth;
        config.stairs.location = StairLocation::None;

        let (fw, fh) = footprint_extent(&config);
        prop_assert!((fw - width as f32).abs() < 1e-4);
        prop_assert!((fh - depth as f32).abs() < 1e-4);

        // The footprint outline must fit inside the padded canvas.
        let surface = frame(&config, &Camera::default(), ViewMode::Surface);
        for command in &surface.commands {
            if let DrawCommand::StrokeRect { x, y, w, h, .. } = command {
                prop_assert!(*x >= 39.0 && *y >= 39.0);
                prop_assert!(x + w <= 761.0 && y + h <= 561.0);
            }
        }
    }

    #[test]
    fn isometric_renders_at_any_rotation(rotation in 0.0f32..360.0) {
        let camera = Camera { rotation_deg: rotation, ..Camera::default() };
        let surface = frame(&DeckConfig::default(), &camera, ViewMode::Isometric);
        prop_assert!(surface.commands.len() > 10);
    }
}
