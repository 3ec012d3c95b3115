//! Top-down decking surface view.

use deckplan_core::DeckConfig;

use crate::project::{footprint_rects, Projection};
use crate::surface::{DrawSurface, StrokeStyle};
use crate::views::parts::{
    draw_plan_dimension_labels, draw_plan_railing, draw_plan_stairs, fill_boards,
};
use crate::views::OUTLINE;

/// Renders the decking surface: board texture per platform, outlines,
/// railing, stairs, and dimension labels.
pub fn render(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection) {
    for rect in footprint_rects(config) {
        let origin = proj.plan_to_px(glam::Vec2::new(rect.x, rect.y));
        let w = rect.w * proj.scale;
        let h = rect.h * proj.scale;
        fill_boards(surface, origin.x, origin.y, w, h, proj.scale, config);
        surface.stroke_rect(origin.x, origin.y, w, h, OUTLINE, StrokeStyle::solid(2.0));
    }

    draw_plan_railing(surface, config, proj);
    draw_plan_stairs(surface, config, proj);
    draw_plan_dimension_labels(surface, config, proj);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{fit, ViewMode};
    use crate::surface::{DrawCommand, RecordingSurface};
    use deckplan_core::{DeckConfig, DeckShape};

    #[test]
    fn test_surface_view_outlines_each_platform() {
        let mut config = DeckConfig::default();
        config.shape = DeckShape::LShape;
        config.dimensions.extension_width = Some(6.0);
        config.dimensions.extension_depth = Some(8.0);
        let proj = fit(&config, 800.0, 600.0, ViewMode::Surface, 0.0);

        let mut surface = RecordingSurface::new();
        render(&mut surface, &config, &proj);
        assert_eq!(
            surface.count(|c| matches!(c, DrawCommand::StrokeRect { .. })),
            2
        );
    }

    #[test]
    fn test_surface_view_draws_boards_and_labels() {
        let config = DeckConfig::default();
        let proj = fit(&config, 800.0, 600.0, ViewMode::Surface, 0.0);
        let mut surface = RecordingSurface::new();
        render(&mut surface, &config, &proj);
        assert!(surface.count(|c| matches!(c, DrawCommand::FillRect { .. })) > 10);
        assert_eq!(surface.texts(), vec!["12'", "10'"]);
    }
}
