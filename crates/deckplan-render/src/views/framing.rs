//! Top-down structural framing view: ledger, beams, joists, posts, and
//! footing indicators.

use deckplan_core::{BeamType, DeckConfig};
use glam::Vec2;

use crate::project::{footprint_rects, Projection, RectF};
use crate::surface::{DrawSurface, StrokeStyle};
use crate::views::parts::draw_plan_dimension_labels;
use crate::views::{FOOTING, LEDGER, LUMBER, OUTLINE, POST};

/// Beam spacing along the depth axis, in feet.
const BEAM_SPACING_FT: f32 = 6.0;
/// Post spacing along a beam, in feet.
const POST_SPACING_FT: f32 = 6.0;
/// Joist on-center spacing, in inches.
const JOIST_SPACING_IN: f32 = 16.0;
/// Drawn thickness of a beam/ledger bar, in feet.
const BEAM_THICKNESS_FT: f32 = 0.3;
/// Footing indicator radius, in feet.
const FOOTING_RADIUS_FT: f32 = 0.6;
/// Post marker half-size, in feet (4x4 nominal).
const POST_HALF_FT: f32 = 0.17;

/// Renders the framing plan for every platform of the footprint. The main
/// platform honors the ledger; extensions frame free-standing.
pub fn render(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection) {
    let rects = footprint_rects(config);
    for (index, rect) in rects.iter().enumerate() {
        frame_rect(surface, config, proj, *rect, index == 0);
    }
    draw_plan_dimension_labels(surface, config, proj);
}

/// Beam positions along a platform's depth: one every 6 ft, plus a forced
/// final beam at the far edge when the spacing does not land there.
pub(crate) fn beam_positions(depth: f32) -> Vec<f32> {
    let mut ys = Vec::new();
    let mut y = 0.0;
    while y < depth {
        ys.push(y);
        y += BEAM_SPACING_FT;
    }
    ys.push(depth);
    ys
}

/// Evenly spaced post stations across a beam span, `ceil(w/6)+1` of them.
pub(crate) fn post_stations(width: f32) -> Vec<f32> {
    let count = (width / POST_SPACING_FT).ceil() as u32 + 1;
    (0..count)
        .map(|i| width * i as f32 / (count - 1).max(1) as f32)
        .collect()
}

fn frame_rect(
    surface: &mut dyn DrawSurface,
    config: &DeckConfig,
    proj: &Projection,
    rect: RectF,
    is_main: bool,
) {
    let origin = proj.plan_to_px(Vec2::new(rect.x, rect.y));
    let w_px = rect.w * proj.scale;
    let h_px = rect.h * proj.scale;
    surface.stroke_rect(origin.x, origin.y, w_px, h_px, OUTLINE, StrokeStyle::solid(2.0));

    let ledger_here = is_main && config.ledger_attached;
    let beam_style = match config.beam_type {
        // Flush beams are engineered lumber hidden level with the joists.
        BeamType::Flush => Some(StrokeStyle::dashed(2.0)),
        BeamType::Dropped => None,
    };

    // Joists run along the depth axis at 16" o.c., final joist forced at the
    // far edge.
    let joist_step = JOIST_SPACING_IN / 12.0 * proj.scale;
    let mut x = origin.x;
    while x < origin.x + w_px {
        surface.stroke_line(
            Vec2::new(x, origin.y),
            Vec2::new(x, origin.y + h_px),
            LUMBER,
            StrokeStyle::solid(1.0),
        );
        x += joist_step;
    }
    surface.stroke_line(
        Vec2::new(origin.x + w_px, origin.y),
        Vec2::new(origin.x + w_px, origin.y + h_px),
        LUMBER,
        StrokeStyle::solid(1.0),
    );

    // Beams across the width axis.
    let thickness = BEAM_THICKNESS_FT * proj.scale;
    for (i, beam_y) in beam_positions(rect.h).iter().enumerate() {
        let y_px = origin.y + beam_y * proj.scale - thickness / 2.0;
        if i == 0 && ledger_here {
            // The ledger replaces the house-side beam.
            surface.fill_rect(origin.x, origin.y, w_px, thickness, LEDGER);
            continue;
        }
        match beam_style {
            Some(dashed) => {
                surface.stroke_rect(origin.x, y_px, w_px, thickness, OUTLINE, dashed)
            }
            None => surface.fill_rect(origin.x, y_px, w_px, thickness, LUMBER),
        }

        // Posts and footings under this beam.
        for station in post_stations(rect.w) {
            let center = proj.plan_to_px(Vec2::new(rect.x + station, rect.y + beam_y));
            let half = POST_HALF_FT * proj.scale;
            surface.stroke_circle(
                center,
                FOOTING_RADIUS_FT * proj.scale,
                FOOTING,
                StrokeStyle::dashed(1.0),
            );
            surface.fill_rect(
                center.x - half,
                center.y - half,
                half * 2.0,
                half * 2.0,
                POST,
            );
        }
    }
}
