//! Shared drawing sub-routines: board-surface fill, railing instancing,
//! stair treads, and dimension labels. Each is independently testable
//! against a `RecordingSurface`.

use deckplan_core::{catalog::GLASS_PANEL_TINT, railing_color, BoardPattern, DeckConfig, RailingType};
use glam::Vec2;

use crate::project::{footprint_extent, stair_layout, Projection, RectF};
use crate::surface::{DrawSurface, StrokeStyle, TextAnchor};
use crate::views::{fmt_feet, LABEL, LABEL_SIZE, OUTLINE};

/// Post/baluster marker spacing along 2D plan railing runs, in pixels.
pub const PLAN_POST_SPACING_PX: f32 = 48.0;
/// Shade applied between alternating standard board rows.
const BOARD_ROW_SHADE: f32 = 0.08;
/// Shade applied between alternating diagonal strips.
const DIAGONAL_STRIP_SHADE: f32 = 0.10;

/// Paints the decking board texture into a device-space rectangle.
///
/// `Standard` lays alternating-shade horizontal rows one board wide;
/// `Diagonal` lays 45° sheared strips clipped to the rectangle. The two
/// remaining patterns currently draw as `Standard`.
pub fn fill_boards(
    surface: &mut dyn DrawSurface,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    scale: f32,
    config: &DeckConfig,
) {
    let base = config.material.board_color();
    let pitch = (config.board_width.feet() as f32) * scale;
    if pitch <= 0.0 {
        return;
    }

    surface.push_clip_rect(x, y, w, h);
    match config.board_pattern {
        BoardPattern::Diagonal => {
            let shaded = base.darken(DIAGONAL_STRIP_SHADE);
            let mut offset = -h;
            let mut index = 0u32;
            while offset < w {
                let color = if index % 2 == 0 { base } else { shaded };
                let quad = [
                    Vec2::new(x + offset, y),
                    Vec2::new(x + offset + pitch, y),
                    Vec2::new(x + offset + pitch + h, y + h),
                    Vec2::new(x + offset + h, y + h),
                ];
                surface.fill_polygon(&quad, color);
                offset += pitch;
                index += 1;
            }
        }
        _ => {
            let shaded = base.darken(BOARD_ROW_SHADE);
            let mut row_y = y;
            let mut index = 0u32;
            while row_y < y + h {
                let color = if index % 2 == 0 { base } else { shaded };
                let row_h = pitch.min(y + h - row_y);
                surface.fill_rect(x, row_y, w, row_h, color);
                row_y += pitch;
                index += 1;
            }
        }
    }
    surface.pop_clip();
}

/// Railing runs around the main platform, in feet-space. The ledger edge is
/// excluded when attached; ordering matches the legacy renderer (house edge
/// first when free-standing, then right, bottom, left).
pub fn railing_segments(config: &DeckConfig, main: RectF) -> Vec<(Vec2, Vec2)> {
    let tl = Vec2::new(main.x, main.y);
    let tr = Vec2::new(main.right(), main.y);
    let br = Vec2::new(main.right(), main.bottom());
    let bl = Vec2::new(main.x, main.bottom());

    let mut segments = vec![(tr, br), (bl, br), (tl, bl)];
    if !config.ledger_attached {
        segments.insert(0, (tl, tr));
    }
    segments
}

/// Strokes the plan-view railing and instances post markers along each run.
/// Glass railing adds translucent panel fills just inside each edge.
pub fn draw_plan_railing(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection) {
    if !config.railing.is_present() {
        return;
    }
    let color = railing_color(config.railing);
    let main = crate::project::footprint_rects(config)[0];

    for (a, b) in railing_segments(config, main) {
        let pa = proj.plan_to_px(a);
        let pb = proj.plan_to_px(b);
        surface.stroke_line(pa, pb, color, StrokeStyle::solid(3.0));

        if config.railing == RailingType::Glass {
            draw_glass_panel(surface, pa, pb);
        } else {
            // Instanced post markers along the run.
            let length = pa.distance(pb);
            let count = ((length / PLAN_POST_SPACING_PX).floor() as u32).max(2);
            for i in 0..=count {
                let t = i as f32 / count as f32;
                let p = pa.lerp(pb, t);
                surface.fill_rect(p.x - 2.0, p.y - 2.0, 4.0, 4.0, color);
            }
        }
    }
}

fn draw_glass_panel(surface: &mut dyn DrawSurface, pa: Vec2, pb: Vec2) {
    const PANEL_INSET: f32 = 4.0;
    const PANEL_THICKNESS: f32 = 8.0;
    let dir = (pb - pa).normalize_or_zero();
    // Rotate the run direction 90° to point into the deck.
    let inward = Vec2::new(-dir.y, dir.x);
    let quad = [
        pa + inward * PANEL_INSET,
        pb + inward * PANEL_INSET,
        pb + inward * (PANEL_INSET + PANEL_THICKNESS),
        pa + inward * (PANEL_INSET + PANEL_THICKNESS),
    ];
    surface.fill_polygon(&quad, GLASS_PANEL_TINT);
}

/// Draws the plan-view stair treads running away from the deck edge.
pub fn draw_plan_stairs(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection) {
    let Some(stair) = stair_layout(config) else {
        return;
    };
    let tread = config.material.board_color();
    let shaded = tread.darken(BOARD_ROW_SHADE);

    for i in 0..stair.step_count {
        let near = stair.edge_start + stair.out_dir * (stair.run_ft * i as f32);
        let far = near + stair.out_dir * stair.run_ft;
        let quad = [
            proj.plan_to_px(near),
            proj.plan_to_px(near + stair.along_dir * stair.width_ft),
            proj.plan_to_px(far + stair.along_dir * stair.width_ft),
            proj.plan_to_px(far),
        ];
        let color = if i % 2 == 0 { tread } else { shaded };
        surface.fill_polygon(&quad, color);
        surface.stroke_polygon(&quad, OUTLINE, StrokeStyle::solid(1.0));
    }
}

/// Width label centered below the footprint, depth label rotated 90° beside
/// the right edge.
pub fn draw_plan_dimension_labels(
    surface: &mut dyn DrawSurface,
    config: &DeckConfig,
    proj: &Projection,
) {
    let (fw, fh) = footprint_extent(config);
    let width_pos = proj.plan_to_px(Vec2::new(fw / 2.0, fh)) + Vec2::new(0.0, 22.0);
    surface.text(
        &fmt_feet(config.dimensions.width as f32),
        width_pos,
        LABEL_SIZE,
        LABEL,
        TextAnchor::Center,
        false,
    );

    let depth_pos = proj.plan_to_px(Vec2::new(fw, fh / 2.0)) + Vec2::new(22.0, 0.0);
    surface.text(
        &fmt_feet(config.dimensions.depth as f32),
        depth_pos,
        LABEL_SIZE,
        LABEL,
        TextAnchor::Center,
        true,
    );
}
