//! Rotatable isometric 3D view.
//!
//! Geometry is built in feet-space (x across the width, y toward the viewer,
//! z up) and pushed through [`iso_project`], which applies the camera's yaw
//! rotation before the 30° dimetric formula. Faces are painted back to front
//! using the rotated depth of their centroid, so the scene stays coherent at
//! any rotation angle.

use deckplan_core::{
    catalog::GLASS_PANEL_TINT, facade_color, railing_color, DeckConfig, DeckingCategory,
    ExteriorFacade, RailingType,
};
use glam::{Vec2, Vec3};

use crate::project::{
    footprint_rects, iso_project, stair_layout, Projection, RectF, HOUSE_WALL_RISE_FT,
    RAILING_HEIGHT_FT,
};
use crate::surface::{DrawSurface, StrokeStyle};
use crate::views::parts::railing_segments;
use crate::views::{GRASS, OUTLINE};

/// Decking board thickness, in feet.
const DECKING_THICKNESS_FT: f32 = 0.1;
/// Shade applied between alternating board rows.
const BOARD_ROW_SHADE: f32 = 0.08;
/// Shade applied to side faces lit across the width axis.
const X_FACE_SHADE: f32 = 0.15;
/// Shade applied to side faces lit along the depth axis.
const Y_FACE_SHADE: f32 = 0.25;
/// Composite grain streak pitch, in feet.
const STREAK_PITCH_FT: f32 = 0.6;
/// Railing post spacing, in feet.
const RAIL_POST_SPACING_FT: f32 = 4.0;
/// Grass apron beyond the footprint, in feet.
const GRASS_MARGIN_FT: f32 = 3.0;

/// Renders the isometric scene at the given yaw rotation.
pub fn render(
    surface: &mut dyn DrawSurface,
    config: &DeckConfig,
    proj: &Projection,
    rotation_deg: f32,
) {
    if config.show_grass {
        draw_grass(surface, config, proj, rotation_deg);
    }
    if config.has_house {
        draw_house(surface, config, proj, rotation_deg);
    }

    for rect in footprint_rects(config) {
        draw_platform(surface, config, proj, rotation_deg, rect);
    }
    if config.railing.is_present() {
        draw_railing(surface, config, proj, rotation_deg);
    }
    draw_stairs(surface, config, proj, rotation_deg);
}

fn project_quad(quad: [Vec3; 4], rotation_deg: f32, proj: &Projection) -> [Vec2; 4] {
    quad.map(|p| iso_project(p, rotation_deg, proj))
}

/// Rotated depth of a point; larger means nearer the viewer.
fn depth_key(p: Vec3, rotation_deg: f32) -> f32 {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    (p.x * cos - p.y * sin) + (p.x * sin + p.y * cos)
}

fn quad_depth(quad: &[Vec3; 4], rotation_deg: f32) -> f32 {
    quad.iter().map(|p| depth_key(*p, rotation_deg)).sum::<f32>() / 4.0
}

fn draw_grass(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection, rot: f32) {
    let (fw, fh) = crate::project::footprint_extent(config);
    let m = GRASS_MARGIN_FT;
    let quad = [
        Vec3::new(-m, -m, 0.0),
        Vec3::new(fw + m, -m, 0.0),
        Vec3::new(fw + m, fh + m, 0.0),
        Vec3::new(-m, fh + m, 0.0),
    ];
    surface.fill_polygon(&project_quad(quad, rot, proj), GRASS);
}

fn draw_house(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection, rot: f32) {
    let w = config.dimensions.width as f32;
    let height = config.dimensions.height as f32;
    let top = height + HOUSE_WALL_RISE_FT;
    let wall = deckplan_core::Color::from_hex(&config.house_color);

    let face = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(w, 0.0, 0.0),
        Vec3::new(w, 0.0, top),
        Vec3::new(0.0, 0.0, top),
    ];
    surface.fill_polygon(&project_quad(face, rot, proj), wall);

    // Siding courses read as horizontal streaks on the wall face.
    let seam = facade_color(config.exterior_facade).darken(0.25);
    let course = match config.exterior_facade {
        ExteriorFacade::Stucco => None,
        ExteriorFacade::Brick | ExteriorFacade::Stone => Some(0.5),
        ExteriorFacade::Vinyl | ExteriorFacade::Wood => Some(0.75),
    };
    if let Some(pitch) = course {
        let mut z = pitch;
        while z < top {
            surface.stroke_line(
                iso_project(Vec3::new(0.0, 0.0, z), rot, proj),
                iso_project(Vec3::new(w, 0.0, z), rot, proj),
                seam,
                StrokeStyle::solid(1.0),
            );
            z += pitch;
        }
    }

    if config.patio_door {
        const DOOR_WIDTH_FT: f32 = 3.0;
        const DOOR_HEIGHT_FT: f32 = 6.7;
        let x0 = (w - DOOR_WIDTH_FT) / 2.0;
        let door = [
            Vec3::new(x0, 0.0, height),
            Vec3::new(x0 + DOOR_WIDTH_FT, 0.0, height),
            Vec3::new(x0 + DOOR_WIDTH_FT, 0.0, height + DOOR_HEIGHT_FT),
            Vec3::new(x0, 0.0, height + DOOR_HEIGHT_FT),
        ];
        surface.fill_polygon(
            &project_quad(door, rot, proj),
            deckplan_core::Color::rgba(70, 90, 110, 200),
        );
    }
}

fn draw_platform(
    surface: &mut dyn DrawSurface,
    config: &DeckConfig,
    proj: &Projection,
    rot: f32,
    rect: RectF,
) {
    let base = config.material.board_color();
    let height = config.dimensions.height as f32;
    let z_lo = height - DECKING_THICKNESS_FT - 0.6; // rim joist band
    let (x0, x1, y0, y1) = (rect.x, rect.right(), rect.y, rect.bottom());

    // Four side faces, painted far to near.
    let mut faces = [
        (
            [
                Vec3::new(x0, y0, z_lo),
                Vec3::new(x1, y0, z_lo),
                Vec3::new(x1, y0, height),
                Vec3::new(x0, y0, height),
            ],
            base.darken(Y_FACE_SHADE),
        ),
        (
            [
                Vec3::new(x0, y1, z_lo),
                Vec3::new(x1, y1, z_lo),
                Vec3::new(x1, y1, height),
                Vec3::new(x0, y1, height),
            ],
            base.darken(Y_FACE_SHADE),
        ),
        (
            [
                Vec3::new(x0, y0, z_lo),
                Vec3::new(x0, y1, z_lo),
                Vec3::new(x0, y1, height),
                Vec3::new(x0, y0, height),
            ],
            base.darken(X_FACE_SHADE),
        ),
        (
            [
                Vec3::new(x1, y0, z_lo),
                Vec3::new(x1, y1, z_lo),
                Vec3::new(x1, y1, height),
                Vec3::new(x1, y0, height),
            ],
            base.darken(X_FACE_SHADE),
        ),
    ];
    faces.sort_by(|a, b| {
        quad_depth(&a.0, rot)
            .partial_cmp(&quad_depth(&b.0, rot))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (quad, color) in faces {
        surface.fill_polygon(&project_quad(quad, rot, proj), color);
    }

    // Top face as alternating board rows along the depth axis.
    let shaded = base.darken(BOARD_ROW_SHADE);
    let pitch = config.board_width.feet() as f32;
    let mut y = y0;
    let mut index = 0u32;
    while y < y1 {
        let row_end = (y + pitch).min(y1);
        let quad = [
            Vec3::new(x0, y, height),
            Vec3::new(x1, y, height),
            Vec3::new(x1, row_end, height),
            Vec3::new(x0, row_end, height),
        ];
        let color = if index % 2 == 0 { base } else { shaded };
        surface.fill_polygon(&project_quad(quad, rot, proj), color);
        y = row_end;
        index += 1;
    }

    // Composite products get a fine grain streak across the boards.
    if config.material.category() == DeckingCategory::Composite {
        let streak = base.darken(0.05);
        let mut x = x0 + STREAK_PITCH_FT;
        while x < x1 {
            surface.stroke_line(
                iso_project(Vec3::new(x, y0, height), rot, proj),
                iso_project(Vec3::new(x, y1, height), rot, proj),
                streak,
                StrokeStyle::solid(1.0),
            );
            x += STREAK_PITCH_FT;
        }
    }

    let top_outline = [
        iso_project(Vec3::new(x0, y0, height), rot, proj),
        iso_project(Vec3::new(x1, y0, height), rot, proj),
        iso_project(Vec3::new(x1, y1, height), rot, proj),
        iso_project(Vec3::new(x0, y1, height), rot, proj),
    ];
    surface.stroke_polygon(&top_outline, OUTLINE, StrokeStyle::solid(1.5));
}

fn draw_railing(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection, rot: f32) {
    let color = railing_color(config.railing);
    let height = config.dimensions.height as f32;
    let top = height + RAILING_HEIGHT_FT;
    let main = footprint_rects(config)[0];

    for (a, b) in railing_segments(config, main) {
        if config.railing == RailingType::Glass {
            let panel = [
                a.extend(height + 0.2),
                b.extend(height + 0.2),
                b.extend(top - 0.2),
                a.extend(top - 0.2),
            ];
            surface.fill_polygon(&project_quad(panel, rot, proj), GLASS_PANEL_TINT);
        }

        // Posts every 4 ft, plus one at each end of the run.
        let length = a.distance(b);
        let count = ((length / RAIL_POST_SPACING_FT).ceil() as u32).max(1);
        for i in 0..=count {
            let p = a.lerp(b, i as f32 / count as f32);
            surface.stroke_line(
                iso_project(p.extend(height), rot, proj),
                iso_project(p.extend(top), rot, proj),
                color,
                StrokeStyle::solid(2.5),
            );
        }

        // Top rail.
        surface.stroke_line(
            iso_project(a.extend(top), rot, proj),
            iso_project(b.extend(top), rot, proj),
            color,
            StrokeStyle::solid(3.0),
        );
    }
}

fn draw_stairs(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection, rot: f32) {
    let Some(stair) = stair_layout(config) else {
        return;
    };
    let base = config.material.board_color();
    let shaded = base.darken(BOARD_ROW_SHADE);
    let height = config.dimensions.height as f32;

    for i in 0..stair.step_count {
        let z = height - stair.rise_ft * (i + 1) as f32;
        let near = stair.edge_start + stair.out_dir * (stair.run_ft * i as f32);
        let far = near + stair.out_dir * stair.run_ft;
        let quad = [
            near.extend(z),
            (near + stair.along_dir * stair.width_ft).extend(z),
            (far + stair.along_dir * stair.width_ft).extend(z),
            far.extend(z),
        ];
        let color = if i % 2 == 0 { base } else { shaded };
        surface.fill_polygon(&project_quad(quad, rot, proj), color);
        surface.stroke_polygon(&project_quad(quad, rot, proj), OUTLINE, StrokeStyle::solid(1.0));

        // Riser face below the tread's outer edge.
        let z_below = (z - stair.rise_ft).max(0.0);
        let riser = [
            far.extend(z),
            (far + stair.along_dir * stair.width_ft).extend(z),
            (far + stair.along_dir * stair.width_ft).extend(z_below),
            far.extend(z_below),
        ];
        surface.fill_polygon(&project_quad(riser, rot, proj), base.darken(Y_FACE_SHADE));
    }
}
