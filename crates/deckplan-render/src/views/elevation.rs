//! Side elevation view: ground, house wall, structure, deck slab, railing,
//! stairs, and dimension leader lines.

use deckplan_core::{facade_color, railing_color, BeamType, Color, DeckConfig, ExteriorFacade,
    RailingType, StairLocation};
use glam::Vec2;

use crate::project::{
    elevation_extent, stair_layout, Projection, GRADE_CLEARANCE_FT, HOUSE_WALL_RISE_FT,
    RAILING_HEIGHT_FT,
};
use crate::surface::{DrawSurface, StrokeStyle, TextAnchor};
use crate::views::framing::post_stations;
use crate::views::{fmt_feet, GRASS, GROUND, LABEL, LABEL_SIZE, LUMBER, OUTLINE, POST};

/// Decking board thickness, in feet.
const DECKING_THICKNESS_FT: f32 = 0.1;
/// Joist band depth (2x8), in feet.
const JOIST_DEPTH_FT: f32 = 0.6;
/// Dropped beam depth, in feet.
const BEAM_DEPTH_FT: f32 = 0.5;
/// Railing post spacing in the elevation, in feet.
const RAIL_POST_SPACING_FT: f32 = 4.0;
/// Baluster pitch, in inches.
const BALUSTER_PITCH_IN: f32 = 4.0;
/// Minimum baluster pitch on screen, in pixels, for legibility.
const BALUSTER_MIN_PITCH_PX: f32 = 4.0;

/// Vertical coordinate frame for the elevation: x maps feet across the deck
/// width, y maps feet of height above grade.
struct Frame {
    x0: f32,
    ground_y: f32,
    scale: f32,
    width_ft: f32,
}

impl Frame {
    fn new(config: &DeckConfig, proj: &Projection) -> Self {
        let (_, feet_h) = elevation_extent(config);
        Self {
            x0: proj.offset.x,
            ground_y: proj.offset.y + (feet_h - GRADE_CLEARANCE_FT) * proj.scale,
            scale: proj.scale,
            width_ft: config.dimensions.width as f32,
        }
    }

    fn x(&self, ft: f32) -> f32 {
        self.x0 + ft * self.scale
    }

    fn y(&self, z_ft: f32) -> f32 {
        self.ground_y - z_ft * self.scale
    }

    /// Fills the rect spanning `[x_a, x_b]` feet across and `[z_lo, z_hi]`
    /// feet up.
    fn fill_span(
        &self,
        surface: &mut dyn DrawSurface,
        x_a: f32,
        x_b: f32,
        z_lo: f32,
        z_hi: f32,
        color: Color,
    ) {
        surface.fill_rect(
            self.x(x_a),
            self.y(z_hi),
            (x_b - x_a) * self.scale,
            (z_hi - z_lo) * self.scale,
            color,
        );
    }
}

/// Renders the side elevation.
pub fn render(surface: &mut dyn DrawSurface, config: &DeckConfig, proj: &Projection) {
    let frame = Frame::new(config, proj);
    let height = config.dimensions.height as f32;

    if config.has_house {
        draw_house(surface, config, &frame, height);
    }
    if config.show_grass {
        frame.fill_span(surface, -1.0, frame.width_ft + 1.0, -GRADE_CLEARANCE_FT, 0.0, GRASS);
    }
    // Ground line.
    surface.stroke_line(
        Vec2::new(frame.x(-1.0), frame.ground_y),
        Vec2::new(frame.x(frame.width_ft + 1.0), frame.ground_y),
        GROUND,
        StrokeStyle::solid(2.0),
    );

    draw_structure(surface, config, &frame, height);
    draw_deck_slab(surface, config, &frame, height);
    if config.railing.is_present() {
        draw_railing(surface, config, &frame, height);
    }
    draw_stairs(surface, config, &frame, height);
    draw_leaders(surface, config, &frame, height);
}

fn draw_house(surface: &mut dyn DrawSurface, config: &DeckConfig, frame: &Frame, height: f32) {
    let wall = Color::from_hex(&config.house_color);
    let top = height + HOUSE_WALL_RISE_FT;
    frame.fill_span(surface, 0.0, frame.width_ft, 0.0, top, wall);

    // Facade texture: siding courses or a masonry grid.
    let seam = facade_color(config.exterior_facade).darken(0.25);
    match config.exterior_facade {
        ExteriorFacade::Vinyl | ExteriorFacade::Wood => {
            let mut z = 0.75;
            while z < top {
                surface.stroke_line(
                    Vec2::new(frame.x(0.0), frame.y(z)),
                    Vec2::new(frame.x(frame.width_ft), frame.y(z)),
                    seam,
                    StrokeStyle::solid(1.0),
                );
                z += 0.75;
            }
        }
        ExteriorFacade::Brick | ExteriorFacade::Stone => {
            let mut z = 0.5;
            while z < top {
                surface.stroke_line(
                    Vec2::new(frame.x(0.0), frame.y(z)),
                    Vec2::new(frame.x(frame.width_ft), frame.y(z)),
                    seam,
                    StrokeStyle::solid(1.0),
                );
                z += 0.5;
            }
            let mut x = 1.0;
            while x < frame.width_ft {
                surface.stroke_line(
                    Vec2::new(frame.x(x), frame.y(0.0)),
                    Vec2::new(frame.x(x), frame.y(top)),
                    seam,
                    StrokeStyle::solid(1.0),
                );
                x += 1.0;
            }
        }
        ExteriorFacade::Stucco => {}
    }

    if config.patio_door {
        const DOOR_WIDTH_FT: f32 = 3.0;
        const DOOR_HEIGHT_FT: f32 = 6.7;
        let door_x = (frame.width_ft - DOOR_WIDTH_FT) / 2.0;
        frame.fill_span(
            surface,
            door_x,
            door_x + DOOR_WIDTH_FT,
            height,
            height + DOOR_HEIGHT_FT,
            Color::rgba(70, 90, 110, 200),
        );
    }
}

fn draw_structure(surface: &mut dyn DrawSurface, config: &DeckConfig, frame: &Frame, height: f32) {
    let joist_bottom = height - DECKING_THICKNESS_FT - JOIST_DEPTH_FT;
    let post_top = match config.beam_type {
        BeamType::Dropped => joist_bottom - BEAM_DEPTH_FT,
        BeamType::Flush => joist_bottom,
    };

    const POST_WIDTH_FT: f32 = 0.33;
    for station in post_stations(frame.width_ft) {
        let x = station.clamp(POST_WIDTH_FT / 2.0, frame.width_ft - POST_WIDTH_FT / 2.0);
        frame.fill_span(
            surface,
            x - POST_WIDTH_FT / 2.0,
            x + POST_WIDTH_FT / 2.0,
            0.0,
            post_top,
            POST,
        );
    }

    match config.beam_type {
        BeamType::Dropped => {
            frame.fill_span(
                surface,
                0.0,
                frame.width_ft,
                joist_bottom - BEAM_DEPTH_FT,
                joist_bottom,
                LUMBER,
            );
        }
        BeamType::Flush => {
            // Engineered beam hidden inside the joist band.
            surface.stroke_rect(
                frame.x(0.0),
                frame.y(height - DECKING_THICKNESS_FT),
                frame.width_ft * frame.scale,
                JOIST_DEPTH_FT * frame.scale,
                OUTLINE,
                StrokeStyle::dashed(2.0),
            );
        }
    }
}

fn draw_deck_slab(surface: &mut dyn DrawSurface, config: &DeckConfig, frame: &Frame, height: f32) {
    let board = config.material.board_color();
    // Rim joist band, then the decking surface on top.
    frame.fill_span(
        surface,
        0.0,
        frame.width_ft,
        height - DECKING_THICKNESS_FT - JOIST_DEPTH_FT,
        height - DECKING_THICKNESS_FT,
        LUMBER.darken(0.15),
    );
    frame.fill_span(
        surface,
        0.0,
        frame.width_ft,
        height - DECKING_THICKNESS_FT,
        height,
        board,
    );
}

fn draw_railing(surface: &mut dyn DrawSurface, config: &DeckConfig, frame: &Frame, height: f32) {
    let color = railing_color(config.railing);
    let top = height + RAILING_HEIGHT_FT;

    // Posts every 4 ft.
    let mut x = 0.0;
    while x <= frame.width_ft {
        surface.stroke_line(
            Vec2::new(frame.x(x), frame.y(height)),
            Vec2::new(frame.x(x), frame.y(top)),
            color,
            StrokeStyle::solid(3.0),
        );
        x += RAIL_POST_SPACING_FT;
    }

    // Continuous top rail bar.
    frame.fill_span(surface, 0.0, frame.width_ft, top - 0.15, top, color);

    if config.railing == RailingType::Glass {
        frame.fill_span(
            surface,
            0.0,
            frame.width_ft,
            height + 0.2,
            top - 0.2,
            deckplan_core::catalog::GLASS_PANEL_TINT,
        );
        return;
    }

    // Baluster hatching at 4" pitch, clamped for legibility.
    let pitch = (BALUSTER_PITCH_IN / 12.0 * frame.scale).max(BALUSTER_MIN_PITCH_PX);
    let mut px = frame.x(0.0) + pitch;
    let end = frame.x(frame.width_ft);
    while px < end {
        surface.stroke_line(
            Vec2::new(px, frame.y(height)),
            Vec2::new(px, frame.y(top - 0.15)),
            color,
            StrokeStyle::solid(1.0),
        );
        px += pitch;
    }
}

fn draw_stairs(surface: &mut dyn DrawSurface, config: &DeckConfig, frame: &Frame, height: f32) {
    let Some(stair) = stair_layout(config) else {
        return;
    };
    // The ladder recedes off the left or right deck edge; front/back stairs
    // are shown receding to the right.
    let leftward = config.stairs.location == StairLocation::Left;

    for i in 0..stair.step_count {
        let z = height - stair.rise_ft * (i + 1) as f32;
        let offset = stair.run_ft * i as f32;
        let (x_a, x_b) = if leftward {
            (-offset - stair.run_ft, -offset)
        } else {
            (frame.width_ft + offset, frame.width_ft + offset + stair.run_ft)
        };
        frame.fill_span(
            surface,
            x_a,
            x_b,
            z,
            z + DECKING_THICKNESS_FT,
            config.material.board_color(),
        );
        // Riser below the tread nose.
        let nose = if leftward { x_a } else { x_b };
        surface.stroke_line(
            Vec2::new(frame.x(nose), frame.y(z)),
            Vec2::new(frame.x(nose), frame.y((z - stair.rise_ft).max(0.0))),
            OUTLINE,
            StrokeStyle::solid(1.0),
        );
    }
}

fn draw_leaders(surface: &mut dyn DrawSurface, config: &DeckConfig, frame: &Frame, height: f32) {
    // Height leader beside the left edge.
    let leader_x = frame.x(0.0) - 18.0;
    surface.stroke_line(
        Vec2::new(leader_x, frame.y(0.0)),
        Vec2::new(leader_x, frame.y(height)),
        LABEL,
        StrokeStyle::solid(1.0),
    );
    surface.text(
        &fmt_feet(height),
        Vec2::new(leader_x - 6.0, frame.y(height / 2.0)),
        LABEL_SIZE,
        LABEL,
        TextAnchor::Center,
        true,
    );

    // Width leader below grade.
    let leader_y = frame.ground_y + 24.0;
    surface.stroke_line(
        Vec2::new(frame.x(0.0), leader_y),
        Vec2::new(frame.x(frame.width_ft), leader_y),
        LABEL,
        StrokeStyle::solid(1.0),
    );
    surface.text(
        &fmt_feet(config.dimensions.width as f32),
        Vec2::new(frame.x(frame.width_ft / 2.0), leader_y + 14.0),
        LABEL_SIZE,
        LABEL,
        TextAnchor::Center,
        false,
    );
}
