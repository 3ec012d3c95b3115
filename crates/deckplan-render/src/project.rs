//! Projection engine.
//!
//! Maps 3D feet-space deck geometry into device pixels for each view. The
//! three orthographic views (surface, framing, elevation) use a uniform
//! fit-to-canvas scale; the isometric view rotates points about the vertical
//! axis and projects them with the classic 30° dimetric formula, solving
//! scale and offset from the projected bounding volume.
//!
//! Precondition: `width, depth > 0` (see `DeckConfig::validate`). Zero
//! dimensions would produce a degenerate scale; this is the caller's
//! contract, not a runtime-checked error.

use deckplan_core::{DeckConfig, DeckShape, StairLocation};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Canvas padding reserved on every side, in pixels.
pub const VIEW_PADDING: f32 = 40.0;
/// House wall rise above the deck surface in the dressed views, in feet.
pub const HOUSE_WALL_RISE_FT: f32 = 10.0;
/// Guard railing height above the deck surface, in feet.
pub const RAILING_HEIGHT_FT: f32 = 3.0;
/// Extra vertical feet reserved below grade in the elevation view.
pub const GRADE_CLEARANCE_FT: f32 = 1.0;
/// Code-maximum stair rise per step, in inches.
pub const MAX_RISE_PER_STEP_IN: f32 = 7.5;
/// Horizontal tread run per step, in inches.
pub const TREAD_RUN_IN: f32 = 10.0;

const COS_30: f32 = 0.866_025_4;
const SIN_30: f32 = 0.5;

/// The four schematic views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Top-down decking surface
    Surface,
    /// Top-down structural framing
    Framing,
    /// Side elevation
    Elevation,
    /// Rotatable isometric 3D
    Isometric,
}

impl ViewMode {
    /// True for the three flat views that share the orthographic fit.
    pub fn is_orthographic(&self) -> bool {
        !matches!(self, Self::Isometric)
    }
}

/// Axis-aligned rectangle in feet-space (plan coordinates, y toward the
/// viewer, the ledger/house edge at y = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Corner points, clockwise from top-left.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }
}

/// Fitted scale and device offset for one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Pixels per foot.
    pub scale: f32,
    /// Device-pixel offset applied after scaling.
    pub offset: Vec2,
}

impl Projection {
    /// Maps a plan-space point (feet) to device pixels (orthographic views).
    pub fn plan_to_px(&self, p: Vec2) -> Vec2 {
        p * self.scale + self.offset
    }
}

/// Plan-space footprint decomposed into axis-aligned rectangles. The first
/// rect is always the main platform; extensions follow.
pub fn footprint_rects(config: &DeckConfig) -> Vec<RectF> {
    let d = &config.dimensions;
    let w = d.width as f32;
    let depth = d.depth as f32;
    let main = RectF::new(0.0, 0.0, w, depth);

    match config.shape {
        DeckShape::Rectangle => vec![main],
        DeckShape::LShape => {
            let ew = d.extension_width.unwrap_or(d.width / 2.0) as f32;
            let ed = d.extension_depth.unwrap_or(6.0) as f32;
            vec![main, RectF::new(0.0, depth, ew, ed)]
        }
        DeckShape::TShape => {
            let ew = d.extension_width.unwrap_or(d.width / 2.0) as f32;
            let ed = d.extension_depth.unwrap_or(6.0) as f32;
            vec![main, RectF::new((w - ew) / 2.0, depth, ew, ed)]
        }
        DeckShape::WrapAround => {
            let ed = d.extension_depth.unwrap_or(6.0) as f32;
            vec![main, RectF::new(w, 0.0, ed, depth)]
        }
    }
}

/// Plan footprint extent in feet (width, depth axes).
pub fn footprint_extent(config: &DeckConfig) -> (f32, f32) {
    let rects = footprint_rects(config);
    let fw = rects.iter().map(RectF::right).fold(0.0f32, f32::max);
    let fh = rects.iter().map(RectF::bottom).fold(0.0f32, f32::max);
    (fw, fh)
}

/// Stair run geometry shared by the plan, elevation, and isometric views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StairLayout {
    pub step_count: u32,
    /// Rise per step in feet.
    pub rise_ft: f32,
    /// Run per step in feet.
    pub run_ft: f32,
    /// Plan-space corner where the first tread meets the deck edge.
    pub edge_start: Vec2,
    /// Unit vector pointing away from the deck.
    pub out_dir: Vec2,
    /// Unit vector along the deck edge (across the stair width).
    pub along_dir: Vec2,
    /// Stair width in feet.
    pub width_ft: f32,
}

impl StairLayout {
    /// Total horizontal run of the stair in feet.
    pub fn total_run_ft(&self) -> f32 {
        self.step_count as f32 * self.run_ft
    }
}

/// Computes the stair layout off the main platform edge, or `None` when the
/// config has no stairs.
pub fn stair_layout(config: &DeckConfig) -> Option<StairLayout> {
    if !config.stairs.is_present() {
        return None;
    }
    let d = &config.dimensions;
    let w = d.width as f32;
    let depth = d.depth as f32;
    let height = d.height as f32;
    let sw = config.stairs.width as f32;

    let step_count = ((height * 12.0) / MAX_RISE_PER_STEP_IN).ceil().max(1.0) as u32;
    let rise_ft = height / step_count as f32;
    let run_ft = TREAD_RUN_IN / 12.0;

    let (edge_start, out_dir, along_dir) = match config.stairs.location {
        StairLocation::Front => (
            Vec2::new((w - sw) / 2.0, depth),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
        ),
        StairLocation::Back => (
            Vec2::new((w - sw) / 2.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
        ),
        StairLocation::Left => (
            Vec2::new(0.0, (depth - sw) / 2.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ),
        StairLocation::Right => (
            Vec2::new(w, (depth - sw) / 2.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ),
        StairLocation::None => unreachable!(),
    };

    Some(StairLayout {
        step_count,
        rise_ft,
        run_ft,
        edge_start,
        out_dir,
        along_dir,
        width_ft: sw,
    })
}

/// Vertical feet the elevation view must fit: grade clearance below the
/// ground line, deck height, and whatever rises above the surface.
pub fn elevation_extent(config: &DeckConfig) -> (f32, f32) {
    let d = &config.dimensions;
    let mut feet_h = d.height as f32 + GRADE_CLEARANCE_FT;
    if config.has_house {
        feet_h += HOUSE_WALL_RISE_FT;
    }
    if config.railing.is_present() {
        feet_h += RAILING_HEIGHT_FT;
    }
    (d.width as f32, feet_h)
}

/// Computes the fitted projection for a view.
pub fn fit(
    config: &DeckConfig,
    canvas_w: f32,
    canvas_h: f32,
    view: ViewMode,
    rotation_deg: f32,
) -> Projection {
    match view {
        ViewMode::Surface | ViewMode::Framing => {
            let (fw, fh) = footprint_extent(config);
            orthographic_fit(fw, fh, canvas_w, canvas_h)
        }
        ViewMode::Elevation => {
            let (fw, fh) = elevation_extent(config);
            orthographic_fit(fw, fh, canvas_w, canvas_h)
        }
        ViewMode::Isometric => isometric_fit(config, canvas_w, canvas_h, rotation_deg),
    }
}

fn orthographic_fit(feet_w: f32, feet_h: f32, canvas_w: f32, canvas_h: f32) -> Projection {
    let available_w = canvas_w - 2.0 * VIEW_PADDING;
    let available_h = canvas_h - 2.0 * VIEW_PADDING;
    let scale = (available_w / feet_w).min(available_h / feet_h);
    Projection {
        scale,
        offset: Vec2::new(
            (canvas_w - feet_w * scale) / 2.0,
            (canvas_h - feet_h * scale) / 2.0,
        ),
    }
}

/// Projects a 3D feet-space point into device pixels for the isometric view.
///
/// The point is rotated about the vertical axis first (the rotation lives in
/// the horizontal plane; z is invariant), then run through the 30° dimetric
/// formula and the fitted scale/offset.
pub fn iso_project(p: Vec3, rotation_deg: f32, proj: &Projection) -> Vec2 {
    let raw = iso_raw(p, rotation_deg);
    raw * proj.scale + proj.offset
}

/// Unit-scale dimetric projection of a rotated point.
fn iso_raw(p: Vec3, rotation_deg: f32) -> Vec2 {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let xr = p.x * cos - p.y * sin;
    let yr = p.x * sin + p.y * cos;
    Vec2::new((xr - yr) * COS_30, (xr + yr) * SIN_30 - p.z)
}

/// Every feet-space point that must stay on screen in the isometric view:
/// the deck + railing volume corners, the stair envelope, and the top of the
/// house wall.
fn iso_bounds_points(config: &DeckConfig) -> Vec<Vec3> {
    let height = config.dimensions.height as f32;
    let top = if config.railing.is_present() {
        height + RAILING_HEIGHT_FT
    } else {
        height
    };

    let mut points = Vec::new();
    for rect in footprint_rects(config) {
        for corner in rect.corners() {
            points.push(corner.extend(0.0));
            points.push(corner.extend(top));
        }
    }

    if let Some(stair) = stair_layout(config) {
        let far = stair.edge_start + stair.out_dir * stair.total_run_ft();
        for p in [
            stair.edge_start,
            stair.edge_start + stair.along_dir * stair.width_ft,
            far,
            far + stair.along_dir * stair.width_ft,
        ] {
            points.push(p.extend(0.0));
            points.push(p.extend(height));
        }
    }

    if config.has_house {
        let w = config.dimensions.width as f32;
        points.push(Vec3::new(0.0, 0.0, height + HOUSE_WALL_RISE_FT));
        points.push(Vec3::new(w, 0.0, height + HOUSE_WALL_RISE_FT));
    }

    points
}

/// Solves the isometric scale and offset: project the bounding volume at
/// unit scale, fit the padded canvas, center horizontally, and anchor the
/// lowest projected point to the bottom margin so the structure reads as
/// grounded rather than floating mid-canvas.
fn isometric_fit(config: &DeckConfig, canvas_w: f32, canvas_h: f32, rotation_deg: f32) -> Projection {
    let mut min = Vec2::splat(f32::MAX);
    let mut max = Vec2::splat(f32::MIN);
    for p in iso_bounds_points(config) {
        let raw = iso_raw(p, rotation_deg);
        min = min.min(raw);
        max = max.max(raw);
    }

    let extent = max - min;
    let available_w = canvas_w - 2.0 * VIEW_PADDING;
    let available_h = canvas_h - 2.0 * VIEW_PADDING;
    let scale = (available_w / extent.x).min(available_h / extent.y);

    let offset_x = (canvas_w - extent.x * scale) / 2.0 - min.x * scale;
    let offset_y = (canvas_h - VIEW_PADDING) - max.y * scale;

    Projection {
        scale,
        offset: Vec2::new(offset_x, offset_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckplan_core::DeckConfig;

    fn config() -> DeckConfig {
        DeckConfig::default()
    }

    #[test]
    fn test_footprint_extent_rectangle() {
        assert_eq!(footprint_extent(&config()), (12.0, 10.0));
    }

    #[test]
    fn test_footprint_extent_l_shape() {
        let mut c = config();
        c.shape = DeckShape::LShape;
        c.dimensions.extension_width = Some(6.0);
        c.dimensions.extension_depth = Some(8.0);
        assert_eq!(footprint_extent(&c), (12.0, 18.0));
    }

    #[test]
    fn test_footprint_extent_wrap_around() {
        let mut c = config();
        c.shape = DeckShape::WrapAround;
        c.dimensions.extension_depth = Some(6.0);
        assert_eq!(footprint_extent(&c), (18.0, 10.0));
    }

    #[test]
    fn test_orthographic_fit_stays_inside_padding() {
        for (w, h) in [(800.0, 600.0), (300.0, 900.0), (1920.0, 1080.0)] {
            let proj = fit(&config(), w, h, ViewMode::Surface, 0.0);
            let (fw, fh) = footprint_extent(&config());
            assert!(proj.scale * fw.max(fh) <= (w - 2.0 * VIEW_PADDING).max(h - 2.0 * VIEW_PADDING) + 0.001);
            assert!(proj.scale * fw <= w - 2.0 * VIEW_PADDING + 0.001);
            assert!(proj.scale * fh <= h - 2.0 * VIEW_PADDING + 0.001);
        }
    }

    #[test]
    fn test_elevation_extent_reserves_house_and_railing() {
        let c = config(); // house + metal railing, height 3
        let (fw, fh) = elevation_extent(&c);
        assert_eq!(fw, 12.0);
        assert_eq!(fh, 3.0 + 1.0 + 10.0 + 3.0);

        let mut bare = config();
        bare.has_house = false;
        bare.railing = deckplan_core::RailingType::None;
        assert_eq!(elevation_extent(&bare).1, 4.0);
    }

    #[test]
    fn test_iso_rotation_is_periodic() {
        let proj = Projection {
            scale: 7.0,
            offset: Vec2::new(13.0, 29.0),
        };
        let p = Vec3::new(3.5, 8.0, 2.0);
        for angle in [0.0f32, 33.0, 147.5, 301.0] {
            let a = iso_project(p, angle, &proj);
            let b = iso_project(p, angle + 360.0, &proj);
            assert!((a - b).length() < 1e-3, "angle {}: {:?} vs {:?}", angle, a, b);
        }
    }

    #[test]
    fn test_iso_z_is_rotation_invariant() {
        // Rotating must not change how height projects: the vertical delta
        // between a point and the same point raised by dz is always dz*scale.
        let proj = Projection {
            scale: 5.0,
            offset: Vec2::ZERO,
        };
        for angle in [0.0f32, 45.0, 90.0, 210.0] {
            let base = iso_project(Vec3::new(4.0, 6.0, 0.0), angle, &proj);
            let raised = iso_project(Vec3::new(4.0, 6.0, 2.0), angle, &proj);
            assert!((base.x - raised.x).abs() < 1e-4);
            assert!((base.y - raised.y - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_isometric_fit_anchors_bottom() {
        let c = config();
        let (w, h) = (800.0, 600.0);
        let proj = fit(&c, w, h, ViewMode::Isometric, 25.0);
        let max_y = iso_bounds_points(&c)
            .into_iter()
            .map(|p| iso_project(p, 25.0, &proj).y)
            .fold(f32::MIN, f32::max);
        assert!((max_y - (h - VIEW_PADDING)).abs() < 0.5);
    }

    #[test]
    fn test_isometric_fit_contains_all_bounds_points() {
        let c = config();
        let (w, h) = (640.0, 480.0);
        let proj = fit(&c, w, h, ViewMode::Isometric, 40.0);
        for p in iso_bounds_points(&c) {
            let px = iso_project(p, 40.0, &proj);
            assert!(px.x >= VIEW_PADDING - 0.5 && px.x <= w - VIEW_PADDING + 0.5);
            assert!(px.y <= h - VIEW_PADDING + 0.5);
        }
    }

    #[test]
    fn test_stair_layout_front() {
        let stair = stair_layout(&config()).unwrap();
        // height 3' = 36" -> 5 steps
        assert_eq!(stair.step_count, 5);
        assert_eq!(stair.edge_start, Vec2::new(4.0, 10.0));
        assert_eq!(stair.out_dir, Vec2::new(0.0, 1.0));
        assert!((stair.rise_ft - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_stair_layout_absent() {
        let mut c = config();
        c.stairs.location = StairLocation::None;
        assert!(stair_layout(&c).is_none());
    }
}
