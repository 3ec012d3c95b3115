//! tiny-skia backed implementation of [`DrawSurface`].
//!
//! `PixmapSurface` rasterizes the scene primitives into a `tiny_skia::Pixmap`
//! and converts the result to an `image::RgbImage` for export. Text goes
//! through rusttype with a system sans-serif face located via fontdb; when no
//! usable face exists (minimal containers), labels are skipped rather than
//! failing the render.

use std::sync::OnceLock;

use deckplan_core::{Color, DeckConfig};
use glam::Vec2;
use image::RgbImage;
use thiserror::Error;
use tiny_skia::{
    FillRule, LineCap, Mask, Paint, PathBuilder, Pixmap, Point, Stroke, StrokeDash, Transform,
};
use tracing::warn;

use crate::camera::Camera;
use crate::project::ViewMode;
use crate::scene::render_scene;
use crate::surface::{DrawSurface, StrokeStyle, TextAnchor};

/// Dash cadence for dashed strokes, in pixels.
const DASH_PATTERN: [f32; 2] = [4.0, 4.0];

/// Raster rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The requested canvas size cannot back a pixmap.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}

/// Renders one frame to an RGB image.
pub fn render_to_image(
    config: &DeckConfig,
    camera: &Camera,
    view: ViewMode,
    width: u32,
    height: u32,
) -> Result<RgbImage, RenderError> {
    let mut surface = PixmapSurface::new(width, height)?;
    render_scene(&mut surface, config, camera, view, width as f32, height as f32);
    Ok(surface.into_image())
}

/// One entry of the save/restore stack.
#[derive(Clone, Copy)]
struct TransformState {
    transform: Transform,
    /// Cumulative uniform scale, used to keep stroke widths in device pixels.
    scale: f32,
}

/// [`DrawSurface`] rasterizing into a `tiny_skia::Pixmap`.
pub struct PixmapSurface {
    pixmap: Pixmap,
    stack: Vec<TransformState>,
    clips: Vec<Mask>,
}

impl PixmapSurface {
    /// Creates a surface backing a `width` x `height` pixmap.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidCanvas { width, height })?;
        Ok(Self {
            pixmap,
            stack: vec![TransformState {
                transform: Transform::identity(),
                scale: 1.0,
            }],
            clips: Vec::new(),
        })
    }

    /// Consumes the surface, dropping alpha onto the opaque background.
    pub fn into_image(self) -> RgbImage {
        let width = self.pixmap.width();
        let height = self.pixmap.height();
        let mut image = RgbImage::new(width, height);
        for (pixel, out) in self.pixmap.pixels().iter().zip(image.pixels_mut()) {
            let c = pixel.demultiply();
            *out = image::Rgb([c.red(), c.green(), c.blue()]);
        }
        image
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn state(&self) -> TransformState {
        // The stack always holds the root state.
        *self.stack.last().unwrap_or(&TransformState {
            transform: Transform::identity(),
            scale: 1.0,
        })
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }

    fn stroke(&self, style: StrokeStyle) -> Stroke {
        Stroke {
            // Compensate for the transform's scale so widths stay in device
            // pixels at any zoom.
            width: style.width / self.state().scale.max(f32::EPSILON),
            line_cap: LineCap::Butt,
            dash: if style.dashed {
                StrokeDash::new(DASH_PATTERN.to_vec(), 0.0)
            } else {
                None
            },
            ..Stroke::default()
        }
    }

    fn fill(&mut self, path: &tiny_skia::Path, color: Color) {
        let state = self.state();
        self.pixmap.fill_path(
            path,
            &Self::paint(color),
            FillRule::Winding,
            state.transform,
            self.clips.last(),
        );
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path, color: Color, style: StrokeStyle) {
        let state = self.state();
        let stroke = self.stroke(style);
        self.pixmap.stroke_path(
            path,
            &Self::paint(color),
            &stroke,
            state.transform,
            self.clips.last(),
        );
    }

    fn rect_path(x: f32, y: f32, w: f32, h: f32) -> Option<tiny_skia::Path> {
        let rect = tiny_skia::Rect::from_xywh(x, y, w, h)?;
        Some(PathBuilder::from_rect(rect))
    }

    fn polygon_path(points: &[Vec2]) -> Option<tiny_skia::Path> {
        let (first, rest) = points.split_first()?;
        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for p in rest {
            builder.line_to(p.x, p.y);
        }
        builder.close();
        builder.finish()
    }

    fn map_point(&self, p: Vec2) -> Vec2 {
        let mut points = [Point::from_xy(p.x, p.y)];
        self.state().transform.map_points(&mut points);
        Vec2::new(points[0].x, points[0].y)
    }
}

impl DrawSurface for PixmapSurface {
    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if let Some(path) = Self::rect_path(x, y, w, h) {
            self.fill(&path, color);
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, style: StrokeStyle) {
        if let Some(path) = Self::rect_path(x, y, w, h) {
            self.stroke_path(&path, color, style);
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if let Some(path) = Self::polygon_path(points) {
            self.fill(&path, color);
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, style: StrokeStyle) {
        if let Some(path) = Self::polygon_path(points) {
            self.stroke_path(&path, color, style);
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, style: StrokeStyle) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        if let Some(path) = builder.finish() {
            self.stroke_path(&path, color, style);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let mut builder = PathBuilder::new();
        builder.push_circle(center.x, center.y, radius);
        if let Some(path) = builder.finish() {
            self.fill(&path, color);
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, style: StrokeStyle) {
        let mut builder = PathBuilder::new();
        builder.push_circle(center.x, center.y, radius);
        if let Some(path) = builder.finish() {
            self.stroke_path(&path, color, style);
        }
    }

    fn text(
        &mut self,
        text: &str,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: TextAnchor,
        rotated: bool,
    ) {
        let Some(font) = label_font() else {
            return;
        };
        let device_pos = self.map_point(pos);
        draw_text_run(&mut self.pixmap, font, text, device_pos, size, color, anchor, rotated);
    }

    fn push_clip_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let Some(path) = Self::rect_path(x, y, w, h) else {
            return;
        };
        let transform = self.state().transform;
        let mut mask = match self.clips.last() {
            Some(top) => top.clone(),
            None => {
                let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
                    return;
                };
                // Start fully open, then intersect below.
                mask.invert();
                mask
            }
        };
        mask.intersect_path(&path, FillRule::Winding, true, transform);
        self.clips.push(mask);
    }

    fn pop_clip(&mut self) {
        self.clips.pop();
    }

    fn save(&mut self) {
        let state = self.state();
        self.stack.push(state);
    }

    fn restore(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        if let Some(state) = self.stack.last_mut() {
            state.transform = state.transform.pre_translate(dx, dy);
        }
    }

    fn scale(&mut self, factor: f32) {
        if let Some(state) = self.stack.last_mut() {
            state.transform = state.transform.pre_scale(factor, factor);
            state.scale *= factor;
        }
    }
}

/// Lazily located system sans-serif face shared by all surfaces.
fn label_font() -> Option<&'static rusttype::Font<'static>> {
    static FONT: OnceLock<Option<rusttype::Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_system_font).as_ref()
}

fn load_system_font() -> Option<rusttype::Font<'static>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..fontdb::Query::default()
    };
    let id = match db.query(&query) {
        Some(id) => id,
        None => {
            warn!("no system sans-serif font found; dimension labels disabled");
            return None;
        }
    };
    db.with_face_data(id, |data, index| {
        rusttype::Font::try_from_vec_and_index(data.to_vec(), index)
    })
    .flatten()
}

#[allow(clippy::too_many_arguments)]
fn draw_text_run(
    pixmap: &mut Pixmap,
    font: &rusttype::Font<'_>,
    text: &str,
    pos: Vec2,
    size: f32,
    color: Color,
    anchor: TextAnchor,
    rotated: bool,
) {
    let scale = rusttype::Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<_> = font
        .layout(text, scale, rusttype::point(0.0, v_metrics.ascent))
        .collect();
    let run_width = glyphs
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);

    let shift = match anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Center => -run_width / 2.0,
        TextAnchor::End => -run_width,
    };
    // Center the cap height on pos vertically.
    let v_shift = -v_metrics.ascent / 2.0;

    let width = pixmap.width() as i32;
    let height = pixmap.height() as i32;
    let pixels = pixmap.pixels_mut();

    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let lx = bb.min.x as f32 + gx as f32 + shift;
            let ly = bb.min.y as f32 + gy as f32 + v_shift;
            // A rotated run reads bottom-to-top along the vertical axis.
            let (dx, dy) = if rotated { (ly, -lx) } else { (lx, ly) };
            let px = (pos.x + dx).round() as i32;
            let py = (pos.y + dy).round() as i32;
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let index = (py * width + px) as usize;
            let alpha = (color.a as f32 * coverage) as u8;
            let src = tiny_skia::ColorU8::from_rgba(color.r, color.g, color.b, alpha).premultiply();
            blend_pixel(&mut pixels[index], src);
        });
    }
}

fn blend_pixel(dst: &mut tiny_skia::PremultipliedColorU8, src: tiny_skia::PremultipliedColorU8) {
    let inv = 255 - src.alpha() as u16;
    let blend = |s: u8, d: u8| -> u8 { (s as u16 + (d as u16 * inv) / 255) as u8 };
    if let Some(out) = tiny_skia::PremultipliedColorU8::from_rgba(
        blend(src.red(), dst.red()),
        blend(src.green(), dst.green()),
        blend(src.blue(), dst.blue()),
        blend(src.alpha(), dst.alpha()),
    ) {
        *dst = out;
    }
}
