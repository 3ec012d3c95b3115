//! Abstract 2D drawing surface.
//!
//! The scene renderers issue immediate-mode primitives against this trait:
//! filled/stroked rectangles and polygons, circles, dashed strokes, clip
//! rectangles, aligned text, and an affine transform stack. Any host 2D
//! graphics API that covers this set can back a view.

use deckplan_core::Color;
use glam::Vec2;

/// Horizontal text anchoring relative to the given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Center,
    End,
}

/// Stroke parameters shared by all outline primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in device pixels (pre-transform).
    pub width: f32,
    /// Dash the stroke (fixed 4px on / 4px off cadence).
    pub dashed: bool,
}

impl StrokeStyle {
    /// Solid stroke of the given width.
    pub fn solid(width: f32) -> Self {
        Self {
            width,
            dashed: false,
        }
    }

    /// Dashed stroke of the given width.
    pub fn dashed(width: f32) -> Self {
        Self {
            width,
            dashed: true,
        }
    }
}

/// Immediate-mode 2D drawing primitives.
///
/// Coordinates are device pixels before the transform stack is applied.
/// Implementations must honor `save`/`restore` nesting and apply the current
/// transform to all geometry (but not to stroke widths or font sizes).
pub trait DrawSurface {
    /// Fills the whole surface, ignoring transform and clip.
    fn clear(&mut self, color: Color);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, style: StrokeStyle);

    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, style: StrokeStyle);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, style: StrokeStyle);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, style: StrokeStyle);

    /// Draws text at `pos`. `rotated` turns the baseline 90° counterclockwise
    /// (used for depth/height dimension labels).
    fn text(
        &mut self,
        text: &str,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: TextAnchor,
        rotated: bool,
    );

    /// Restricts subsequent drawing to the given rectangle until `pop_clip`.
    fn push_clip_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn pop_clip(&mut self);

    /// Pushes a copy of the current transform.
    fn save(&mut self);
    /// Pops the transform stack.
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn scale(&mut self, factor: f32);
}

/// One recorded drawing call. Mirrors the trait surface one-to-one so tests
/// can assert on exactly what a view emitted.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        style: StrokeStyle,
    },
    FillPolygon {
        points: Vec<Vec2>,
        color: Color,
    },
    StrokePolygon {
        points: Vec<Vec2>,
        color: Color,
        style: StrokeStyle,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        color: Color,
        style: StrokeStyle,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        style: StrokeStyle,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        anchor: TextAnchor,
        rotated: bool,
    },
    PushClipRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
    PopClip,
    Save,
    Restore,
    Translate {
        dx: f32,
        dy: f32,
    },
    Scale {
        factor: f32,
    },
}

/// Drawing surface that records every command instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts commands matching a predicate.
    pub fn count<F: Fn(&DrawCommand) -> bool>(&self, pred: F) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// All text strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::FillRect { x, y, w, h, color });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color, style: StrokeStyle) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            color,
            style,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, style: StrokeStyle) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color,
            style,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, style: StrokeStyle) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color,
            style,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, style: StrokeStyle) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            style,
        });
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
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            size,
            color,
            anchor,
            rotated,
        });
    }

    fn push_clip_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::PushClipRect { x, y, w, h });
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn scale(&mut self, factor: f32) {
        self.commands.push(DrawCommand::Scale { factor });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_counts() {
        let mut surface = RecordingSurface::new();
        surface.clear(Color::rgb(0, 0, 0));
        surface.fill_rect(0.0, 0.0, 10.0, 10.0, Color::rgb(1, 2, 3));
        surface.text(
            "12'",
            Vec2::new(5.0, 5.0),
            12.0,
            Color::rgb(0, 0, 0),
            TextAnchor::Center,
            false,
        );
        assert_eq!(
            surface.count(|c| matches!(c, DrawCommand::FillRect { .. })),
            1
        );
        assert_eq!(surface.texts(), vec!["12'"]);
    }
}
