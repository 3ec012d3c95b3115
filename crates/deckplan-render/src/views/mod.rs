//! Per-view scene composition.
//!
//! Each view is a stateless function over `(DeckConfig, Projection)`; shared
//! sub-routines (board fill, railing instancing, stair treads, labels) live
//! in [`parts`].

pub mod elevation;
pub mod framing;
pub mod isometric;
pub mod parts;
pub mod plan;

use deckplan_core::Color;

/// Canvas background.
pub const BACKGROUND: Color = Color::rgb(0xf8, 0xfa, 0xfc);
/// Deck outline / seam stroke.
pub const OUTLINE: Color = Color::rgb(0x4f, 0x3f, 0x2e);
/// Dimension label text.
pub const LABEL: Color = Color::rgb(0x33, 0x41, 0x55);
/// Dimensional framing lumber.
pub const LUMBER: Color = Color::rgb(0xd2, 0xb4, 0x8c);
/// Ledger board.
pub const LEDGER: Color = Color::rgb(0x8b, 0x6f, 0x47);
/// Support post.
pub const POST: Color = Color::rgb(0x8b, 0x73, 0x55);
/// Footing indicator.
pub const FOOTING: Color = Color::rgb(0x9c, 0xa3, 0xaf);
/// Ground line.
pub const GROUND: Color = Color::rgb(0x6b, 0x72, 0x80);
/// Grass band.
pub const GRASS: Color = Color::rgb(0x7a, 0xa8, 0x5c);

/// Label font size in pixels.
pub const LABEL_SIZE: f32 = 12.0;

/// Formats a feet value for a dimension label ("12'" or "12.5'").
pub fn fmt_feet(value: f32) -> String {
    if value.fract().abs() < 1e-4 {
        format!("{}'", value as i64)
    } else {
        format!("{:.1}'", value)
    }
}
