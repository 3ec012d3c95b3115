//! Material and railing catalogs.
//!
//! Immutable lookup data keyed by the config enums: per-square-foot decking
//! rates, per-linear-foot railing rates, and the schematic colors each
//! product renders with. These are module-scoped constants, never mutated.

use crate::config::{DeckingMaterial, ExteriorFacade, RailingType};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color used throughout the schematic renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same hue darkened by `amount` (0.0 = unchanged, 1.0 = black).
    pub fn darken(&self, amount: f32) -> Self {
        let k = (1.0 - amount).clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * k) as u8,
            g: (self.g as f32 * k) as u8,
            b: (self.b as f32 * k) as u8,
            a: self.a,
        }
    }

    /// Returns the same color with a replacement alpha.
    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }

    /// Parses a "#rrggbb" hex string. Malformed input falls back to a neutral
    /// gray so a bad house color never breaks a render.
    pub fn from_hex(hex: &str) -> Self {
        let clean = hex.trim().trim_start_matches('#');
        if clean.len() != 6 {
            return NEUTRAL_WALL;
        }
        match u32::from_str_radix(clean, 16) {
            Ok(value) => Self::rgb(
                ((value >> 16) & 0xff) as u8,
                ((value >> 8) & 0xff) as u8,
                (value & 0xff) as u8,
            ),
            Err(_) => NEUTRAL_WALL,
        }
    }
}

/// Fallback wall color for malformed house color strings.
pub const NEUTRAL_WALL: Color = Color::rgb(0xd5, 0xd0, 0xc8);

impl DeckingMaterial {
    /// Approximate cost per square foot of decking.
    pub fn cost_per_sqft(&self) -> f64 {
        match self {
            Self::PressureTreated => 2.5,
            Self::Cedar => 5.0,
            Self::CompositeTrex => 8.0,
            Self::CompositeTimbertech => 9.0,
            Self::CompositeDeckorators => 7.5,
            Self::CompositeWolf => 7.0,
            Self::CompositeMoistureshield => 8.5,
        }
    }

    /// Base board color for the schematic surface fill.
    pub fn board_color(&self) -> Color {
        match self {
            Self::PressureTreated => Color::rgb(0x9b, 0x7b, 0x53),
            Self::Cedar => Color::rgb(0xb0, 0x6f, 0x45),
            Self::CompositeTrex => Color::rgb(0xa5, 0x97, 0x84),
            Self::CompositeTimbertech => Color::rgb(0x8d, 0x7b, 0x6a),
            Self::CompositeDeckorators => Color::rgb(0x96, 0x86, 0x78),
            Self::CompositeWolf => Color::rgb(0x85, 0x75, 0x62),
            Self::CompositeMoistureshield => Color::rgb(0x7d, 0x6d, 0x60),
        }
    }
}

impl RailingType {
    /// Approximate installed cost per linear foot. Zero for no railing.
    pub fn cost_per_lf(&self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Wood => 15.0,
            Self::Cedar => 18.0,
            Self::Metal => 45.0,
            Self::Glass => 75.0,
        }
    }
}

/// Stroke/post color for a railing type.
pub fn railing_color(railing: RailingType) -> Color {
    match railing {
        RailingType::None => Color::rgba(0, 0, 0, 0),
        RailingType::Wood => Color::rgb(0x8b, 0x5a, 0x2b),
        RailingType::Cedar => Color::rgb(0xa0, 0x52, 0x2d),
        RailingType::Metal => Color::rgb(0x1a, 0x1a, 0x1a),
        RailingType::Glass => Color::rgb(0x4a, 0x5a, 0x66),
    }
}

/// Translucent infill tint for glass panels.
pub const GLASS_PANEL_TINT: Color = Color::rgba(128, 176, 214, 51);

/// Wall color for a facade when the config's house color is not used.
pub fn facade_color(facade: ExteriorFacade) -> Color {
    match facade {
        ExteriorFacade::Vinyl => Color::rgb(0xd5, 0xd0, 0xc8),
        ExteriorFacade::Brick => Color::rgb(0x9c, 0x4a, 0x3a),
        ExteriorFacade::Stone => Color::rgb(0x8d, 0x8a, 0x82),
        ExteriorFacade::Stucco => Color::rgb(0xd8, 0xcf, 0xc0),
        ExteriorFacade::Wood => Color::rgb(0x8b, 0x6f, 0x4b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex("#9b7b53");
        assert_eq!((c.r, c.g, c.b, c.a), (0x9b, 0x7b, 0x53, 255));
        assert_eq!(Color::from_hex("9b7b53"), c);
    }

    #[test]
    fn test_from_hex_malformed_falls_back() {
        assert_eq!(Color::from_hex("nope"), NEUTRAL_WALL);
        assert_eq!(Color::from_hex("#ff00"), NEUTRAL_WALL);
        assert_eq!(Color::from_hex(""), NEUTRAL_WALL);
    }

    #[test]
    fn test_darken() {
        let c = Color::rgb(100, 200, 50).darken(0.1);
        assert_eq!((c.r, c.g, c.b), (90, 180, 45));
        assert_eq!(Color::rgb(10, 10, 10).darken(1.0), Color::rgb(0, 0, 0));
    }

    #[test]
    fn test_decking_rates_match_catalog() {
        assert_eq!(DeckingMaterial::PressureTreated.cost_per_sqft(), 2.5);
        assert_eq!(DeckingMaterial::CompositeTimbertech.cost_per_sqft(), 9.0);
    }

    #[test]
    fn test_railing_rates() {
        assert_eq!(RailingType::None.cost_per_lf(), 0.0);
        assert_eq!(RailingType::Metal.cost_per_lf(), 45.0);
        assert_eq!(RailingType::Glass.cost_per_lf(), 75.0);
    }
}
