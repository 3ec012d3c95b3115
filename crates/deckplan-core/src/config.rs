//! The parametric deck model.
//!
//! `DeckConfig` is an immutable snapshot describing everything about a deck:
//! shape, dimensions, decking product, board pattern, railing, framing style,
//! stairs, and scene dressing. Editor front ends build and patch it; the
//! renderer and estimator only read it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Smallest dimension the editor may produce, in feet.
pub const DIMENSION_MIN_FT: f64 = 6.0;
/// Largest dimension the editor may produce, in feet.
pub const DIMENSION_MAX_FT: f64 = 48.0;
/// Editing grid for dimensions, in feet.
pub const DIMENSION_SNAP_FT: f64 = 0.5;

/// Overall deck footprint shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckShape {
    /// Single rectangular platform
    Rectangle,
    /// Main platform plus an offset extension on one end
    LShape,
    /// Main platform plus a centered extension
    TShape,
    /// Main platform plus a strip wrapping one additional side
    WrapAround,
}

impl DeckShape {
    /// Whether this shape carries extension dimensions.
    pub fn has_extension(&self) -> bool {
        !matches!(self, Self::Rectangle)
    }
}

impl fmt::Display for DeckShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "Rectangle"),
            Self::LShape => write!(f, "L-Shape"),
            Self::TShape => write!(f, "T-Shape"),
            Self::WrapAround => write!(f, "Wrap-Around"),
        }
    }
}

/// Railing infill style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RailingType {
    /// No railing at all
    None,
    /// Pressure-treated wood balusters
    Wood,
    /// Cedar balusters
    Cedar,
    /// Aluminum/steel picket railing
    Metal,
    /// Tempered glass panel infill
    Glass,
}

impl RailingType {
    /// Whether any railing is rendered and estimated.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for RailingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Wood => write!(f, "Wood"),
            Self::Cedar => write!(f, "Cedar"),
            Self::Metal => write!(f, "Metal"),
            Self::Glass => write!(f, "Glass"),
        }
    }
}

/// Decking product line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckingMaterial {
    PressureTreated,
    Cedar,
    CompositeTrex,
    CompositeTimbertech,
    CompositeDeckorators,
    CompositeWolf,
    CompositeMoistureshield,
}

/// Broad decking family, derived from the product line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeckingCategory {
    Wood,
    Composite,
}

impl DeckingMaterial {
    /// Wood vs composite family.
    pub fn category(&self) -> DeckingCategory {
        match self {
            Self::PressureTreated | Self::Cedar => DeckingCategory::Wood,
            _ => DeckingCategory::Composite,
        }
    }
}

impl fmt::Display for DeckingMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PressureTreated => write!(f, "pressure-treated"),
            Self::Cedar => write!(f, "cedar"),
            Self::CompositeTrex => write!(f, "composite-trex"),
            Self::CompositeTimbertech => write!(f, "composite-timbertech"),
            Self::CompositeDeckorators => write!(f, "composite-deckorators"),
            Self::CompositeWolf => write!(f, "composite-wolf"),
            Self::CompositeMoistureshield => write!(f, "composite-moistureshield"),
        }
    }
}

/// Nominal decking board width.
///
/// Serialized as the original numeric strings ("5.5" / "3.5") so configs
/// round-trip with existing front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardWidth {
    /// 5.5" face (nominal 6")
    #[serde(rename = "5.5")]
    #[default]
    Wide,
    /// 3.5" face (nominal 4")
    #[serde(rename = "3.5")]
    Narrow,
}

impl BoardWidth {
    /// Actual board face width in inches.
    pub fn inches(&self) -> f64 {
        match self {
            Self::Wide => 5.5,
            Self::Narrow => 3.5,
        }
    }

    /// Board face width in feet.
    pub fn feet(&self) -> f64 {
        self.inches() / 12.0
    }
}

impl FromStr for BoardWidth {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5.5" => Ok(Self::Wide),
            "3.5" => Ok(Self::Narrow),
            other => Err(ConfigError::UnknownBoardWidth(other.to_string())),
        }
    }
}

impl fmt::Display for BoardWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wide => write!(f, "5.5"),
            Self::Narrow => write!(f, "3.5"),
        }
    }
}

/// Decking board laying pattern.
///
/// Only `Standard` and `Diagonal` have distinct rendering; `Herringbone` and
/// `PictureFrame` currently draw as `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardPattern {
    Standard,
    Diagonal,
    Herringbone,
    PictureFrame,
}

/// Beam construction style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BeamType {
    /// Doubled dimensional lumber below the joists
    Dropped,
    /// Engineered (LVL) beam set level with the joist tops
    Flush,
}

/// Which deck edge the stairs leave from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StairLocation {
    None,
    Front,
    Back,
    Left,
    Right,
}

/// House exterior finish for the elevation/isometric scene dressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExteriorFacade {
    Vinyl,
    Brick,
    Stone,
    Stucco,
    Wood,
}

/// Stair configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StairConfig {
    pub location: StairLocation,
    /// Stair width in feet.
    pub width: f64,
}

impl StairConfig {
    /// Whether a stair run exists.
    pub fn is_present(&self) -> bool {
        !matches!(self.location, StairLocation::None)
    }
}

/// Deck dimensions in feet.
///
/// `height` is the clearance of the deck surface above grade. Extension
/// fields are present iff the shape requires them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDimensions {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_depth: Option<f64>,
}

/// Full parametric deck description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckConfig {
    pub shape: DeckShape,
    pub dimensions: DeckDimensions,
    pub material: DeckingMaterial,
    pub board_width: BoardWidth,
    pub board_pattern: BoardPattern,
    pub railing: RailingType,
    pub beam_type: BeamType,
    pub stairs: StairConfig,
    /// True when one width edge bolts to the house via a ledger board. That
    /// edge gets no railing and no outer joist support.
    pub ledger_attached: bool,
    pub has_house: bool,
    pub exterior_facade: ExteriorFacade,
    /// Hex color of the house wall, e.g. "#d5d0c8".
    pub house_color: String,
    pub patio_door: bool,
    pub show_grass: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            shape: DeckShape::Rectangle,
            dimensions: DeckDimensions {
                width: 12.0,
                depth: 10.0,
                height: 3.0,
                extension_width: None,
                extension_depth: None,
            },
            material: DeckingMaterial::PressureTreated,
            board_width: BoardWidth::Wide,
            board_pattern: BoardPattern::Standard,
            railing: RailingType::Metal,
            beam_type: BeamType::Dropped,
            stairs: StairConfig {
                location: StairLocation::Front,
                width: 4.0,
            },
            ledger_attached: true,
            has_house: true,
            exterior_facade: ExteriorFacade::Vinyl,
            house_color: "#d5d0c8".to_string(),
            patio_door: false,
            show_grass: false,
        }
    }
}

impl DeckConfig {
    /// Checks the invariants the rendering and estimation cores assume.
    ///
    /// Both cores treat a valid config as a precondition rather than checking
    /// at runtime, so editors should call this before handing a config over.
    pub fn validate(&self) -> crate::error::Result<()> {
        let d = &self.dimensions;
        for (name, value) in [("width", d.width), ("depth", d.depth), ("height", d.height)] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveDimension { name, value });
            }
        }
        for (name, value) in [("width", d.width), ("depth", d.depth)] {
            if !(DIMENSION_MIN_FT..=DIMENSION_MAX_FT).contains(&value) {
                return Err(ConfigError::DimensionOutOfRange {
                    name,
                    value,
                    min: DIMENSION_MIN_FT,
                    max: DIMENSION_MAX_FT,
                });
            }
        }
        match self.shape {
            DeckShape::LShape | DeckShape::TShape => {
                if d.extension_width.is_none() || d.extension_depth.is_none() {
                    return Err(ConfigError::MissingExtension {
                        shape: "L/T-shape",
                    });
                }
            }
            DeckShape::WrapAround => {
                if d.extension_depth.is_none() {
                    return Err(ConfigError::MissingExtension {
                        shape: "wrap-around",
                    });
                }
            }
            DeckShape::Rectangle => {}
        }
        if self.stairs.is_present() && self.stairs.width <= 0.0 {
            return Err(ConfigError::NonPositiveStairWidth(self.stairs.width));
        }
        Ok(())
    }
}

/// Snaps an edited dimension onto the 0.5 ft grid and clamps it into the
/// supported [6, 48] ft range.
pub fn snap_dimension(value: f64) -> f64 {
    let snapped = (value / DIMENSION_SNAP_FT).round() * DIMENSION_SNAP_FT;
    snapped.clamp(DIMENSION_MIN_FT, DIMENSION_MAX_FT)
}
