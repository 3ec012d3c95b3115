//! Error handling for Deckplan.
//!
//! The rendering and estimation cores are total functions over a well-formed
//! `DeckConfig`; the only fallible surface is config editing. These errors
//! back the `DeckConfig::validate` contract offered to editor front ends.

use thiserror::Error;

/// Configuration validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A primary dimension is zero or negative
    #[error("Dimension {name} must be positive, got {value}")]
    NonPositiveDimension {
        /// Which dimension failed.
        name: &'static str,
        /// The rejected value in feet.
        value: f64,
    },

    /// A dimension falls outside the supported editing range
    #[error("Dimension {name} must be between {min} and {max} feet, got {value}")]
    DimensionOutOfRange {
        /// Which dimension failed.
        name: &'static str,
        /// The rejected value in feet.
        value: f64,
        /// Lower bound in feet.
        min: f64,
        /// Upper bound in feet.
        max: f64,
    },

    /// The shape requires extension dimensions that are missing
    #[error("Shape {shape} requires extension dimensions")]
    MissingExtension {
        /// Display name of the shape.
        shape: &'static str,
    },

    /// A board width string could not be parsed
    #[error("Unknown board width: {0}")]
    UnknownBoardWidth(String),

    /// Stairs are enabled but the stair width is not positive
    #[error("Stair width must be positive, got {0}")]
    NonPositiveStairWidth(f64),
}

/// Result alias for config-level operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
