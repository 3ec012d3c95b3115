//! # Deckplan Core
//!
//! Core types for the Deckplan deck configurator: the parametric deck model
//! (`DeckConfig`), the material and railing catalogs (costs and colors), and
//! the validation helpers offered to config-editing front ends.
//!
//! The model is plain data. Rendering (`deckplan-render`) and estimation
//! (`deckplan-estimate`) read a `DeckConfig` snapshot and never mutate it.

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::{facade_color, railing_color, Color};
pub use config::{
    snap_dimension, BeamType, BoardPattern, BoardWidth, DeckConfig, DeckDimensions, DeckShape,
    DeckingCategory, DeckingMaterial, ExteriorFacade, RailingType, StairConfig, StairLocation,
};
pub use error::{ConfigError, Result};
