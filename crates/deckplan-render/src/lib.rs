//! # Deckplan Render
//!
//! Schematic rendering of a parametric deck into four views: top-down
//! surface, structural framing, side elevation, and an isometric 3D view
//! with camera controls.
//!
//! ## Architecture
//!
//! ```text
//! DeckConfig ──► Projection (fit scale/offset per view)
//!                   │
//! Camera ───────────┤ (pan/zoom affine; rotation folds into isometric math)
//!                   ▼
//!               Scene renderer (per-view composition)
//!                   ▼
//!               DrawSurface (abstract 2D primitives)
//!                   ├── PixmapSurface (tiny-skia raster -> image::RgbImage)
//!                   └── RecordingSurface (command log, used by tests)
//! ```
//!
//! Every view is a pure function of `(DeckConfig, Camera, canvas size)`; the
//! only mutable state is the `Camera`, owned by the interaction controller.

pub mod camera;
pub mod project;
pub mod scene;
pub mod skia;
pub mod surface;
pub mod views;

pub use camera::{Camera, InteractionController, Modifiers, PointerButton, PointerEvent};
pub use project::{footprint_extent, footprint_rects, Projection, RectF, ViewMode};
pub use scene::render_scene;
pub use skia::{render_to_image, PixmapSurface, RenderError};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, StrokeStyle, TextAnchor};
