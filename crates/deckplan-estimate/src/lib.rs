//! # Deckplan Estimate
//!
//! Material quantity and cost estimation for a parametric deck. The whole
//! crate is a pure function: `estimate(&DeckConfig) -> MaterialList`. The
//! list is recomputed from scratch on every call; there is no caching.
//!
//! ## Components
//!
//! - **Estimator**: decking, framing, posts, footings, ledger, railing,
//!   stairs, and hardware line items with per-item and aggregate costs.
//! - **Lumber-cut optimizer**: maps required member lengths onto standard
//!   stock lengths (8/10/12/16 ft).
//!
//! Two documented approximations are preserved on purpose (see the module
//! docs in [`estimate`] and [`cuts`]): the equivalent-square perimeter for
//! non-rectangular shapes and the 16 ft stock fallback for longer spans.

pub mod cuts;
pub mod estimate;

pub use cuts::{optimize_lumber_cuts, CutPlan, STANDARD_LUMBER_LENGTHS};
pub use estimate::{deck_area, deck_perimeter, estimate, MaterialItem, MaterialList};
