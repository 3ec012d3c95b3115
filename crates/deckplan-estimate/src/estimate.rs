//! The material estimator.
//!
//! Derives a full bill of materials from a `DeckConfig`. All formulas are
//! deterministic and total over well-formed configs; out-of-range dimensions
//! are a caller precondition (`DeckConfig::validate`), not a handled error.
//!
//! Non-rectangular perimeters use an equivalent-square approximation
//! (`4 * sqrt(area)`, scaled 0.75 when ledger-attached). This is knowingly
//! inexact and preserved as-is; downstream cost expectations depend on it.

use deckplan_core::{BeamType, DeckConfig, DeckShape};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cuts::optimize_lumber_cuts;

/// Joist on-center spacing in inches.
const JOIST_SPACING_IN: f64 = 16.0;
/// Beam and post spacing in feet.
const POST_SPACING_FT: f64 = 6.0;
/// Maximum stair rise per step in inches.
const MAX_RISE_PER_STEP_IN: f64 = 7.5;
/// Dimensional lumber (2x8) cost per foot of stock.
const DIMENSIONAL_COST_PER_FT: f64 = 1.5;
/// Engineered (LVL) beam cost per foot of stock.
const LVL_COST_PER_FT: f64 = 6.0;

/// One line of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialItem {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub unit: String,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// Complete bill of materials for one config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialList {
    pub items: Vec<MaterialItem>,
    pub total_cost: f64,
    pub notes: Vec<String>,
}

impl MaterialList {
    /// Finds a line item by name.
    pub fn item(&self, name: &str) -> Option<&MaterialItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

/// Deck surface area in square feet, including shape extensions.
pub fn deck_area(config: &DeckConfig) -> f64 {
    let d = &config.dimensions;
    let primary = d.width * d.depth;
    match config.shape {
        DeckShape::LShape | DeckShape::TShape => {
            match (d.extension_width, d.extension_depth) {
                (Some(ew), Some(ed)) if ew > 0.0 && ed > 0.0 => primary + ew * ed,
                _ => primary,
            }
        }
        DeckShape::WrapAround => {
            // Wrap-around adds a strip along one additional side.
            let extra = d.extension_depth.unwrap_or(6.0);
            primary + extra * d.depth
        }
        DeckShape::Rectangle => primary,
    }
}

/// Railing perimeter in linear feet.
///
/// Exact for rectangles (the ledger edge is excluded when attached). Other
/// shapes use the equivalent-square approximation described in the module
/// docs; do not treat it as authoritative for purchase-critical lengths.
pub fn deck_perimeter(config: &DeckConfig) -> f64 {
    let w = config.dimensions.width;
    let d = config.dimensions.depth;

    if config.shape == DeckShape::Rectangle {
        return if config.ledger_attached {
            w + 2.0 * d
        } else {
            2.0 * w + 2.0 * d
        };
    }

    let equivalent_side = deck_area(config).sqrt();
    let perim = equivalent_side * 4.0;
    if config.ledger_attached {
        perim * 0.75
    } else {
        perim
    }
}

/// Computes the full bill of materials for a deck configuration.
pub fn estimate(config: &DeckConfig) -> MaterialList {
    let area = deck_area(config);
    let perimeter = deck_perimeter(config);
    debug!(area, perimeter, shape = %config.shape, "estimating materials");

    let mut items: Vec<MaterialItem> = Vec::new();
    let mut notes: Vec<String> = Vec::new();

    let dims = &config.dimensions;

    // Decking boards
    let waste_factor = if config.board_pattern == deckplan_core::BoardPattern::Diagonal {
        1.15
    } else {
        1.10
    };
    let decking_sqft = (area * waste_factor).ceil();
    let rate = config.material.cost_per_sqft();
    items.push(MaterialItem {
        name: "Decking boards".to_string(),
        description: format!("{} {}\" wide", config.material, config.board_width),
        quantity: decking_sqft as u32,
        unit: "sq ft".to_string(),
        unit_cost: rate,
        total_cost: decking_sqft * rate,
    });

    // Joists
    let joist_count = ((dims.width * 12.0) / JOIST_SPACING_IN).ceil() as u32 + 1;
    let joist_length = dims.depth;
    let joist_plan = optimize_lumber_cuts(joist_length, joist_count);
    items.push(MaterialItem {
        name: "Joists (2x8)".to_string(),
        description: format!(
            "{}' long, {}\" on center (optimized from {}' stock)",
            joist_length, JOIST_SPACING_IN, joist_plan.selected_length
        ),
        quantity: joist_count,
        unit: "each".to_string(),
        unit_cost: joist_plan.selected_length * DIMENSIONAL_COST_PER_FT,
        total_cost: joist_count as f64 * joist_plan.selected_length * DIMENSIONAL_COST_PER_FT,
    });

    // Beams
    let is_flush = config.beam_type == BeamType::Flush;
    let beam_count = (dims.depth / POST_SPACING_FT).ceil() as u32 + 1;
    let beam_plan = optimize_lumber_cuts(dims.width, beam_count);

    if is_flush {
        // Engineered beam sits level with the joists; needs concealed hangers.
        items.push(MaterialItem {
            name: "Engineered beam (LVL)".to_string(),
            description: format!(
                "Flush mount, {}' span ({}' stock)",
                dims.width, beam_plan.selected_length
            ),
            quantity: beam_count,
            unit: "each".to_string(),
            unit_cost: beam_plan.selected_length * LVL_COST_PER_FT,
            total_cost: beam_count as f64 * beam_plan.selected_length * LVL_COST_PER_FT,
        });
        items.push(MaterialItem {
            name: "Beam hangers (flush mount)".to_string(),
            description: "Simpson or equivalent concealed hanger".to_string(),
            quantity: beam_count * 2,
            unit: "each".to_string(),
            unit_cost: 18.0,
            total_cost: (beam_count * 2) as f64 * 18.0,
        });
    } else {
        items.push(MaterialItem {
            name: "Beam boards (2x8)".to_string(),
            description: format!(
                "Doubled, {}' span ({}' stock)",
                dims.width, beam_plan.selected_length
            ),
            quantity: beam_count * 2,
            unit: "each".to_string(),
            unit_cost: beam_plan.selected_length * DIMENSIONAL_COST_PER_FT,
            total_cost: (beam_count * 2) as f64
                * beam_plan.selected_length
                * DIMENSIONAL_COST_PER_FT,
        });
    }

    // Posts
    let posts_per_beam = (dims.width / POST_SPACING_FT).ceil() as u32 + 1;
    let total_posts = posts_per_beam * beam_count;
    let post_length = dims.height + 2.0; // 2' buried for the footing
    items.push(MaterialItem {
        name: "Support posts (4x4)".to_string(),
        description: format!("{}' long", post_length),
        quantity: total_posts,
        unit: "each".to_string(),
        unit_cost: post_length * 2.0,
        total_cost: total_posts as f64 * post_length * 2.0,
    });

    // Concrete footings
    items.push(MaterialItem {
        name: "Concrete footings".to_string(),
        description: "Pre-mixed 60lb bags (2 per post)".to_string(),
        quantity: total_posts * 2,
        unit: "bags".to_string(),
        unit_cost: 6.0,
        total_cost: (total_posts * 2) as f64 * 6.0,
    });

    // Ledger board
    if config.ledger_attached {
        let ledger_length = optimize_lumber_cuts(dims.width, 1).selected_length;
        items.push(MaterialItem {
            name: "Ledger board (2x8)".to_string(),
            description: format!(
                "{}' long, lag bolted to house ({}' stock)",
                dims.width, ledger_length
            ),
            quantity: 1,
            unit: "each".to_string(),
            unit_cost: ledger_length * DIMENSIONAL_COST_PER_FT,
            total_cost: ledger_length * DIMENSIONAL_COST_PER_FT,
        });
    }

    // Railing
    if config.railing.is_present() {
        let railing_lf = perimeter.ceil() as u32;
        let rail_rate = config.railing.cost_per_lf();
        items.push(MaterialItem {
            name: "Railing".to_string(),
            description: format!("{} railing", config.railing).to_lowercase(),
            quantity: railing_lf,
            unit: "linear ft".to_string(),
            unit_cost: rail_rate,
            total_cost: railing_lf as f64 * rail_rate,
        });
    }

    // Stairs
    if config.stairs.is_present() {
        let step_count = ((dims.height * 12.0) / MAX_RISE_PER_STEP_IN).ceil() as u32;
        let stringer_count = (config.stairs.width / 1.5).ceil() as u32 + 1;

        items.push(MaterialItem {
            name: "Stair stringers (2x12)".to_string(),
            description: format!("{} steps", step_count),
            quantity: stringer_count,
            unit: "each".to_string(),
            unit_cost: 25.0,
            total_cost: stringer_count as f64 * 25.0,
        });

        let tread_cost = config.stairs.width * rate;
        items.push(MaterialItem {
            name: "Stair treads".to_string(),
            description: format!("{}' wide", config.stairs.width),
            quantity: step_count * 2, // two boards per tread
            unit: "each".to_string(),
            unit_cost: tread_cost,
            total_cost: (step_count * 2) as f64 * tread_cost,
        });
    }

    // Hardware
    let screw_boxes = (area / 100.0).ceil() as u32; // ~1 box per 100 sqft
    items.push(MaterialItem {
        name: "Deck screws (5lb box)".to_string(),
        description: "Coated deck screws".to_string(),
        quantity: screw_boxes,
        unit: "boxes".to_string(),
        unit_cost: 45.0,
        total_cost: screw_boxes as f64 * 45.0,
    });

    items.push(MaterialItem {
        name: "Joist hangers".to_string(),
        description: "Simpson Strong-Tie or equivalent".to_string(),
        quantity: joist_count,
        unit: "each".to_string(),
        unit_cost: 3.5,
        total_cost: joist_count as f64 * 3.5,
    });

    let total_cost = items.iter().map(|i| i.total_cost).sum();

    notes.push("Estimates include ~10-15% waste factor for cuts.".to_string());
    notes.push("Cut plans snap to standard lumber lengths (8', 10', 12', 16').".to_string());
    notes.push("Actual costs vary by region and supplier.".to_string());
    notes.push("Permit costs and labor are not included.".to_string());
    notes.push(
        "Foundation requirements may vary by local code - consult a professional.".to_string(),
    );
    if is_flush {
        notes.push(
            "Flush/engineered beams (LVL) eliminate the dropped beam below the deck surface. \
             Requires concealed beam hangers."
                .to_string(),
        );
    }

    MaterialList {
        items,
        total_cost,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckplan_core::{BoardPattern, RailingType, StairLocation};

    fn base_config() -> DeckConfig {
        DeckConfig::default()
    }

    #[test]
    fn test_rectangle_area() {
        assert_eq!(deck_area(&base_config()), 120.0);
    }

    #[test]
    fn test_l_shape_area_adds_extension() {
        let mut config = base_config();
        config.shape = DeckShape::LShape;
        config.dimensions.extension_width = Some(6.0);
        config.dimensions.extension_depth = Some(8.0);
        assert_eq!(deck_area(&config), 120.0 + 48.0);
    }

    #[test]
    fn test_wrap_around_area_adds_strip() {
        let mut config = base_config();
        config.shape = DeckShape::WrapAround;
        config.dimensions.extension_depth = Some(4.0);
        assert_eq!(deck_area(&config), 120.0 + 4.0 * 10.0);
    }

    #[test]
    fn test_wrap_around_area_defaults_to_six_foot_strip() {
        let mut config = base_config();
        config.shape = DeckShape::WrapAround;
        config.dimensions.extension_depth = None;
        assert_eq!(deck_area(&config), 120.0 + 6.0 * 10.0);
    }

    #[test]
    fn test_rectangle_perimeter_ledger_excludes_one_edge() {
        let config = base_config(); // 12x10, ledger attached
        assert_eq!(deck_perimeter(&config), 12.0 + 2.0 * 10.0);

        let mut free = base_config();
        free.ledger_attached = false;
        assert_eq!(deck_perimeter(&free), 2.0 * (12.0 + 10.0));
    }

    #[test]
    fn test_equivalent_square_perimeter_for_l_shape() {
        let mut config = base_config();
        config.shape = DeckShape::LShape;
        config.dimensions.extension_width = Some(6.0);
        config.dimensions.extension_depth = Some(8.0);
        config.ledger_attached = false;
        let expected = 4.0 * (168.0f64).sqrt();
        assert!((deck_perimeter(&config) - expected).abs() < 1e-9);

        config.ledger_attached = true;
        assert!((deck_perimeter(&config) - expected * 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_decking_quantity_uses_waste_factor() {
        let config = base_config();
        let list = estimate(&config);
        let decking = list.item("Decking boards").unwrap();
        assert_eq!(decking.quantity, (120.0f64 * 1.10).ceil() as u32);

        let mut diagonal = base_config();
        diagonal.board_pattern = BoardPattern::Diagonal;
        let list = estimate(&diagonal);
        let decking = list.item("Decking boards").unwrap();
        assert_eq!(decking.quantity, (120.0f64 * 1.15).ceil() as u32);
    }

    #[test]
    fn test_joist_count_and_cost() {
        // width=20: ceil(240/16)+1 = 16 joists of 10' -> 10' stock exactly.
        let mut config = base_config();
        config.dimensions.width = 20.0;
        let list = estimate(&config);
        let joists = list.item("Joists (2x8)").unwrap();
        assert_eq!(joists.quantity, 16);
        assert_eq!(joists.total_cost, 16.0 * 10.0 * 1.5);
    }

    #[test]
    fn test_flush_beam_items() {
        let mut config = base_config();
        config.beam_type = BeamType::Flush;
        let list = estimate(&config);
        // depth=10 -> ceil(10/6)+1 = 3 beams
        let beams = list.item("Engineered beam (LVL)").unwrap();
        assert_eq!(beams.quantity, 3);
        // width=12 -> 12' stock at $6/ft
        assert_eq!(beams.unit_cost, 12.0 * 6.0);
        let hangers = list.item("Beam hangers (flush mount)").unwrap();
        assert_eq!(hangers.quantity, 6);
        assert_eq!(hangers.total_cost, 6.0 * 18.0);
        assert!(list.item("Beam boards (2x8)").is_none());
        assert!(list.notes.iter().any(|n| n.contains("Flush/engineered")));
    }

    #[test]
    fn test_dropped_beam_items() {
        let list = estimate(&base_config());
        let beams = list.item("Beam boards (2x8)").unwrap();
        assert_eq!(beams.quantity, 6); // 3 beams, doubled
        assert!(list.item("Engineered beam (LVL)").is_none());
    }

    #[test]
    fn test_posts_and_footings() {
        let list = estimate(&base_config());
        // postsPerBeam = ceil(12/6)+1 = 3; beams = 3; posts = 9
        let posts = list.item("Support posts (4x4)").unwrap();
        assert_eq!(posts.quantity, 9);
        assert_eq!(posts.unit_cost, 5.0 * 2.0); // height 3 + 2 buried
        let footings = list.item("Concrete footings").unwrap();
        assert_eq!(footings.quantity, 18);
    }

    #[test]
    fn test_ledger_only_when_attached() {
        let list = estimate(&base_config());
        assert!(list.item("Ledger board (2x8)").is_some());

        let mut free = base_config();
        free.ledger_attached = false;
        assert!(estimate(&free).item("Ledger board (2x8)").is_none());
    }

    #[test]
    fn test_metal_railing_scenario() {
        // width=12, depth=10, ledger attached, metal railing:
        // perimeter 32, cost ceil(32) * 45 = 1440.
        let config = base_config();
        assert_eq!(config.railing, RailingType::Metal);
        let list = estimate(&config);
        let railing = list.item("Railing").unwrap();
        assert_eq!(railing.quantity, 32);
        assert_eq!(railing.total_cost, 1440.0);
    }

    #[test]
    fn test_no_railing_no_item() {
        let mut config = base_config();
        config.railing = RailingType::None;
        assert!(estimate(&config).item("Railing").is_none());
    }

    #[test]
    fn test_stairs_items() {
        let list = estimate(&base_config());
        // height 3' = 36" -> ceil(36/7.5) = 5 steps
        let stringers = list.item("Stair stringers (2x12)").unwrap();
        // stair width 4 -> ceil(4/1.5)+1 = 4
        assert_eq!(stringers.quantity, 4);
        assert_eq!(stringers.total_cost, 100.0);
        let treads = list.item("Stair treads").unwrap();
        assert_eq!(treads.quantity, 10);
        assert_eq!(treads.unit_cost, 4.0 * 2.5);
    }

    #[test]
    fn test_no_stairs_no_items() {
        let mut config = base_config();
        config.stairs.location = StairLocation::None;
        let list = estimate(&config);
        assert!(list.item("Stair stringers (2x12)").is_none());
        assert!(list.item("Stair treads").is_none());
    }

    #[test]
    fn test_hardware() {
        let list = estimate(&base_config());
        let screws = list.item("Deck screws (5lb box)").unwrap();
        assert_eq!(screws.quantity, 2); // ceil(120/100)
        let hangers = list.item("Joist hangers").unwrap();
        // joists: ceil(144/16)+1 = 10
        assert_eq!(hangers.quantity, 10);
        assert_eq!(hangers.total_cost, 35.0);
    }

    #[test]
    fn test_total_is_sum_of_items() {
        let list = estimate(&base_config());
        let sum: f64 = list.items.iter().map(|i| i.total_cost).sum();
        assert!((list.total_cost - sum).abs() < 1e-9);
    }
}
