//! End-to-end estimator scenarios over full configurations.

use deckplan_core::{BoardPattern, DeckConfig, DeckShape, RailingType, StairLocation};
use deckplan_estimate::{deck_perimeter, estimate};
use proptest::prelude::*;

fn rect_config(width: f64, depth: f64, height: f64) -> DeckConfig {
    let mut config = DeckConfig::default();
    config.shape = DeckShape::Rectangle;
    config.dimensions.width = width;
    config.dimensions.depth = depth;
    config.dimensions.height = height;
    config
}

#[test]
fn default_config_produces_complete_bill() {
    let list = estimate(&DeckConfig::default());
    let names: Vec<&str> = list.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "Decking boards",
            "Joists (2x8)",
            "Beam boards (2x8)",
            "Support posts (4x4)",
            "Concrete footings",
            "Ledger board (2x8)",
            "Railing",
            "Stair stringers (2x12)",
            "Stair treads",
            "Deck screws (5lb box)",
            "Joist hangers",
        ]
    );
    assert!(list.total_cost > 0.0);
    assert!(!list.notes.is_empty());
}

#[test]
fn metal_railing_ledger_scenario() {
    // width=12, depth=10, height=3, ledger, rectangle, metal railing.
    let mut config = rect_config(12.0, 10.0, 3.0);
    config.ledger_attached = true;
    config.railing = RailingType::Metal;

    assert_eq!(deck_perimeter(&config), 32.0);
    let railing = estimate(&config).item("Railing").cloned().unwrap();
    assert_eq!(railing.quantity, 32);
    assert_eq!(railing.total_cost, 1440.0);
}

#[test]
fn twenty_by_ten_joist_scenario() {
    let config = rect_config(20.0, 10.0, 3.0);
    let joists = estimate(&config).item("Joists (2x8)").cloned().unwrap();
    assert_eq!(joists.quantity, 16);
    assert_eq!(joists.total_cost, 240.0);
}

#[test]
fn long_span_joists_under_estimate_on_16ft_stock() {
    // depth 20' exceeds the longest stock; the optimizer falls back to 16'
    // stock without flagging the shortfall. Pinned here so the behavior is
    // never "fixed" silently.
    let config = rect_config(12.0, 20.0, 3.0);
    let joists = estimate(&config).item("Joists (2x8)").cloned().unwrap();
    assert_eq!(joists.unit_cost, 16.0 * 1.5);
}

proptest! {
    #[test]
    fn prop_rectangle_decking_quantity(
        width in 6.0f64..48.0,
        depth in 6.0f64..48.0,
        diagonal in any::<bool>(),
    ) {
        let mut config = rect_config(width, depth, 3.0);
        config.board_pattern = if diagonal {
            BoardPattern::Diagonal
        } else {
            BoardPattern::Standard
        };
        let waste = if diagonal { 1.15 } else { 1.10 };
        let list = estimate(&config);
        let decking = list.item("Decking boards").unwrap();
        prop_assert_eq!(decking.quantity, (width * depth * waste).ceil() as u32);
    }

    #[test]
    fn prop_railing_item_iff_railing_selected(
        railing in prop_oneof![
            Just(RailingType::None),
            Just(RailingType::Wood),
            Just(RailingType::Cedar),
            Just(RailingType::Metal),
            Just(RailingType::Glass),
        ],
        ledger in any::<bool>(),
    ) {
        let mut config = DeckConfig::default();
        config.railing = railing;
        config.ledger_attached = ledger;
        let list = estimate(&config);
        prop_assert_eq!(list.item("Railing").is_some(), railing.is_present());
        if let Some(item) = list.item("Railing") {
            prop_assert_eq!(item.quantity, deck_perimeter(&config).ceil() as u32);
        }
    }

    #[test]
    fn prop_estimator_total_over_valid_configs(
        width in 6.0f64..48.0,
        depth in 6.0f64..48.0,
        height in 1.0f64..12.0,
        stairs in any::<bool>(),
    ) {
        let mut config = rect_config(width, depth, height);
        if !stairs {
            config.stairs.location = StairLocation::None;
        }
        let list = estimate(&config);
        let sum: f64 = list.items.iter().map(|i| i.total_cost).sum();
        prop_assert!((list.total_cost - sum).abs() < 1e-6);
        prop_assert!(list.items.iter().all(|i| i.total_cost >= 0.0));
    }
}
