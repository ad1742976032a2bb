//! Content/schema validation tests for the shipped JSON game data.
//!
//! These tests load the actual `content/*.json` files and validate:
//! 1. Schema validity — all files deserialize without error
//! 2. Range constraints — no zero prices, no zero durations
//! 3. Content invariants — the game is playable from day 1

use burgeria_core::{GameContent, IngredientKind};
use burgeria_world::load_content;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Helper: resolve the content directory relative to the workspace root.
/// Integration tests run from the crate directory, so we go up two levels.
fn content_dir() -> String {
    let manifest = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    format!("{manifest}/../../content")
}

/// Shared content loaded once across all tests in this module.
fn load_test_content() -> &'static GameContent {
    static CONTENT: OnceLock<GameContent> = OnceLock::new();
    CONTENT.get_or_init(|| {
        load_content(&content_dir()).expect("load_content should succeed for production content")
    })
}

// =========================================================================
// 1. Schema validation — deserialization succeeds
// =========================================================================

#[test]
fn content_loads_successfully() {
    let _content = load_test_content();
}

#[test]
fn content_version_is_non_empty() {
    let content = load_test_content();
    assert!(!content.content_version.is_empty());
}

// =========================================================================
// 2. Range constraints
// =========================================================================

#[test]
fn ingredient_prices_are_positive() {
    let content = load_test_content();
    for def in &content.ingredients {
        assert!(def.price > 0, "ingredient '{}' is free", def.kind);
    }
}

#[test]
fn ingredient_display_names_are_non_empty() {
    let content = load_test_content();
    for def in &content.ingredients {
        assert!(
            !def.display_name.is_empty(),
            "ingredient '{}' has empty display name",
            def.kind
        );
    }
}

#[test]
fn no_duplicate_ingredient_kinds() {
    let content = load_test_content();
    let mut seen = HashSet::new();
    for def in &content.ingredients {
        assert!(seen.insert(def.kind), "duplicate ingredient '{}'", def.kind);
    }
}

#[test]
fn constants_durations_are_positive() {
    let content = load_test_content();
    let c = &content.constants;
    assert!(c.seconds_per_tick > 0.0, "seconds_per_tick must be > 0");
    assert!(
        c.seconds_to_fully_cook_patty > 0.0,
        "seconds_to_fully_cook_patty must be > 0"
    );
    assert!(
        c.customer_arrival_interval_ticks > 0,
        "customer_arrival_interval_ticks must be > 0"
    );
}

#[test]
fn constants_fractions_are_valid() {
    let content = load_test_content();
    let c = &content.constants;
    assert!(
        (0.0..=1.0).contains(&c.discrepancy_penalty),
        "discrepancy_penalty {} out of range [0, 1]",
        c.discrepancy_penalty
    );
    assert!(
        (0.0..=1.0).contains(&c.misorder_penalty),
        "misorder_penalty {} out of range [0, 1]",
        c.misorder_penalty
    );
    assert!(
        (0.0..=1.0).contains(&c.min_acceptable_score),
        "min_acceptable_score {} out of range [0, 1]",
        c.min_acceptable_score
    );
    assert!(
        (0.0..=1.0).contains(&c.max_tip_fraction),
        "max_tip_fraction {} out of range [0, 1]",
        c.max_tip_fraction
    );
}

#[test]
fn cook_thresholds_are_ordered() {
    let content = load_test_content();
    let c = &content.constants;
    assert!(
        c.burnt_cook_level > c.max_cook_level,
        "burnt_cook_level ({}) must exceed max_cook_level ({})",
        c.burnt_cook_level,
        c.max_cook_level
    );
    assert!(
        c.min_servable_cook_level <= 2.0 * c.max_cook_level,
        "min_servable_cook_level ({}) is unreachable with two faces capped at {}",
        c.min_servable_cook_level,
        c.max_cook_level
    );
}

// =========================================================================
// 3. Content invariants — the game is playable
// =========================================================================

#[test]
fn every_ingredient_kind_is_priced() {
    let content = load_test_content();
    for kind in IngredientKind::ALL {
        assert!(
            content.ingredients.iter().any(|def| def.kind == kind),
            "ingredient '{kind}' has no price entry"
        );
    }
}

#[test]
fn unlock_schedule_covers_every_ingredient() {
    let content = load_test_content();
    for kind in IngredientKind::ALL {
        assert!(
            content
                .unlock_schedule
                .iter()
                .any(|entry| entry.ingredients.contains(&kind)),
            "ingredient '{kind}' is never unlocked"
        );
    }
}

#[test]
fn day_one_can_make_a_plain_hamburger() {
    let content = load_test_content();
    let day_one = &content.unlock_schedule[0];
    assert_eq!(day_one.day, 1);
    for kind in [
        IngredientKind::BottomBun,
        IngredientKind::TopBun,
        IngredientKind::Patty,
    ] {
        assert!(
            day_one.ingredients.contains(&kind),
            "day 1 is missing '{kind}'"
        );
    }
}

#[test]
fn order_fillings_fit_in_the_unlocked_roster() {
    let content = load_test_content();
    let c = &content.constants;
    assert!(c.order_min_fillings >= 1, "orders need at least one filling");
    assert!(
        c.order_min_fillings <= c.order_max_fillings,
        "order_min_fillings ({}) exceeds order_max_fillings ({})",
        c.order_min_fillings,
        c.order_max_fillings
    );
}

#[test]
fn grill_has_room_for_a_full_roster_of_orders() {
    let content = load_test_content();
    let c = &content.constants;
    assert!(
        c.grill_rows * c.grill_cols >= c.customers_per_day as usize,
        "grill ({}x{}) is smaller than a day's roster of {}",
        c.grill_rows,
        c.grill_cols,
        c.customers_per_day
    );
}
