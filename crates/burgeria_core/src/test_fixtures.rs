//! Shared test fixtures for burgeria_core and downstream crates.
//!
//! `base_content()` provides a full-featured `GameContent` (complete
//! ingredient roster, seven-day unlock schedule, real cook timings).
//! `base_state()` is a fresh day-1 state with an empty shop.

use crate::{
    Constants, Counters, GameContent, GameState, GrillState, IngredientDef, IngredientKind,
    MetaState, RegisterState, UnlockDayDef,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn ingredient(kind: IngredientKind, display_name: &str, price: u32) -> IngredientDef {
    IngredientDef {
        kind,
        display_name: display_name.to_string(),
        price,
    }
}

/// Full ingredient roster and the standard unlock progression.
pub fn base_content() -> GameContent {
    GameContent {
        content_version: "test".to_string(),
        ingredients: vec![
            ingredient(IngredientKind::BottomBun, "Bottom Bun", 2),
            ingredient(IngredientKind::TopBun, "Top Bun", 2),
            ingredient(IngredientKind::Patty, "Patty", 5),
            ingredient(IngredientKind::Cheese, "Cheese", 3),
            ingredient(IngredientKind::Lettuce, "Lettuce", 2),
            ingredient(IngredientKind::Tomato, "Tomato", 2),
            ingredient(IngredientKind::Onion, "Onion", 1),
            ingredient(IngredientKind::Pickle, "Pickle", 1),
            ingredient(IngredientKind::Ketchup, "Ketchup", 1),
            ingredient(IngredientKind::Mustard, "Mustard", 1),
            ingredient(IngredientKind::Mayo, "Mayo", 1),
        ],
        unlock_schedule: vec![
            UnlockDayDef {
                day: 1,
                ingredients: vec![
                    IngredientKind::BottomBun,
                    IngredientKind::TopBun,
                    IngredientKind::Patty,
                ],
            },
            UnlockDayDef {
                day: 2,
                ingredients: vec![IngredientKind::Cheese],
            },
            UnlockDayDef {
                day: 3,
                ingredients: vec![IngredientKind::Lettuce, IngredientKind::Tomato],
            },
            UnlockDayDef {
                day: 4,
                ingredients: vec![IngredientKind::Onion],
            },
            UnlockDayDef {
                day: 5,
                ingredients: vec![IngredientKind::Pickle],
            },
            UnlockDayDef {
                day: 6,
                ingredients: vec![IngredientKind::Ketchup, IngredientKind::Mustard],
            },
            UnlockDayDef {
                day: 7,
                ingredients: vec![IngredientKind::Mayo],
            },
        ],
        constants: base_constants(),
    }
}

pub fn base_constants() -> Constants {
    Constants {
        grill_rows: 3,
        grill_cols: 4,
        seconds_per_tick: 1.0,
        max_cook_level: 100.0,
        seconds_to_fully_cook_patty: 15.0,
        burnt_cook_level: 130.0,
        min_servable_cook_level: 100.0,
        order_min_fillings: 1,
        order_max_fillings: 4,
        discrepancy_penalty: 0.1,
        misorder_penalty: 0.05,
        min_acceptable_score: 0.5,
        max_tip_fraction: 0.25,
        customer_arrival_interval_ticks: 20,
        customers_per_day: 5,
        starting_balance: 0,
        max_days: 30,
    }
}

/// Fresh day-1 state: empty grill, empty lines, zero balance.
pub fn base_state(content: &GameContent) -> GameState {
    let c = &content.constants;
    GameState {
        meta: MetaState {
            tick: 0,
            seed: 42,
            schema_version: 1,
            content_version: content.content_version.clone(),
        },
        day: 1,
        balance: c.starting_balance,
        grill: GrillState::new(c.grill_rows, c.grill_cols),
        cooked_tray: Vec::new(),
        assembly: crate::Burger::new(),
        register: RegisterState::default(),
        counters: Counters {
            next_order_number: 1,
            ..Counters::default()
        },
    }
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
