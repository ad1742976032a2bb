//! Content loading, validation, initial state, and save slots.

use anyhow::{Context, Result};
use burgeria_core::{
    Burger, Constants, Counters, GameContent, GameState, GrillState, IngredientDef,
    IngredientKind, MetaState, RegisterState, UnlockDayDef,
};
use serde::Deserialize;
use std::path::Path;

mod save;

pub use save::{delete_save, list_saves, load_save, save_state, SaveSlot, SaveSummary};

#[derive(Deserialize)]
struct IngredientsFile {
    content_version: String,
    ingredients: Vec<IngredientDef>,
}

#[derive(Deserialize)]
struct UnlockScheduleFile {
    schedule: Vec<UnlockDayDef>,
}

/// Validates loaded content, panicking on any authoring error.
///
/// Catches mistakes like: an ingredient with no price entry, an unlock
/// schedule that never unlocks an ingredient, or a grill with zero slots.
pub fn validate_content(content: &GameContent) {
    for kind in IngredientKind::ALL {
        let priced = content
            .ingredients
            .iter()
            .filter(|def| def.kind == kind)
            .count();
        assert!(priced > 0, "ingredient '{kind}' has no price entry");
        assert!(priced == 1, "ingredient '{kind}' is priced {priced} times");
    }

    let mut previous_day = 0u32;
    for entry in &content.unlock_schedule {
        assert!(
            entry.day > previous_day,
            "unlock schedule day {} does not increase past day {previous_day}",
            entry.day,
        );
        previous_day = entry.day;
    }

    for kind in IngredientKind::ALL {
        let unlocked = content
            .unlock_schedule
            .iter()
            .filter(|entry| entry.ingredients.contains(&kind))
            .count();
        assert!(unlocked > 0, "ingredient '{kind}' is never unlocked");
        assert!(
            unlocked == 1,
            "ingredient '{kind}' appears in {unlocked} unlock entries"
        );
    }

    assert!(
        !content.unlock_schedule.is_empty(),
        "unlock schedule is empty"
    );
    let opening_day = &content.unlock_schedule[0];
    assert!(
        opening_day.day == 1,
        "unlock schedule must start on day 1, starts on day {}",
        opening_day.day,
    );
    for kind in [
        IngredientKind::BottomBun,
        IngredientKind::TopBun,
        IngredientKind::Patty,
    ] {
        assert!(
            opening_day.ingredients.contains(&kind),
            "day 1 must unlock '{kind}' or no burger can be made",
        );
    }

    let c = &content.constants;
    assert!(c.grill_rows > 0, "grill_rows must be > 0");
    assert!(c.grill_cols > 0, "grill_cols must be > 0");
    assert!(
        c.seconds_to_fully_cook_patty > 0.0,
        "seconds_to_fully_cook_patty must be > 0"
    );
    assert!(
        c.burnt_cook_level > c.max_cook_level,
        "burnt_cook_level ({}) must exceed max_cook_level ({})",
        c.burnt_cook_level,
        c.max_cook_level,
    );
    assert!(
        c.customer_arrival_interval_ticks > 0,
        "customer_arrival_interval_ticks must be > 0"
    );
    assert!(
        c.order_min_fillings <= c.order_max_fillings,
        "order_min_fillings ({}) exceeds order_max_fillings ({})",
        c.order_min_fillings,
        c.order_max_fillings,
    );
}

pub fn load_content(content_dir: &str) -> Result<GameContent> {
    let dir = Path::new(content_dir);
    let constants: Constants = serde_json::from_str(
        &std::fs::read_to_string(dir.join("constants.json")).context("reading constants.json")?,
    )
    .context("parsing constants.json")?;
    let ingredients_file: IngredientsFile = serde_json::from_str(
        &std::fs::read_to_string(dir.join("ingredients.json"))
            .context("reading ingredients.json")?,
    )
    .context("parsing ingredients.json")?;
    let schedule_file: UnlockScheduleFile = serde_json::from_str(
        &std::fs::read_to_string(dir.join("unlock_schedule.json"))
            .context("reading unlock_schedule.json")?,
    )
    .context("parsing unlock_schedule.json")?;
    let content = GameContent {
        content_version: ingredients_file.content_version,
        ingredients: ingredients_file.ingredients,
        unlock_schedule: schedule_file.schedule,
        constants,
    };
    validate_content(&content);
    Ok(content)
}

/// The deterministic rng used for a run. Re-seeding with the value stored in
/// `MetaState::seed` reproduces the run from tick 0.
pub fn seeded_rng(seed: u64) -> rand_chacha::ChaCha8Rng {
    use rand::SeedableRng;
    rand_chacha::ChaCha8Rng::seed_from_u64(seed)
}

pub fn build_initial_state(content: &GameContent, seed: u64) -> GameState {
    let c = &content.constants;
    GameState {
        meta: MetaState {
            tick: 0,
            seed,
            schema_version: 1,
            content_version: content.content_version.clone(),
        },
        day: 1,
        balance: c.starting_balance,
        grill: GrillState::new(c.grill_rows, c.grill_cols),
        cooked_tray: Vec::new(),
        assembly: Burger::new(),
        register: RegisterState::default(),
        counters: Counters {
            next_order_number: 1,
            ..Counters::default()
        },
    }
}
