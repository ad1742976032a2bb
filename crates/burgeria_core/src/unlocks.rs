//! Day-indexed ingredient unlock schedule.

use crate::{IngredientKind, UnlockDayDef};

/// Every ingredient unlocked on or before `day`, in first-unlocked order.
///
/// Monotonic in `day`: the set only ever grows as days advance. Content
/// validation guarantees the schedule eventually covers the full
/// ingredient roster, so querying past the last entry returns everything.
pub fn unlocked_as_of(schedule: &[UnlockDayDef], day: u32) -> Vec<IngredientKind> {
    let mut unlocked = Vec::new();
    for entry in schedule.iter().filter(|e| e.day <= day) {
        for &kind in &entry.ingredients {
            if !unlocked.contains(&kind) {
                unlocked.push(kind);
            }
        }
    }
    unlocked
}

/// The per-day delta: ingredients that become available exactly on `day`.
pub fn newly_unlocked_on(schedule: &[UnlockDayDef], day: u32) -> Vec<IngredientKind> {
    schedule
        .iter()
        .filter(|e| e.day == day)
        .flat_map(|e| e.ingredients.iter().copied())
        .collect()
}
