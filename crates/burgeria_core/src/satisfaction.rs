//! Order-satisfaction scoring, payment and tip.

use std::collections::HashMap;

use crate::{Burger, Constants, GameContent, Ingredient, IngredientKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satisfaction {
    /// Normalized similarity between assembled and target burger, in [0, 1].
    pub score: f32,
    pub payment: i64,
    pub tip: i64,
}

/// Sum of content prices over the target burger's ingredients.
pub fn base_price(target: &Burger, content: &GameContent) -> i64 {
    target
        .kinds()
        .map(|kind| {
            content
                .ingredients
                .iter()
                .find(|def| def.kind == kind)
                .map_or(0, |def| i64::from(def.price))
        })
        .sum()
}

/// Tip fraction for a given score: zero below the acceptability threshold,
/// rising linearly to `max_tip_fraction` at a perfect score.
pub fn tip_fraction(score: f32, constants: &Constants) -> f32 {
    let min = constants.min_acceptable_score;
    if score < min {
        return 0.0;
    }
    if min >= 1.0 {
        return constants.max_tip_fraction;
    }
    constants.max_tip_fraction * (score - min) / (1.0 - min)
}

/// Credit a positional match earns. Buns score on type alone; every other
/// ingredient is weighted by how accurately it was placed.
fn match_credit(ingredient: &Ingredient) -> f32 {
    if ingredient.kind.is_bun() {
        1.0
    } else {
        ingredient.placement_accuracy.clamp(0.0, 1.0)
    }
}

fn kind_counts(burger: &Burger) -> HashMap<IngredientKind, usize> {
    let mut counts = HashMap::new();
    for kind in burger.kinds() {
        *counts.entry(kind).or_insert(0) += 1;
    }
    counts
}

/// Compare an assembled burger against an order's target.
///
/// Positional type matches earn accuracy-weighted credit normalized by the
/// target length. Missing or extra ingredients (multiset symmetric
/// difference) and misordered ingredients (present in both multisets but
/// not positionally matched) each subtract a per-item penalty. Total
/// function: an empty assembly against a non-empty target scores 0.
pub fn evaluate(target: &Burger, assembled: &Burger, content: &GameContent) -> Satisfaction {
    let constants = &content.constants;
    let t_len = target.len();
    let a_len = assembled.len();

    let mut positional_matches = 0usize;
    let mut credit = 0.0f32;
    for (want, got) in target.ingredients().iter().zip(assembled.ingredients()) {
        if want.kind == got.kind {
            positional_matches += 1;
            credit += match_credit(got);
        }
    }

    let target_counts = kind_counts(target);
    let assembled_counts = kind_counts(assembled);
    let matched_multiset: usize = target_counts
        .iter()
        .map(|(kind, count)| count.min(assembled_counts.get(kind).unwrap_or(&0)))
        .sum();

    // Ingredients on exactly one side, plus right-ingredient-wrong-position.
    let discrepancies = t_len + a_len - 2 * matched_multiset;
    let misordered = matched_multiset - positional_matches;

    let base = if t_len == 0 {
        if a_len == 0 {
            1.0
        } else {
            0.0
        }
    } else {
        credit / t_len as f32
    };
    let score = (base
        - discrepancies as f32 * constants.discrepancy_penalty
        - misordered as f32 * constants.misorder_penalty)
        .clamp(0.0, 1.0);

    #[allow(clippy::cast_possible_truncation)]
    let payment = (base_price(target, content) as f32 * score).round() as i64;
    #[allow(clippy::cast_possible_truncation)]
    let tip = (payment as f32 * tip_fraction(score, constants)).round() as i64;

    Satisfaction {
        score,
        payment,
        tip,
    }
}
