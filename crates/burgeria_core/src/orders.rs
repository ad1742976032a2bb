//! Randomized order generation.

use rand::Rng;

use crate::{Burger, Constants, Ingredient, IngredientKind, Order, OrderNumber};

/// Build a structurally valid random order: bottom bun, a bounded number of
/// fillings drawn only from the unlocked set, top bun.
///
/// Deterministic given a seeded rng and the same unlocked slice.
pub fn generate_order(
    unlocked: &[IngredientKind],
    number: OrderNumber,
    constants: &Constants,
    rng: &mut impl Rng,
) -> Order {
    let fillings: Vec<IngredientKind> = unlocked
        .iter()
        .copied()
        .filter(|kind| !kind.is_bun())
        .collect();

    let mut target = Burger::new();
    target.push(Ingredient::target(IngredientKind::BottomBun));
    if !fillings.is_empty() {
        let count = rng.gen_range(constants.order_min_fillings..=constants.order_max_fillings);
        for _ in 0..count {
            let kind = fillings[rng.gen_range(0..fillings.len())];
            target.push(Ingredient::target(kind));
        }
    }
    target.push(Ingredient::target(IngredientKind::TopBun));

    Order { number, target }
}
