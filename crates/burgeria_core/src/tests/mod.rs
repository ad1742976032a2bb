use super::*;
use crate::test_fixtures::{base_content, base_state, make_rng};

mod integration;

// --- Shared test helpers ------------------------------------------------

fn test_content() -> GameContent {
    base_content()
}

fn test_state(content: &GameContent) -> GameState {
    base_state(content)
}

fn cmd(state: &GameState, command: Command) -> CommandEnvelope {
    CommandEnvelope {
        id: CommandId(format!("cmd_{:06}", state.meta.tick)),
        issued_tick: state.meta.tick,
        execute_at_tick: state.meta.tick,
        command,
    }
}

/// Run one tick applying a single command.
fn apply(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl rand::Rng,
    command: Command,
) -> Vec<EventEnvelope> {
    let envelope = cmd(state, command);
    tick(state, &[envelope], content, rng, EventLevel::Normal)
}

/// Same as `apply`, but at `EventLevel::Debug` so rejections are visible.
fn apply_debug(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl rand::Rng,
    command: Command,
) -> Vec<EventEnvelope> {
    let envelope = cmd(state, command);
    tick(state, &[envelope], content, rng, EventLevel::Debug)
}

fn rejection_reasons(events: &[EventEnvelope]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match &e.event {
            Event::CommandRejected { reason, .. } => Some(reason.clone()),
            _ => None,
        })
        .collect()
}

/// Hand-built customer with a fixed target, pushed straight to the wait line.
fn seed_waiting_customer(state: &mut GameState, kinds: &[IngredientKind]) -> OrderNumber {
    let number = OrderNumber(state.counters.next_order_number);
    state.counters.next_order_number += 1;
    let target: Burger = kinds.iter().map(|&k| Ingredient::target(k)).collect();
    let customer = Customer {
        id: CustomerId(format!("cust_{:06}", state.counters.next_customer_id)),
        order: Order { number, target },
    };
    state.counters.next_customer_id += 1;
    state.register.wait_line.push_back(customer);
    number
}
