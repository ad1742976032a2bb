use rand::Rng;

use crate::commands::apply_commands;
use crate::grill::CookTransition;
use crate::{CommandEnvelope, Event, EventLevel, GameContent, GameState};

/// Advance the simulation by one tick.
///
/// Order of operations:
/// 1. Apply commands scheduled for this tick.
/// 2. Cook every patty on the grill by `seconds_per_tick`.
/// 3. Increment tick counter.
///
/// Returns all events produced this tick.
pub fn tick(
    state: &mut GameState,
    commands: &[CommandEnvelope],
    content: &GameContent,
    rng: &mut impl Rng,
    event_level: EventLevel,
) -> Vec<crate::EventEnvelope> {
    let mut events = Vec::new();

    apply_commands(state, commands, content, rng, event_level, &mut events);
    advance_grill(state, content, &mut events);

    state.meta.tick += 1;
    events
}

fn advance_grill(
    state: &mut GameState,
    content: &GameContent,
    events: &mut Vec<crate::EventEnvelope>,
) {
    let transitions = state
        .grill
        .advance(content.constants.seconds_per_tick, &content.constants);
    let current_tick = state.meta.tick;
    for transition in transitions {
        let event = match transition {
            CookTransition::BecameServable(patty) => Event::PattyServable { patty },
            CookTransition::BecameBurnt(patty) => Event::PattyBurnt { patty },
        };
        events.push(crate::emit(&mut state.counters, current_tick, event));
    }
}
