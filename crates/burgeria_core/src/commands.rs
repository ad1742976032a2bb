//! Command validation and application.
//!
//! Every handler either mutates state and pushes its events, or leaves
//! state untouched and returns the rejection reason. Rejections become
//! `CommandRejected` events at `EventLevel::Debug`.

use rand::Rng;

use crate::errors::{GrillError, PlaceError, ServiceError};
use crate::orders::generate_order;
use crate::unlocks::{newly_unlocked_on, unlocked_as_of};
use crate::{
    Command, CommandEnvelope, Customer, CustomerId, Event, EventLevel, GameContent, GameState,
    Ingredient, IngredientKind, OrderNumber, Patty, PattyId,
};

type Outcome = Result<(), String>;

pub(crate) fn apply_commands(
    state: &mut GameState,
    commands: &[CommandEnvelope],
    content: &GameContent,
    rng: &mut impl Rng,
    event_level: EventLevel,
    events: &mut Vec<crate::EventEnvelope>,
) {
    let current_tick = state.meta.tick;

    for envelope in commands {
        if envelope.execute_at_tick != current_tick {
            continue;
        }
        let outcome = match &envelope.command {
            Command::SpawnCustomer => {
                handle_spawn_customer(state, content, rng, events);
                Ok(())
            }
            Command::TakeOrder => handle_take_order(state, events),
            Command::SelectOrder { number } => handle_select_order(state, *number, events),
            Command::PlaceRawPatty { row, col } => {
                handle_place_raw_patty(state, *row, *col, events)
            }
            Command::MovePatty {
                from_row,
                from_col,
                to_row,
                to_col,
            } => handle_move_patty(state, (*from_row, *from_col), (*to_row, *to_col), events),
            Command::FlipPatty { row, col } => handle_flip_patty(state, *row, *col, events),
            Command::TakePattyOffGrill { row, col } => {
                handle_take_off_grill(state, *row, *col, events)
            }
            Command::DiscardPatty { row, col } => handle_discard_patty(state, *row, *col, events),
            Command::DiscardCookedPatty { patty } => {
                handle_discard_cooked_patty(state, patty, events)
            }
            Command::AddIngredient { kind, accuracy } => {
                handle_add_ingredient(state, content, *kind, *accuracy, events)
            }
            Command::AddPattyFromTray { patty, accuracy } => {
                handle_add_patty_from_tray(state, patty, *accuracy, events)
            }
            Command::RemoveLastIngredient => handle_remove_last_ingredient(state, events),
            Command::DiscardAssembly => handle_discard_assembly(state, events),
            Command::ServeBurger => handle_serve_burger(state, content, events),
            Command::StartNextDay => handle_start_next_day(state, content, events),
        };

        if let Err(reason) = outcome {
            if event_level == EventLevel::Debug {
                let event = crate::emit(
                    &mut state.counters,
                    current_tick,
                    Event::CommandRejected {
                        command: envelope.id.clone(),
                        reason,
                    },
                );
                events.push(event);
            }
        }
    }
}

fn push_event(state: &mut GameState, events: &mut Vec<crate::EventEnvelope>, event: Event) {
    let tick = state.meta.tick;
    let envelope = crate::emit(&mut state.counters, tick, event);
    events.push(envelope);
}

// Infallible: spawning draws from content and counters only.
fn handle_spawn_customer(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    events: &mut Vec<crate::EventEnvelope>,
) {
    let unlocked = unlocked_as_of(&content.unlock_schedule, state.day);
    let number = OrderNumber(state.counters.next_order_number);
    state.counters.next_order_number += 1;

    // Unique-counter invariant; a duplicate here is a programming error.
    assert!(
        state
            .register
            .register_line
            .iter()
            .chain(&state.register.wait_line)
            .all(|c| c.order.number != number),
        "duplicate order number {number}"
    );

    let order = generate_order(&unlocked, number, &content.constants, rng);
    let customer = Customer {
        id: CustomerId(format!("cust_{:06}", state.counters.next_customer_id)),
        order,
    };
    state.counters.next_customer_id += 1;

    push_event(
        state,
        events,
        Event::CustomerArrived {
            customer: customer.id.clone(),
            order_number: number,
        },
    );
    state.register.register_line.push_back(customer);
}

fn handle_take_order(state: &mut GameState, events: &mut Vec<crate::EventEnvelope>) -> Outcome {
    let Some(customer) = state.register.register_line.pop_front() else {
        return Err(ServiceError::RegisterLineEmpty.to_string());
    };
    push_event(
        state,
        events,
        Event::OrderTaken {
            customer: customer.id.clone(),
            order_number: customer.order.number,
        },
    );
    state.register.wait_line.push_back(customer);
    Ok(())
}

fn handle_select_order(
    state: &mut GameState,
    number: OrderNumber,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    if state.register.waiting(number).is_none() {
        return Err(ServiceError::OrderNotWaiting(number).to_string());
    }
    state.register.selected_order = Some(number);
    push_event(
        state,
        events,
        Event::OrderSelected {
            order_number: number,
        },
    );
    Ok(())
}

fn handle_place_raw_patty(
    state: &mut GameState,
    row: usize,
    col: usize,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let patty = Patty::raw(PattyId(format!("patty_{:06}", state.counters.next_patty_id)));
    let id = patty.id.clone();
    match state.grill.place(patty, row, col) {
        Ok(()) => {
            state.counters.next_patty_id += 1;
            push_event(state, events, Event::PattyPlaced {
                patty: id,
                row,
                col,
            });
            Ok(())
        }
        Err(PlaceError { error, .. }) => Err(error.to_string()),
    }
}

fn handle_move_patty(
    state: &mut GameState,
    from: (usize, usize),
    to: (usize, usize),
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let (from_row, from_col) = from;
    let (to_row, to_col) = to;
    let Some(patty) = state.grill.remove(from_row, from_col) else {
        return Err(GrillError::SlotEmpty {
            row: from_row,
            col: from_col,
        }
        .to_string());
    };
    let id = patty.id.clone();
    match state.grill.place(patty, to_row, to_col) {
        Ok(()) => {
            push_event(state, events, Event::PattyMoved {
                patty: id,
                row: to_row,
                col: to_col,
            });
            Ok(())
        }
        Err(PlaceError { patty, error }) => {
            let restored = state.grill.place(patty, from_row, from_col);
            debug_assert!(restored.is_ok(), "source slot was just vacated");
            drop(restored);
            Err(error.to_string())
        }
    }
}

fn handle_flip_patty(
    state: &mut GameState,
    row: usize,
    col: usize,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(patty) = state.grill.get_mut(row, col) else {
        return Err(GrillError::SlotEmpty { row, col }.to_string());
    };
    patty.flip();
    let id = patty.id.clone();
    push_event(state, events, Event::PattyFlipped { patty: id });
    Ok(())
}

fn handle_take_off_grill(
    state: &mut GameState,
    row: usize,
    col: usize,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(patty) = state.grill.get(row, col) else {
        return Err(GrillError::SlotEmpty { row, col }.to_string());
    };
    if !patty.has_started_cooking() {
        return Err(GrillError::NotCooked.to_string());
    }
    let Some(patty) = state.grill.remove(row, col) else {
        return Err(GrillError::SlotEmpty { row, col }.to_string());
    };
    let id = patty.id.clone();
    state.cooked_tray.push(patty);
    push_event(state, events, Event::PattyTakenOffGrill { patty: id });
    Ok(())
}

fn handle_discard_patty(
    state: &mut GameState,
    row: usize,
    col: usize,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(patty) = state.grill.remove(row, col) else {
        return Err(GrillError::SlotEmpty { row, col }.to_string());
    };
    push_event(state, events, Event::PattyDiscarded { patty: patty.id });
    Ok(())
}

fn handle_discard_cooked_patty(
    state: &mut GameState,
    patty: &PattyId,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(index) = state.cooked_tray.iter().position(|p| p.id == *patty) else {
        return Err(ServiceError::UnknownPatty(patty.clone()).to_string());
    };
    let removed = state.cooked_tray.remove(index);
    push_event(state, events, Event::PattyDiscarded { patty: removed.id });
    Ok(())
}

fn handle_add_ingredient(
    state: &mut GameState,
    content: &GameContent,
    kind: IngredientKind,
    accuracy: f32,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    if kind == IngredientKind::Patty {
        return Err(ServiceError::PattyViaTrayOnly.to_string());
    }
    if !unlocked_as_of(&content.unlock_schedule, state.day).contains(&kind) {
        return Err(ServiceError::IngredientLocked(kind).to_string());
    }
    state.assembly.push(Ingredient::new(kind, accuracy));
    push_event(state, events, Event::IngredientAdded { kind });
    Ok(())
}

fn handle_add_patty_from_tray(
    state: &mut GameState,
    patty: &PattyId,
    accuracy: f32,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(index) = state.cooked_tray.iter().position(|p| p.id == *patty) else {
        return Err(ServiceError::UnknownPatty(patty.clone()).to_string());
    };
    let cooked = state.cooked_tray.remove(index);
    let mut ingredient = Ingredient::new(IngredientKind::Patty, accuracy);
    ingredient.cook_levels = Some((cooked.bottom_cook, cooked.top_cook));
    state.assembly.push(ingredient);
    push_event(state, events, Event::IngredientAdded {
        kind: IngredientKind::Patty,
    });
    Ok(())
}

fn handle_remove_last_ingredient(
    state: &mut GameState,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(removed) = state.assembly.pop_last() else {
        return Err(ServiceError::EmptyAssembly.to_string());
    };
    push_event(state, events, Event::IngredientRemoved { kind: removed.kind });
    Ok(())
}

fn handle_discard_assembly(
    state: &mut GameState,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    if state.assembly.is_empty() {
        return Err(ServiceError::EmptyAssembly.to_string());
    }
    state.assembly.clear();
    push_event(state, events, Event::AssemblyDiscarded);
    Ok(())
}

fn handle_serve_burger(
    state: &mut GameState,
    content: &GameContent,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    let Some(number) = state.register.selected_order else {
        return Err(ServiceError::NoSelectedOrder.to_string());
    };
    let Some(index) = state
        .register
        .wait_line
        .iter()
        .position(|c| c.order.number == number)
    else {
        return Err(ServiceError::OrderNotWaiting(number).to_string());
    };
    let Some(customer) = state.register.wait_line.remove(index) else {
        return Err(ServiceError::OrderNotWaiting(number).to_string());
    };

    let result = crate::evaluate(&customer.order.target, &state.assembly, content);
    let delta = result.payment + result.tip;
    state.balance += delta;
    state.assembly.clear();
    state.register.selected_order = None;

    push_event(state, events, Event::BurgerEvaluated {
        order_number: number,
        score: result.score,
        payment: result.payment,
        tip: result.tip,
    });
    push_event(state, events, Event::CustomerServed {
        customer: customer.id,
        order_number: number,
    });
    let balance = state.balance;
    push_event(state, events, Event::BalanceChanged { delta, balance });
    Ok(())
}

fn handle_start_next_day(
    state: &mut GameState,
    content: &GameContent,
    events: &mut Vec<crate::EventEnvelope>,
) -> Outcome {
    if state.day >= content.constants.max_days {
        return Err(ServiceError::MaxDayReached(state.day).to_string());
    }
    state.day += 1;
    let newly_unlocked = newly_unlocked_on(&content.unlock_schedule, state.day);
    let day = state.day;
    push_event(state, events, Event::DayStarted {
        day,
        newly_unlocked,
    });
    Ok(())
}
