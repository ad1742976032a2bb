use burgeria_core::{
    Command, CommandEnvelope, CommandId, Face, GameContent, GameState, IngredientKind, Patty,
};

mod arrivals;

pub use arrivals::{ArrivalSignal, ArrivalTimer};

pub trait CommandSource {
    fn generate_commands(
        &mut self,
        state: &GameState,
        content: &GameContent,
        next_command_id: &mut u64,
    ) -> Vec<CommandEnvelope>;
}

/// Spawns customers on a fixed tick interval, capped per day, and advances
/// to the next day once the roster is spawned and both lines have emptied.
pub struct CustomerFlow {
    spawned_today: u32,
    current_day: u32,
}

/// Plays the kitchen automatically:
/// 1. Take the order at the front of the register line.
/// 2. Select the oldest waiting order if none is selected.
/// 3. Run the grill: discard burnt patties, pull servable ones onto the
///    tray, flip once the down face is half done.
/// 4. Keep enough raw patties cooking to cover every pending order.
/// 5. Assemble the selected order bottom-to-top, then serve it.
pub struct LineCook;

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Allocates a command ID and builds a `CommandEnvelope`.
fn make_cmd(tick: u64, next_id: &mut u64, command: Command) -> CommandEnvelope {
    let cmd_id = CommandId(format!("cmd_{:06}", *next_id));
    *next_id += 1;
    CommandEnvelope {
        id: cmd_id,
        issued_tick: tick,
        execute_at_tick: tick,
        command,
    }
}

fn down_face_level(patty: &Patty) -> f32 {
    match patty.down_face {
        Face::Bottom => patty.bottom_cook,
        Face::Top => patty.top_cook,
    }
}

fn up_face_level(patty: &Patty) -> f32 {
    match patty.down_face {
        Face::Bottom => patty.top_cook,
        Face::Top => patty.bottom_cook,
    }
}

/// Patties still owed across every order a customer is holding.
fn patties_pending(state: &GameState) -> usize {
    state
        .register
        .register_line
        .iter()
        .chain(&state.register.wait_line)
        .map(|customer| {
            customer
                .order
                .target
                .kinds()
                .filter(|kind| *kind == IngredientKind::Patty)
                .count()
        })
        .sum()
}

/// Patties already accounted for: cooking, on the tray, or stacked.
fn patties_in_flight(state: &GameState) -> usize {
    state.grill.occupied_count()
        + state.cooked_tray.len()
        + state
            .assembly
            .kinds()
            .filter(|kind| *kind == IngredientKind::Patty)
            .count()
}

/// True while the assembly matches the opening run of the target stack.
fn assembly_is_prefix_of(state: &GameState, target: &burgeria_core::Burger) -> bool {
    state.assembly.len() <= target.len()
        && state
            .assembly
            .kinds()
            .zip(target.kinds())
            .all(|(got, want)| got == want)
}

// ---------------------------------------------------------------------------
// CustomerFlow
// ---------------------------------------------------------------------------

impl CustomerFlow {
    pub fn new() -> Self {
        CustomerFlow {
            spawned_today: 0,
            current_day: 0,
        }
    }

    /// True once today's roster has spawned and everyone has been served.
    pub fn day_complete(&self, state: &GameState, content: &GameContent) -> bool {
        self.current_day == state.day
            && self.spawned_today >= content.constants.customers_per_day
            && state.register.register_line.is_empty()
            && state.register.wait_line.is_empty()
    }
}

impl Default for CustomerFlow {
    fn default() -> Self {
        CustomerFlow::new()
    }
}

impl CommandSource for CustomerFlow {
    fn generate_commands(
        &mut self,
        state: &GameState,
        content: &GameContent,
        next_command_id: &mut u64,
    ) -> Vec<CommandEnvelope> {
        if self.current_day != state.day {
            self.current_day = state.day;
            self.spawned_today = 0;
        }

        let mut commands = Vec::new();
        let constants = &content.constants;

        if self.spawned_today < constants.customers_per_day
            && state.meta.tick % constants.customer_arrival_interval_ticks == 0
        {
            commands.push(make_cmd(
                state.meta.tick,
                next_command_id,
                Command::SpawnCustomer,
            ));
            self.spawned_today += 1;
        } else if self.day_complete(state, content) && state.day < constants.max_days {
            commands.push(make_cmd(
                state.meta.tick,
                next_command_id,
                Command::StartNextDay,
            ));
        }

        commands
    }
}

// ---------------------------------------------------------------------------
// LineCook
// ---------------------------------------------------------------------------

impl CommandSource for LineCook {
    fn generate_commands(
        &mut self,
        state: &GameState,
        content: &GameContent,
        next_command_id: &mut u64,
    ) -> Vec<CommandEnvelope> {
        let mut commands = Vec::new();
        let tick = state.meta.tick;
        let constants = &content.constants;

        if !state.register.register_line.is_empty() {
            commands.push(make_cmd(tick, next_command_id, Command::TakeOrder));
        }

        if state.register.selected_order.is_none() {
            if let Some(customer) = state.register.wait_line.front() {
                commands.push(make_cmd(tick, next_command_id, Command::SelectOrder {
                    number: customer.order.number,
                }));
            }
        }

        let mut free_slots = Vec::new();
        for row in 0..state.grill.rows() {
            for col in 0..state.grill.cols() {
                match state.grill.get(row, col) {
                    None => free_slots.push((row, col)),
                    Some(patty) => {
                        if patty.is_burnt(constants) {
                            commands.push(make_cmd(tick, next_command_id, Command::DiscardPatty {
                                row,
                                col,
                            }));
                        } else if patty.is_servable(constants) {
                            commands.push(make_cmd(
                                tick,
                                next_command_id,
                                Command::TakePattyOffGrill { row, col },
                            ));
                        } else if down_face_level(patty) >= constants.max_cook_level / 2.0
                            && up_face_level(patty) <= 0.0
                        {
                            commands.push(make_cmd(tick, next_command_id, Command::FlipPatty {
                                row,
                                col,
                            }));
                        }
                    }
                }
            }
        }

        let pending = patties_pending(state);
        let in_flight = patties_in_flight(state);
        let mut to_place = pending.saturating_sub(in_flight);
        for (row, col) in free_slots {
            if to_place == 0 {
                break;
            }
            commands.push(make_cmd(tick, next_command_id, Command::PlaceRawPatty {
                row,
                col,
            }));
            to_place -= 1;
        }

        if let Some(number) = state.register.selected_order {
            if let Some(customer) = state.register.waiting(number) {
                let target = &customer.order.target;
                if !assembly_is_prefix_of(state, target) {
                    commands.push(make_cmd(tick, next_command_id, Command::DiscardAssembly));
                } else if state.assembly.len() == target.len() {
                    commands.push(make_cmd(tick, next_command_id, Command::ServeBurger));
                } else {
                    let next_kind = target.ingredients()[state.assembly.len()].kind;
                    if next_kind == IngredientKind::Patty {
                        if let Some(cooked) = state.cooked_tray.first() {
                            commands.push(make_cmd(
                                tick,
                                next_command_id,
                                Command::AddPattyFromTray {
                                    patty: cooked.id.clone(),
                                    accuracy: 1.0,
                                },
                            ));
                        }
                    } else {
                        commands.push(make_cmd(tick, next_command_id, Command::AddIngredient {
                            kind: next_kind,
                            accuracy: 1.0,
                        }));
                    }
                }
            }
        }

        commands
    }
}
