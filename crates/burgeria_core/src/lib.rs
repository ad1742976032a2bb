//! `burgeria_core` — deterministic restaurant-simulation tick.
//!
//! No IO, no network. All randomness via the passed-in Rng.

mod commands;
mod engine;
mod errors;
mod grill;
mod orders;
mod satisfaction;
mod types;
mod unlocks;

pub use engine::tick;
pub use errors::{GrillError, PlaceError, ServiceError};
pub use grill::cook_rate_per_second;
pub use orders::generate_order;
pub use satisfaction::{base_price, evaluate, tip_fraction, Satisfaction};
pub use types::*;
pub use unlocks::{newly_unlocked_on, unlocked_as_of};

pub(crate) fn emit(counters: &mut Counters, tick: u64, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, tick, event }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

#[cfg(test)]
mod tests;
