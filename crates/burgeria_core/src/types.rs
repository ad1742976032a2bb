//! Type definitions for `burgeria_core`.
//!
//! All public types, structs, enums, and ID newtypes used by the simulation.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use crate::grill::GrillState;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PattyId);
string_id!(CustomerId);
string_id!(CommandId);
string_id!(EventId);

/// Monotonically assigned, unique for the lifetime of a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct OrderNumber(pub u64);

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:04}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    BottomBun,
    TopBun,
    Patty,
    Cheese,
    Lettuce,
    Tomato,
    Onion,
    Pickle,
    Ketchup,
    Mustard,
    Mayo,
}

impl IngredientKind {
    pub const ALL: [IngredientKind; 11] = [
        IngredientKind::BottomBun,
        IngredientKind::TopBun,
        IngredientKind::Patty,
        IngredientKind::Cheese,
        IngredientKind::Lettuce,
        IngredientKind::Tomato,
        IngredientKind::Onion,
        IngredientKind::Pickle,
        IngredientKind::Ketchup,
        IngredientKind::Mustard,
        IngredientKind::Mayo,
    ];

    pub fn is_bun(self) -> bool {
        matches!(self, IngredientKind::BottomBun | IngredientKind::TopBun)
    }

    /// Stable asset key; the view layer resolves `<name>.png` from it.
    pub fn asset_name(self) -> &'static str {
        match self {
            IngredientKind::BottomBun => "bottom_bun",
            IngredientKind::TopBun => "top_bun",
            IngredientKind::Patty => "patty",
            IngredientKind::Cheese => "cheese",
            IngredientKind::Lettuce => "lettuce",
            IngredientKind::Tomato => "tomato",
            IngredientKind::Onion => "onion",
            IngredientKind::Pickle => "pickle",
            IngredientKind::Ketchup => "ketchup",
            IngredientKind::Mustard => "mustard",
            IngredientKind::Mayo => "mayo",
        }
    }
}

impl std::fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.asset_name())
    }
}

/// Which patty face currently touches the grill plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Bottom,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Normal,
    Debug,
}

// ---------------------------------------------------------------------------
// Burger assembly types
// ---------------------------------------------------------------------------

/// One placed component of a burger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub kind: IngredientKind,
    /// Placement accuracy in [0, 1]; 1.0 is a perfectly centred drop.
    pub placement_accuracy: f32,
    /// Face cook levels carried over when a tray patty is stacked.
    pub cook_levels: Option<(f32, f32)>,
}

impl Ingredient {
    pub fn new(kind: IngredientKind, placement_accuracy: f32) -> Self {
        Ingredient {
            kind,
            placement_accuracy: placement_accuracy.clamp(0.0, 1.0),
            cook_levels: None,
        }
    }

    /// Ideal ingredient as it appears in an order's target burger.
    pub fn target(kind: IngredientKind) -> Self {
        Ingredient::new(kind, 1.0)
    }
}

/// Ordered bottom-to-top ingredient stack. Insertion order is preserved
/// exactly; removal only ever takes the most-recently-added ingredient.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Burger {
    ingredients: SmallVec<[Ingredient; 8]>,
}

impl Burger {
    pub fn new() -> Self {
        Burger::default()
    }

    pub fn push(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    pub fn pop_last(&mut self) -> Option<Ingredient> {
        self.ingredients.pop()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn kinds(&self) -> impl Iterator<Item = IngredientKind> + '_ {
        self.ingredients.iter().map(|i| i.kind)
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn clear(&mut self) {
        self.ingredients.clear();
    }

    /// True when the stack opens with a bottom bun and closes with a top bun.
    pub fn is_well_formed(&self) -> bool {
        self.ingredients.first().map(|i| i.kind) == Some(IngredientKind::BottomBun)
            && self.ingredients.last().map(|i| i.kind) == Some(IngredientKind::TopBun)
            && self.ingredients.len() >= 2
    }
}

impl FromIterator<Ingredient> for Burger {
    fn from_iter<T: IntoIterator<Item = Ingredient>>(iter: T) -> Self {
        Burger {
            ingredients: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Grill types
// ---------------------------------------------------------------------------

/// One patty and its two-sided cook state. Cook progress belongs to the
/// patty, not the slot it sits in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patty {
    pub id: PattyId,
    pub bottom_cook: f32,
    pub top_cook: f32,
    pub down_face: Face,
}

// ---------------------------------------------------------------------------
// Orders and customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub target: Burger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub order: Order,
}

/// The two customer lines: new arrivals queue at the register; customers
/// whose order has been taken wait for their burger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterState {
    pub register_line: VecDeque<Customer>,
    pub wait_line: VecDeque<Customer>,
    pub selected_order: Option<OrderNumber>,
}

impl RegisterState {
    pub fn waiting(&self, number: OrderNumber) -> Option<&Customer> {
        self.wait_line.iter().find(|c| c.order.number == number)
    }
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub meta: MetaState,
    /// Current day number, starting at 1.
    pub day: u32,
    pub balance: i64,
    pub grill: GrillState,
    /// Patties pulled off the grill, ready for assembly.
    pub cooked_tray: Vec<Patty>,
    /// The burger currently under assembly.
    pub assembly: Burger,
    pub register: RegisterState,
    pub counters: Counters,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaState {
    pub tick: u64,
    pub seed: u64,
    pub schema_version: u32,
    pub content_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
    pub next_command_id: u64,
    pub next_order_number: u64,
    pub next_patty_id: u64,
    pub next_customer_id: u64,
}

// ---------------------------------------------------------------------------
// Command types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub id: CommandId,
    pub issued_tick: u64,
    pub execute_at_tick: u64,
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    /// Synthesize a customer with a randomized order from the unlocked set.
    SpawnCustomer,
    /// Move the front of the register line to the wait line.
    TakeOrder,
    SelectOrder {
        number: OrderNumber,
    },
    PlaceRawPatty {
        row: usize,
        col: usize,
    },
    MovePatty {
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
    },
    FlipPatty {
        row: usize,
        col: usize,
    },
    /// Pull a patty that has started cooking onto the cooked tray.
    TakePattyOffGrill {
        row: usize,
        col: usize,
    },
    DiscardPatty {
        row: usize,
        col: usize,
    },
    DiscardCookedPatty {
        patty: PattyId,
    },
    AddIngredient {
        kind: IngredientKind,
        accuracy: f32,
    },
    AddPattyFromTray {
        patty: PattyId,
        accuracy: f32,
    },
    RemoveLastIngredient,
    DiscardAssembly,
    /// Evaluate the assembly against the selected order and collect payment.
    ServeBurger,
    StartNextDay,
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub tick: u64,
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CustomerArrived {
        customer: CustomerId,
        order_number: OrderNumber,
    },
    OrderTaken {
        customer: CustomerId,
        order_number: OrderNumber,
    },
    OrderSelected {
        order_number: OrderNumber,
    },
    PattyPlaced {
        patty: PattyId,
        row: usize,
        col: usize,
    },
    PattyMoved {
        patty: PattyId,
        row: usize,
        col: usize,
    },
    PattyFlipped {
        patty: PattyId,
    },
    /// Cook-level threshold crossings, emitted once per patty.
    PattyServable {
        patty: PattyId,
    },
    PattyBurnt {
        patty: PattyId,
    },
    PattyTakenOffGrill {
        patty: PattyId,
    },
    PattyDiscarded {
        patty: PattyId,
    },
    IngredientAdded {
        kind: IngredientKind,
    },
    IngredientRemoved {
        kind: IngredientKind,
    },
    AssemblyDiscarded,
    BurgerEvaluated {
        order_number: OrderNumber,
        score: f32,
        payment: i64,
        tip: i64,
    },
    CustomerServed {
        customer: CustomerId,
        order_number: OrderNumber,
    },
    BalanceChanged {
        delta: i64,
        balance: i64,
    },
    DayStarted {
        day: u32,
        newly_unlocked: Vec<IngredientKind>,
    },
    /// Only emitted at `EventLevel::Debug`.
    CommandRejected {
        command: CommandId,
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub ingredients: Vec<IngredientDef>,
    pub unlock_schedule: Vec<UnlockDayDef>,
    pub constants: Constants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientDef {
    pub kind: IngredientKind,
    pub display_name: String,
    /// Menu price contribution, whole currency units.
    pub price: u32,
}

/// Ingredients newly available on `day`. The cumulative unlocked set is the
/// union of all entries up to the current day and never shrinks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockDayDef {
    pub day: u32,
    pub ingredients: Vec<IngredientKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    pub grill_rows: usize,
    pub grill_cols: usize,
    /// Simulated seconds that elapse per engine tick.
    pub seconds_per_tick: f32,
    /// Cook level at which a face counts as perfectly done.
    pub max_cook_level: f32,
    pub seconds_to_fully_cook_patty: f32,
    /// A face past this level is burnt. Strictly above `max_cook_level`.
    pub burnt_cook_level: f32,
    /// Minimum summed face cook level before a patty may be served.
    pub min_servable_cook_level: f32,
    pub order_min_fillings: usize,
    pub order_max_fillings: usize,
    /// Score subtracted per missing or extra ingredient.
    pub discrepancy_penalty: f32,
    /// Score subtracted per ingredient present but out of position.
    pub misorder_penalty: f32,
    /// Below this score the customer tips nothing.
    pub min_acceptable_score: f32,
    pub max_tip_fraction: f32,
    pub customer_arrival_interval_ticks: u64,
    pub customers_per_day: u32,
    pub starting_balance: i64,
    pub max_days: u32,
}
