//! Recoverable error types for core operations.
//!
//! Every failure leaves state unchanged; callers surface these as command
//! rejections. The only non-recoverable condition in the crate is an
//! order-number regression, which panics as a programming error.

use crate::{IngredientKind, OrderNumber, PattyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrillError {
    OutOfRange { row: usize, col: usize },
    SlotOccupied { row: usize, col: usize },
    SlotEmpty { row: usize, col: usize },
    /// The patty has not started cooking and cannot go on the tray.
    NotCooked,
}

impl std::fmt::Display for GrillError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrillError::OutOfRange { row, col } => {
                write!(f, "slot ({row}, {col}) is outside the grill")
            }
            GrillError::SlotOccupied { row, col } => {
                write!(f, "slot ({row}, {col}) already holds a patty")
            }
            GrillError::SlotEmpty { row, col } => {
                write!(f, "slot ({row}, {col}) is empty")
            }
            GrillError::NotCooked => write!(f, "patty has not started cooking"),
        }
    }
}

impl std::error::Error for GrillError {}

/// A rejected placement hands the patty back to the caller.
#[derive(Debug)]
pub struct PlaceError {
    pub patty: crate::Patty,
    pub error: GrillError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Referenced an ingredient type not yet unlocked.
    IngredientLocked(IngredientKind),
    /// Patties reach the assembly only via the cooked tray.
    PattyViaTrayOnly,
    UnknownPatty(PattyId),
    EmptyAssembly,
    RegisterLineEmpty,
    NoSelectedOrder,
    /// No customer with this order number is waiting.
    OrderNotWaiting(OrderNumber),
    MaxDayReached(u32),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::IngredientLocked(kind) => {
                write!(f, "ingredient '{kind}' is not unlocked yet")
            }
            ServiceError::PattyViaTrayOnly => {
                write!(f, "patties are added from the cooked tray")
            }
            ServiceError::UnknownPatty(id) => write!(f, "no patty '{id}' on the tray"),
            ServiceError::EmptyAssembly => write!(f, "the assembly is empty"),
            ServiceError::RegisterLineEmpty => write!(f, "the register line is empty"),
            ServiceError::NoSelectedOrder => write!(f, "no order is selected"),
            ServiceError::OrderNotWaiting(number) => {
                write!(f, "no customer waiting on order {number}")
            }
            ServiceError::MaxDayReached(day) => {
                write!(f, "day {day} is the last day of the game")
            }
        }
    }
}

impl std::error::Error for ServiceError {}
