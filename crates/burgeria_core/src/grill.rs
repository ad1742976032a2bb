//! Patty cook state and the grill grid.
//!
//! Cook levels grow without an upper clamp; burning is signalled by a
//! threshold above the perfectly-done level, never by saturation.

use serde::{Deserialize, Serialize};

use crate::errors::{GrillError, PlaceError};
use crate::{Constants, Face, Patty, PattyId};

/// Cook-level units gained per simulated second on the grill-side-down face.
pub fn cook_rate_per_second(constants: &Constants) -> f32 {
    constants.max_cook_level / constants.seconds_to_fully_cook_patty
}

impl Patty {
    pub fn raw(id: PattyId) -> Self {
        Patty {
            id,
            bottom_cook: 0.0,
            top_cook: 0.0,
            down_face: Face::Bottom,
        }
    }

    /// Advance the grill-side-down face by rate × elapsed seconds.
    pub fn advance_cooking(&mut self, seconds: f32, constants: &Constants) {
        let gained = cook_rate_per_second(constants) * seconds;
        match self.down_face {
            Face::Bottom => self.bottom_cook += gained,
            Face::Top => self.top_cook += gained,
        }
    }

    /// Swap which face is down. Cook levels are untouched.
    pub fn flip(&mut self) {
        self.down_face = match self.down_face {
            Face::Bottom => Face::Top,
            Face::Top => Face::Bottom,
        };
    }

    pub fn total_cook(&self) -> f32 {
        self.bottom_cook + self.top_cook
    }

    pub fn is_servable(&self, constants: &Constants) -> bool {
        self.total_cook() >= constants.min_servable_cook_level
    }

    pub fn is_burnt(&self, constants: &Constants) -> bool {
        self.bottom_cook > constants.burnt_cook_level
            || self.top_cook > constants.burnt_cook_level
    }

    pub fn has_started_cooking(&self) -> bool {
        self.total_cook() > 0.0
    }
}

/// Threshold crossing observed while advancing the grill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookTransition {
    BecameServable(PattyId),
    BecameBurnt(PattyId),
}

/// Fixed rows×cols grid of optional patty placements. The grid is owned by
/// the engine; callers read it through immutable accessors only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrillState {
    rows: usize,
    cols: usize,
    slots: Vec<Option<Patty>>,
}

impl GrillState {
    pub fn new(rows: usize, cols: usize) -> Self {
        GrillState {
            rows,
            cols,
            slots: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Patty> {
        self.index(row, col).and_then(|i| self.slots[i].as_ref())
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Patty> {
        self.index(row, col).and_then(|i| self.slots[i].as_mut())
    }

    /// Occupied slots in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Patty)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.as_ref()
                .map(|patty| (i / self.cols, i % self.cols, patty))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Insert a patty. A rejected placement returns it unchanged.
    pub fn place(&mut self, patty: Patty, row: usize, col: usize) -> Result<(), PlaceError> {
        let Some(index) = self.index(row, col) else {
            return Err(PlaceError {
                patty,
                error: GrillError::OutOfRange { row, col },
            });
        };
        if self.slots[index].is_some() {
            return Err(PlaceError {
                patty,
                error: GrillError::SlotOccupied { row, col },
            });
        }
        self.slots[index] = Some(patty);
        Ok(())
    }

    /// Detach the patty at (row, col). No-op on empty or out-of-range slots.
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Patty> {
        self.index(row, col).and_then(|i| self.slots[i].take())
    }

    /// Cook every occupied slot, reporting servable/burnt crossings.
    pub fn advance(&mut self, seconds: f32, constants: &Constants) -> Vec<CookTransition> {
        let mut transitions = Vec::new();
        for slot in &mut self.slots {
            let Some(patty) = slot.as_mut() else {
                continue;
            };
            let was_servable = patty.is_servable(constants);
            let was_burnt = patty.is_burnt(constants);
            patty.advance_cooking(seconds, constants);
            if !was_servable && patty.is_servable(constants) {
                transitions.push(CookTransition::BecameServable(patty.id.clone()));
            }
            if !was_burnt && patty.is_burnt(constants) {
                transitions.push(CookTransition::BecameBurnt(patty.id.clone()));
            }
        }
        transitions
    }
}
