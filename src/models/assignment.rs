//! Assignment and occupancy models.
//!
//! An assignment records that one person holds one seat of one slot. The
//! `(slot, position)` pair is the assignment's identity: writing to it again
//! replaces the previous occupant.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{PersonId, Position, SlotKey, Surface};

/// Identity of a seat: `(slot, position)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatKey {
    pub slot: SlotKey,
    pub position: Position,
}

impl SeatKey {
    pub fn new(slot: SlotKey, position: Position) -> Self {
        Self { slot, position }
    }

    pub fn surface(&self) -> Surface {
        self.slot.surface()
    }
}

/// A person placed into a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Occupied slot.
    pub slot: SlotKey,
    /// Occupied seat within the slot.
    pub position: Position,
    /// Occupant.
    pub person: PersonId,
}

impl Assignment {
    pub fn new(slot: SlotKey, position: Position, person: PersonId) -> Self {
        Self {
            slot,
            position,
            person,
        }
    }

    /// Surface tag (derived from the slot key).
    #[inline]
    pub fn surface(&self) -> Surface {
        self.slot.surface()
    }

    pub fn seat(&self) -> SeatKey {
        SeatKey::new(self.slot.clone(), self.position)
    }
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// The assignment now in the store.
    pub assignment: Assignment,
    /// Whoever held the seat before, if anyone.
    pub displaced: Option<PersonId>,
}

impl Placement {
    /// Whether a different person was overwritten.
    pub fn is_overwrite(&self) -> bool {
        self.displaced
            .as_ref()
            .is_some_and(|prior| *prior != self.assignment.person)
    }
}

/// State of one seat as seen by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatView {
    pub position: Position,
    pub occupant: Option<PersonId>,
    /// Occupant does not match the slot's current partition filter.
    /// Such seats are shown but must not be edited through placement.
    pub read_only: bool,
}

/// All seats of one slot, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOccupancy {
    pub slot: SlotKey,
    pub label: String,
    pub capacity: usize,
    pub seats: Vec<SeatView>,
}

impl SlotOccupancy {
    /// Number of occupied seats.
    pub fn filled(&self) -> usize {
        self.seats.iter().filter(|s| s.occupant.is_some()).count()
    }

    /// Free seats remaining under capacity.
    pub fn vacancies(&self) -> usize {
        self.capacity.saturating_sub(self.filled())
    }

    pub fn is_full(&self) -> bool {
        self.filled() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.filled() == 0
    }

    /// Whether `person` holds any seat of this slot.
    pub fn contains(&self, person: &PersonId) -> bool {
        self.seats
            .iter()
            .any(|s| s.occupant.as_ref() == Some(person))
    }

    /// Seats held per person.
    pub fn load_by_person(&self) -> HashMap<PersonId, usize> {
        let mut load = HashMap::new();
        for person in self.seats.iter().filter_map(|s| s.occupant.as_ref()) {
            *load.entry(person.clone()).or_insert(0) += 1;
        }
        load
    }
}
