//! Assignment store.
//!
//! The mapping `(slot, position) → person`. [`AssignmentStore`] is the seam
//! to the persistence layer; [`MemoryStore`] keeps rows in memory with a
//! per-person index for conflict lookups.
//!
//! Stores are plain data structures: they apply every write they are given.
//! Invariant checks happen in the engine, which serializes writes.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{Assignment, PersonId, Position, SeatKey, SlotKey, Surface};

/// Durable storage of assignment rows keyed by `(slot, position)`.
///
/// Writes must be immediately visible to subsequent reads.
pub trait AssignmentStore: Send + Sync {
    /// Current occupant row of a seat.
    fn get(&self, seat: &SeatKey) -> Option<Assignment>;

    /// Creates or replaces the row of the assignment's seat.
    /// Returns the replaced row.
    fn put(&mut self, assignment: Assignment) -> Option<Assignment>;

    /// Deletes the row of a seat. Returns the deleted row.
    fn remove(&mut self, seat: &SeatKey) -> Option<Assignment>;

    /// Rows of one slot, in position order.
    fn in_slot(&self, slot: &SlotKey) -> Vec<Assignment>;

    /// Rows on `surface` held by `person`.
    fn held_by(&self, surface: Surface, person: &PersonId) -> Vec<Assignment>;

    /// Every row on `surface`.
    fn on_surface(&self, surface: Surface) -> Vec<Assignment>;

    /// Total number of rows.
    fn len(&self) -> usize;

    /// Whether the store holds no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory assignment store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: BTreeMap<SeatKey, Assignment>,
    by_person: HashMap<PersonId, BTreeSet<SeatKey>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: seeds rows, e.g. data loaded from an earlier session.
    pub fn with_assignments(mut self, rows: impl IntoIterator<Item = Assignment>) -> Self {
        for row in rows {
            self.put(row);
        }
        self
    }

    fn unindex(&mut self, row: &Assignment) {
        if let Some(seats) = self.by_person.get_mut(&row.person) {
            seats.remove(&row.seat());
            if seats.is_empty() {
                self.by_person.remove(&row.person);
            }
        }
    }
}

impl AssignmentStore for MemoryStore {
    fn get(&self, seat: &SeatKey) -> Option<Assignment> {
        self.rows.get(seat).cloned()
    }

    fn put(&mut self, assignment: Assignment) -> Option<Assignment> {
        let seat = assignment.seat();
        self.by_person
            .entry(assignment.person.clone())
            .or_default()
            .insert(seat.clone());
        let prior = self.rows.insert(seat, assignment.clone());
        if let Some(prior) = &prior {
            if prior.person != assignment.person {
                self.unindex(prior);
            }
        }
        prior
    }

    fn remove(&mut self, seat: &SeatKey) -> Option<Assignment> {
        let prior = self.rows.remove(seat)?;
        self.unindex(&prior);
        Some(prior)
    }

    fn in_slot(&self, slot: &SlotKey) -> Vec<Assignment> {
        let lo = SeatKey::new(slot.clone(), Position(0));
        let hi = SeatKey::new(slot.clone(), Position(u16::MAX));
        self.rows.range(lo..=hi).map(|(_, row)| row.clone()).collect()
    }

    fn held_by(&self, surface: Surface, person: &PersonId) -> Vec<Assignment> {
        self.by_person
            .get(person)
            .into_iter()
            .flatten()
            .filter(|seat| seat.surface() == surface)
            .filter_map(|seat| self.rows.get(seat).cloned())
            .collect()
    }

    fn on_surface(&self, surface: Surface) -> Vec<Assignment> {
        self.rows
            .values()
            .filter(|row| row.surface() == surface)
            .cloned()
            .collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}
