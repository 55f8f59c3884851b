//! Conflict detection.
//!
//! A conflict is a rule-violating co-occurrence of one person in two
//! mutually exclusive seats of the same surface. Surfaces never conflict
//! with each other.
//!
//! # Rules
//!
//! | Surface | Exclusive with |
//! |---------|----------------|
//! | Shift | any seat of another area in the same (day, period) |
//! | Prayer | the other seat of the same hour |
//! | Room | nothing |
//!
//! Detection is a pure predicate over the current store state.

use crate::models::{Assignment, PersonId, Position, SlotKey, Surface};
use crate::store::AssignmentStore;

/// Stateless exclusivity checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    /// Whether placing `person` at `(slot, position)` clashes with their
    /// other commitments on `surface`.
    pub fn conflicts<S: AssignmentStore + ?Sized>(
        store: &S,
        surface: Surface,
        person: &PersonId,
        slot: &SlotKey,
        position: Position,
    ) -> bool {
        slot.surface() == surface && Self::find(store, person, slot, position).is_some()
    }

    /// Returns the first existing assignment the placement would clash with.
    pub fn find<S: AssignmentStore + ?Sized>(
        store: &S,
        person: &PersonId,
        slot: &SlotKey,
        position: Position,
    ) -> Option<Assignment> {
        let held = store.held_by(slot.surface(), person);
        match slot {
            SlotKey::Shift { .. } => {
                let time = slot.shift_time();
                held.into_iter()
                    .find(|a| &a.slot != slot && a.slot.shift_time() == time)
            }
            SlotKey::Prayer { .. } => held
                .into_iter()
                .find(|a| &a.slot == slot && a.position != position),
            SlotKey::Room { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDay, Period};
    use crate::store::MemoryStore;

    fn p() -> PersonId {
        PersonId::new("P")
    }

    fn store_with(rows: Vec<(SlotKey, u16)>) -> MemoryStore {
        MemoryStore::new().with_assignments(
            rows.into_iter()
                .map(|(slot, seat)| Assignment::new(slot, Position(seat), p())),
        )
    }

    #[test]
    fn test_shift_other_area_same_time_conflicts() {
        let kitchen = SlotKey::shift(EventDay::Friday, Period::Dinner, "kitchen");
        let cleaning = SlotKey::shift(EventDay::Friday, Period::Dinner, "cleaning");
        let store = store_with(vec![(kitchen.clone(), 1)]);

        let clash = ConflictDetector::find(&store, &p(), &cleaning, Position(1)).unwrap();
        assert_eq!(clash.slot, kitchen);
        assert!(ConflictDetector::conflicts(
            &store,
            Surface::Shift,
            &p(),
            &cleaning,
            Position(1)
        ));
    }

    #[test]
    fn test_shift_same_area_is_not_conflict() {
        let kitchen = SlotKey::shift(EventDay::Friday, Period::Dinner, "kitchen");
        let store = store_with(vec![(kitchen.clone(), 1)]);
        assert!(!ConflictDetector::conflicts(
            &store,
            Surface::Shift,
            &p(),
            &kitchen,
            Position(2)
        ));
    }

    #[test]
    fn test_shift_different_period_is_not_conflict() {
        let store = store_with(vec![(
            SlotKey::shift(EventDay::Saturday, Period::Lunch, "kitchen"),
            1,
        )]);
        let dinner = SlotKey::shift(EventDay::Saturday, Period::Dinner, "cleaning");
        let sunday_lunch = SlotKey::shift(EventDay::Sunday, Period::Lunch, "cleaning");
        assert!(ConflictDetector::find(&store, &p(), &dinner, Position(1)).is_none());
        assert!(ConflictDetector::find(&store, &p(), &sunday_lunch, Position(1)).is_none());
    }

    #[test]
    fn test_prayer_other_seat_same_hour_conflicts() {
        let store = store_with(vec![(SlotKey::prayer(0), 1)]);
        assert!(ConflictDetector::find(&store, &p(), &SlotKey::prayer(0), Position(2)).is_some());
        // Re-selecting the held seat is not a clash
        assert!(ConflictDetector::find(&store, &p(), &SlotKey::prayer(0), Position(1)).is_none());
        // Another hour is fine
        assert!(ConflictDetector::find(&store, &p(), &SlotKey::prayer(1), Position(1)).is_none());
    }

    #[test]
    fn test_room_never_conflicts() {
        let store = store_with(vec![(SlotKey::room("R1"), 1)]);
        assert!(!ConflictDetector::conflicts(
            &store,
            Surface::Room,
            &p(),
            &SlotKey::room("R2"),
            Position(1)
        ));
    }

    #[test]
    fn test_surfaces_are_independent() {
        let store = store_with(vec![
            (SlotKey::shift(EventDay::Friday, Period::Dinner, "kitchen"), 1),
            (SlotKey::room("R1"), 1),
        ]);
        assert!(ConflictDetector::find(&store, &p(), &SlotKey::prayer(0), Position(1)).is_none());
    }

    #[test]
    fn test_surface_mismatch_is_not_conflict() {
        let kitchen = SlotKey::shift(EventDay::Friday, Period::Dinner, "kitchen");
        let cleaning = SlotKey::shift(EventDay::Friday, Period::Dinner, "cleaning");
        let store = store_with(vec![(kitchen, 1)]);
        assert!(!ConflictDetector::conflicts(
            &store,
            Surface::Room,
            &p(),
            &cleaning,
            Position(1)
        ));
    }
}
