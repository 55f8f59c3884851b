//! Capacity management.
//!
//! Enforces `occupancy(slot) <= slot.capacity`. Seats are numbered
//! `1..=capacity`; writing to an occupied seat replaces its occupant and
//! never changes occupancy, so capacity is only checked when a new
//! occupant takes an empty seat.
//!
//! Prayer slots have a structural capacity of two named seats: any other
//! seat number does not exist rather than being "full".

use crate::error::{AllocationError, AllocationResult};
use crate::models::{Position, SeatKey, Slot};
use crate::store::AssignmentStore;

/// Stateless capacity checker.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityManager;

impl CapacityManager {
    /// Number of filled seats of a slot.
    pub fn occupancy<S: AssignmentStore + ?Sized>(store: &S, slot: &Slot) -> usize {
        store.in_slot(&slot.key).len()
    }

    /// Whether a new occupant could still be seated.
    pub fn has_room<S: AssignmentStore + ?Sized>(store: &S, slot: &Slot) -> bool {
        if slot.has_ordered_positions() {
            return slot
                .positions()
                .any(|p| store.get(&SeatKey::new(slot.key.clone(), p)).is_none());
        }
        Self::occupancy(store, slot) < slot.capacity
    }

    /// Checks that `position` can receive an occupant.
    ///
    /// # Errors
    /// - `UnknownSlot` for seat 0, or a prayer seat other than 1 and 2.
    /// - `CapacityExceeded` for a seat number beyond capacity, or an empty
    ///   seat when the slot is already full.
    pub fn check_seat<S: AssignmentStore + ?Sized>(
        store: &S,
        slot: &Slot,
        position: Position,
    ) -> AllocationResult<()> {
        if position.0 == 0 {
            return Err(AllocationError::UnknownSlot(format!(
                "{}: seats are numbered from 1",
                slot.key
            )));
        }
        if slot.has_ordered_positions() {
            return if slot.has_position(position) {
                Ok(())
            } else {
                Err(AllocationError::UnknownSlot(format!(
                    "{}: no {position}",
                    slot.key
                )))
            };
        }

        let exceeded = || AllocationError::CapacityExceeded {
            slot: slot.key.clone(),
            position,
            capacity: slot.capacity,
        };
        if !slot.has_position(position) {
            return Err(exceeded());
        }
        if store.get(&SeatKey::new(slot.key.clone(), position)).is_some() {
            return Ok(());
        }
        if Self::occupancy(store, slot) >= slot.capacity {
            return Err(exceeded());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Partition, PersonId, SlotKey};
    use crate::store::MemoryStore;

    fn room(capacity: usize) -> Slot {
        Slot {
            key: SlotKey::room("R1"),
            capacity,
            partition: Some(Partition::Male),
            label: "R1".into(),
            prayer_hour: None,
        }
    }

    fn prayer() -> Slot {
        Slot {
            key: SlotKey::prayer(0),
            capacity: 2,
            partition: None,
            label: "Friday 19:00".into(),
            prayer_hour: None,
        }
    }

    fn seat(slot: &Slot, n: u16, person: &str) -> Assignment {
        Assignment::new(slot.key.clone(), Position(n), PersonId::new(person))
    }

    #[test]
    fn test_occupancy_and_has_room() {
        let slot = room(2);
        let mut store = MemoryStore::new();
        assert_eq!(CapacityManager::occupancy(&store, &slot), 0);
        assert!(CapacityManager::has_room(&store, &slot));

        store.put(seat(&slot, 1, "A"));
        store.put(seat(&slot, 2, "B"));
        assert_eq!(CapacityManager::occupancy(&store, &slot), 2);
        assert!(!CapacityManager::has_room(&store, &slot));
    }

    #[test]
    fn test_check_seat_empty_and_replace() {
        let slot = room(2);
        let mut store = MemoryStore::new();
        assert!(CapacityManager::check_seat(&store, &slot, Position(1)).is_ok());

        store.put(seat(&slot, 1, "A"));
        store.put(seat(&slot, 2, "B"));
        // Replacing an occupied seat is always allowed
        assert!(CapacityManager::check_seat(&store, &slot, Position(2)).is_ok());
    }

    #[test]
    fn test_check_seat_beyond_capacity() {
        let slot = room(2);
        let store = MemoryStore::new();
        let err = CapacityManager::check_seat(&store, &slot, Position(3)).unwrap_err();
        assert_eq!(err.code(), "capacity_exceeded");
    }

    #[test]
    fn test_check_seat_after_capacity_lowered() {
        // Seats 2 and 3 were filled when the room had three beds.
        let slot = room(2);
        let mut store = MemoryStore::new();
        store.put(seat(&slot, 2, "A"));
        store.put(seat(&slot, 3, "B"));

        let err = CapacityManager::check_seat(&store, &slot, Position(1)).unwrap_err();
        assert!(matches!(err, AllocationError::CapacityExceeded { capacity: 2, .. }));
    }

    #[test]
    fn test_check_seat_zero() {
        let store = MemoryStore::new();
        let err = CapacityManager::check_seat(&store, &room(2), Position(0)).unwrap_err();
        assert_eq!(err.code(), "unknown_slot");
    }

    #[test]
    fn test_prayer_structural_capacity() {
        let slot = prayer();
        let mut store = MemoryStore::new();
        assert!(CapacityManager::check_seat(&store, &slot, Position(2)).is_ok());
        let err = CapacityManager::check_seat(&store, &slot, Position(3)).unwrap_err();
        assert_eq!(err.code(), "unknown_slot");

        store.put(seat(&slot, 1, "A"));
        assert!(CapacityManager::has_room(&store, &slot));
        store.put(seat(&slot, 2, "B"));
        assert!(!CapacityManager::has_room(&store, &slot));
    }
}
