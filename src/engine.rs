//! Allocation engine facade.
//!
//! Composes the catalog, membership provider, assignment store, conflict
//! detector, and capacity manager behind one contract used identically by
//! all three surfaces.
//!
//! # Placement Checks
//!
//! `assign` validates, in order:
//! 1. The slot exists for the surface (and scope partition).
//! 2. The person is known.
//! 3. Capacity: an empty seat may only be taken while the slot has room.
//!    Replacing an occupied seat never changes occupancy.
//! 4. Partition: the incoming person must match the slot's filter.
//!    Occupants already seated are never re-checked or evicted.
//! 5. Conflict: the person must not hold an exclusive seat on the surface.
//!
//! # Seat State
//!
//! `Empty → Occupied` on assign, `Occupied → Occupied` on assign of another
//! person (silent overwrite, the displaced occupant is returned), and
//! `Occupied → Empty` on clear.
//!
//! # Concurrency
//! Every write runs its read-check-write under one store write lock, so
//! concurrent writers serialize and the last writer wins. Reads take the
//! read lock and see the latest committed write.

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::capacity::CapacityManager;
use crate::catalog::SlotCatalog;
use crate::config::EngineConfig;
use crate::conflict::ConflictDetector;
use crate::error::{AllocationError, AllocationResult};
use crate::membership::MembershipProvider;
use crate::models::{
    Assignment, Partition, PersonId, Placement, Position, Scope, SeatKey, SeatView, Slot,
    SlotKey, SlotOccupancy, Surface,
};
use crate::store::{AssignmentStore, MemoryStore};

/// Allocation engine shared by the shift, prayer, and room surfaces.
///
/// # Example
///
/// ```
/// use u_allocate::config::EngineConfig;
/// use u_allocate::engine::AllocationEngine;
/// use u_allocate::membership::Roster;
/// use u_allocate::models::{EventDay, Group, Period, Person, PersonId, Position, Scope, ShiftArea, SlotKey, Surface};
///
/// let config = EngineConfig::default().with_area(ShiftArea::new("kitchen", 15));
/// let roster = Roster::new()
///     .with_group(Group::male("G1"))
///     .with_person(Person::new("P1", "G1"));
/// let engine = AllocationEngine::new(&config, roster);
///
/// let slot = SlotKey::shift(EventDay::Friday, Period::Dinner, "kitchen");
/// let placed = engine
///     .assign(Surface::Shift, &slot, Position(1), &PersonId::new("P1"), &Scope::all())
///     .unwrap();
/// assert!(placed.displaced.is_none());
/// ```
pub struct AllocationEngine<M, S = MemoryStore> {
    catalog: SlotCatalog,
    membership: M,
    store: RwLock<S>,
}

impl<M: MembershipProvider> AllocationEngine<M, MemoryStore> {
    /// Creates an engine over an empty in-memory store.
    pub fn new(config: &EngineConfig, membership: M) -> Self {
        Self::with_store(SlotCatalog::new(config), membership, MemoryStore::new())
    }
}

impl<M: MembershipProvider, S: AssignmentStore> AllocationEngine<M, S> {
    /// Creates an engine over an existing store.
    pub fn with_store(catalog: SlotCatalog, membership: M, store: S) -> Self {
        Self {
            catalog,
            membership,
            store: RwLock::new(store),
        }
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    pub fn membership(&self) -> &M {
        &self.membership
    }

    /// Consumes the engine, returning its store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    /// Slots of `surface` selected by `scope`.
    pub fn slots_for(&self, surface: Surface, scope: &Scope) -> Vec<Slot> {
        self.catalog.slots_for(surface, scope)
    }

    /// Places `person` at `(slot, position)`, replacing any occupant.
    ///
    /// Re-assigning a seat to its current occupant is a successful no-op.
    ///
    /// # Errors
    /// `UnknownSlot`, `UnknownPerson`, `CapacityExceeded`,
    /// `PartitionMismatch`, or `SchedulingConflict`. The store is
    /// unchanged on error.
    pub fn assign(
        &self,
        surface: Surface,
        slot: &SlotKey,
        position: Position,
        person: &PersonId,
        scope: &Scope,
    ) -> AllocationResult<Placement> {
        let resolved = self.resolve(surface, slot, scope)?;
        let seat = SeatKey::new(slot.clone(), position);

        let mut store = self.store.write();
        let current = store.get(&seat);
        if current.as_ref().is_some_and(|row| &row.person == person) {
            debug!(%surface, %slot, %position, %person, "seat already held by person");
            return Ok(Placement {
                assignment: Assignment::new(slot.clone(), position, person.clone()),
                displaced: Some(person.clone()),
            });
        }

        if let Err(err) = self.check_placement(&*store, &resolved, position, person) {
            debug!(%surface, %slot, %position, %person, code = err.code(), "placement rejected");
            return Err(err);
        }

        let assignment = Assignment::new(slot.clone(), position, person.clone());
        let displaced = store.put(assignment.clone()).map(|prior| prior.person);
        drop(store);

        match &displaced {
            Some(prior) => info!(%surface, %slot, %position, %person, displaced = %prior, "seat overwritten"),
            None => debug!(%surface, %slot, %position, %person, "seat assigned"),
        }
        Ok(Placement {
            assignment,
            displaced,
        })
    }

    /// Empties `(slot, position)`. Clearing an empty seat succeeds.
    ///
    /// Returns the removed occupant, if any.
    ///
    /// # Errors
    /// `UnknownSlot` if `slot` does not belong to `surface`.
    pub fn clear(
        &self,
        surface: Surface,
        slot: &SlotKey,
        position: Position,
    ) -> AllocationResult<Option<PersonId>> {
        ensure_surface(surface, slot)?;
        let removed = self
            .store
            .write()
            .remove(&SeatKey::new(slot.clone(), position))
            .map(|row| row.person);
        debug!(%surface, %slot, %position, removed = ?removed, "seat cleared");
        Ok(removed)
    }

    /// Exchanges the occupants of two seats of one surface atomically.
    ///
    /// Each moved person is validated against the state after the exchange;
    /// if either placement is refused both seats keep their original
    /// occupants. Moving an occupant into an empty seat is allowed.
    ///
    /// Returns the new occupants of `a` and `b`.
    pub fn swap(
        &self,
        surface: Surface,
        a: &SeatKey,
        b: &SeatKey,
        scope: &Scope,
    ) -> AllocationResult<(Option<PersonId>, Option<PersonId>)> {
        let slot_a = self.resolve(surface, &a.slot, scope)?;
        let slot_b = self.resolve(surface, &b.slot, scope)?;

        let mut store = self.store.write();
        let row_a = store.get(a);
        let row_b = store.get(b);
        if a == b || (row_a.is_none() && row_b.is_none()) {
            let keep = row_a.map(|row| row.person);
            return Ok((keep.clone(), keep.filter(|_| a == b)));
        }

        store.remove(a);
        store.remove(b);

        let moves = [
            (&slot_a, a.position, row_b.as_ref().map(|row| row.person.clone())),
            (&slot_b, b.position, row_a.as_ref().map(|row| row.person.clone())),
        ];
        let mut placed: Vec<SeatKey> = Vec::new();
        for (slot, position, incoming) in &moves {
            let Some(person) = incoming else { continue };
            if let Err(err) = self.check_placement(&*store, slot, *position, person) {
                for seat in &placed {
                    store.remove(seat);
                }
                for row in row_a.iter().chain(row_b.iter()) {
                    store.put(row.clone());
                }
                debug!(%surface, a = %a.slot, b = %b.slot, code = err.code(), "swap rejected");
                return Err(err);
            }
            let row = Assignment::new(slot.key.clone(), *position, person.clone());
            placed.push(row.seat());
            store.put(row);
        }
        drop(store);

        let [(_, _, into_a), (_, _, into_b)] = moves;
        debug!(%surface, a = %a.slot, b = %b.slot, "seats swapped");
        Ok((into_a, into_b))
    }

    /// Current occupant of a seat.
    pub fn occupant(&self, slot: &SlotKey, position: Position) -> Option<PersonId> {
        self.store
            .read()
            .get(&SeatKey::new(slot.clone(), position))
            .map(|row| row.person)
    }

    /// Whether a new occupant could still be seated in `slot`.
    ///
    /// # Errors
    /// `UnknownSlot` if the slot does not resolve under `scope`.
    pub fn has_room(&self, slot: &SlotKey, scope: &Scope) -> AllocationResult<bool> {
        let resolved = self.resolve(slot.surface(), slot, scope)?;
        Ok(CapacityManager::has_room(&*self.store.read(), &resolved))
    }

    /// Whether placing `person` at `(slot, position)` would clash with
    /// their other commitments on `surface`.
    pub fn conflicts(
        &self,
        surface: Surface,
        person: &PersonId,
        slot: &SlotKey,
        position: Position,
    ) -> bool {
        ConflictDetector::conflicts(&*self.store.read(), surface, person, slot, position)
    }

    /// Seats held by `person` on `surface`.
    pub fn assignments_of(&self, surface: Surface, person: &PersonId) -> Vec<Assignment> {
        self.store.read().held_by(surface, person)
    }

    /// Every seat of every slot selected by `(surface, scope)`.
    ///
    /// Seats whose occupant does not match the slot's partition filter are
    /// flagged read-only. Occupants at seat numbers beyond the current
    /// capacity are listed after the regular seats.
    pub fn occupancy(&self, surface: Surface, scope: &Scope) -> Vec<SlotOccupancy> {
        let slots = self.catalog.slots_for(surface, scope);
        let store = self.store.read();
        slots
            .into_iter()
            .map(|slot| {
                let rows = store.in_slot(&slot.key);
                let mut seats: Vec<SeatView> = slot
                    .positions()
                    .map(|position| {
                        let occupant = rows
                            .iter()
                            .find(|row| row.position == position)
                            .map(|row| row.person.clone());
                        self.seat_view(&slot, position, occupant)
                    })
                    .collect();
                seats.extend(
                    rows.iter()
                        .filter(|row| !slot.has_position(row.position))
                        .map(|row| self.seat_view(&slot, row.position, Some(row.person.clone()))),
                );
                SlotOccupancy {
                    slot: slot.key.clone(),
                    label: slot.label.clone(),
                    capacity: slot.capacity,
                    seats,
                }
            })
            .collect()
    }

    fn seat_view(&self, slot: &Slot, position: Position, occupant: Option<PersonId>) -> SeatView {
        let read_only = occupant.as_ref().is_some_and(|person| {
            !Partition::admits(slot.partition, self.membership.partition_of(person))
        });
        SeatView {
            position,
            occupant,
            read_only,
        }
    }

    fn resolve(&self, surface: Surface, slot: &SlotKey, scope: &Scope) -> AllocationResult<Slot> {
        ensure_surface(surface, slot)?;
        self.catalog
            .resolve(slot, scope)
            .ok_or_else(|| AllocationError::UnknownSlot(slot.to_string()))
    }

    /// Steps 2-5 of the placement checks, against `store` as it is now.
    fn check_placement(
        &self,
        store: &S,
        slot: &Slot,
        position: Position,
        person: &PersonId,
    ) -> AllocationResult<()> {
        if self.membership.lookup_person(person).is_none() {
            return Err(AllocationError::UnknownPerson(person.clone()));
        }

        CapacityManager::check_seat(store, slot, position)?;

        if let Some(required) = slot.partition {
            let actual = self.membership.partition_of(person);
            if !Partition::admits(Some(required), actual) {
                return Err(AllocationError::PartitionMismatch {
                    person: person.clone(),
                    slot: slot.key.clone(),
                    required,
                    actual,
                });
            }
        }

        if let Some(clash) = ConflictDetector::find(store, person, &slot.key, position) {
            let reason = match &clash.slot {
                SlotKey::Prayer { .. } => {
                    format!("already holds {} of {}", clash.position, slot.label)
                }
                other => {
                    let label = self
                        .catalog
                        .resolve(other, &Scope::all())
                        .map_or_else(|| other.to_string(), |s| s.label);
                    format!("already serving at {label}")
                }
            };
            return Err(AllocationError::SchedulingConflict {
                person: person.clone(),
                clashing: clash.slot,
                reason,
            });
        }

        Ok(())
    }
}

fn ensure_surface(surface: Surface, slot: &SlotKey) -> AllocationResult<()> {
    if slot.surface() == surface {
        Ok(())
    } else {
        Err(AllocationError::UnknownSlot(format!(
            "{slot} is not a {surface} slot"
        )))
    }
}
