//! Greedy bulk fill.
//!
//! # Algorithm
//!
//! 1. Shuffle the candidates once with a seeded RNG (tie-breaking order).
//! 2. For each slot selected by (surface, scope), in catalog order, and
//!    each empty seat within capacity:
//!    - order candidates by current load on the surface (stable, so the
//!      shuffled order breaks ties),
//!    - skip candidates already seated in this slot or already refused by it,
//!    - on the room surface, skip candidates who already have a bed,
//!    - place the first candidate the engine accepts.
//! 3. Refusals are recorded and never retried for the same slot.
//!
//! Every placement goes through [`AllocationEngine::assign`], so capacity,
//! partition, and conflict rules hold exactly as for single assignments.
//!
//! # Complexity
//! O(s * c log c) where s=empty seats, c=candidates.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::engine::AllocationEngine;
use crate::error::AllocationError;
use crate::membership::MembershipProvider;
use crate::models::{PersonId, Position, Scope, SlotKey, Surface};
use crate::store::AssignmentStore;

/// A placement the engine refused during a fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub slot: SlotKey,
    pub position: Position,
    pub person: PersonId,
    pub error: AllocationError,
}

/// Result of a bulk fill.
#[derive(Debug, Clone, Default)]
pub struct FillOutcome {
    /// Seats filled by this run.
    pub placed: usize,
    /// Seats still empty afterwards, per slot. Slots left full are omitted.
    pub unfilled: BTreeMap<SlotKey, usize>,
    /// Refused placements.
    pub rejections: Vec<Rejection>,
}

impl FillOutcome {
    /// Total seats still empty.
    pub fn unfilled_seats(&self) -> usize {
        self.unfilled.values().sum()
    }

    /// Whether every selected seat is occupied.
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }
}

/// Load-balancing greedy filler.
///
/// # Example
///
/// ```
/// use u_allocate::config::EngineConfig;
/// use u_allocate::engine::AllocationEngine;
/// use u_allocate::filler::GreedyFiller;
/// use u_allocate::membership::Roster;
/// use u_allocate::models::{Group, Partition, Person, Scope, ShiftArea, Surface};
///
/// let config = EngineConfig::default().with_area(ShiftArea::new("kitchen", 2));
/// let roster = Roster::new()
///     .with_group(Group::male("G1"))
///     .with_person(Person::new("A", "G1"))
///     .with_person(Person::new("B", "G1"));
/// let candidates = roster.ids_in_partition(Partition::Male);
/// let engine = AllocationEngine::new(&config, roster);
///
/// let outcome = GreedyFiller::new()
///     .with_seed(7)
///     .fill(&engine, Surface::Shift, &Scope::all(), &candidates);
/// assert_eq!(outcome.placed, 14);
/// assert!(outcome.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyFiller {
    seed: Option<u64>,
}

impl GreedyFiller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the tie-breaking order for reproducible fills.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fills the empty seats of the slots selected by `(surface, scope)`.
    pub fn fill<M, S>(
        &self,
        engine: &AllocationEngine<M, S>,
        surface: Surface,
        scope: &Scope,
        candidates: &[PersonId],
    ) -> FillOutcome
    where
        M: MembershipProvider,
        S: AssignmentStore,
    {
        let mut rng = SmallRng::seed_from_u64(self.seed.unwrap_or_else(rand::random));
        self.fill_with_rng(engine, surface, scope, candidates, &mut rng)
    }

    /// Same as [`fill`](Self::fill) with a caller-provided RNG.
    pub fn fill_with_rng<M, S, R>(
        &self,
        engine: &AllocationEngine<M, S>,
        surface: Surface,
        scope: &Scope,
        candidates: &[PersonId],
        rng: &mut R,
    ) -> FillOutcome
    where
        M: MembershipProvider,
        S: AssignmentStore,
        R: Rng,
    {
        let mut order: Vec<PersonId> = candidates.to_vec();
        order.sort();
        order.dedup();
        order.shuffle(rng);

        let mut load: HashMap<PersonId, usize> = order
            .iter()
            .map(|p| (p.clone(), engine.assignments_of(surface, p).len()))
            .collect();

        // One bed per person
        let single_seat = surface == Surface::Room;

        let mut outcome = FillOutcome::default();
        for slot in engine.occupancy(surface, scope) {
            let mut seated: HashSet<PersonId> =
                slot.seats.iter().filter_map(|s| s.occupant.clone()).collect();
            let mut refused: HashSet<PersonId> = HashSet::new();
            let mut remaining = slot.vacancies();

            let empty: Vec<Position> = slot
                .seats
                .iter()
                .filter(|s| s.occupant.is_none())
                .map(|s| s.position)
                .collect();

            'seats: for position in empty {
                if remaining == 0 {
                    break;
                }
                order.sort_by_key(|p| load.get(p).copied().unwrap_or(0));
                for person in &order {
                    if seated.contains(person) || refused.contains(person) {
                        continue;
                    }
                    if single_seat && load.get(person).is_some_and(|&n| n > 0) {
                        continue;
                    }
                    match engine.assign(surface, &slot.slot, position, person, scope) {
                        Ok(_) => {
                            *load.entry(person.clone()).or_insert(0) += 1;
                            seated.insert(person.clone());
                            outcome.placed += 1;
                            remaining -= 1;
                            continue 'seats;
                        }
                        Err(error) => {
                            let slot_wide = matches!(
                                error,
                                AllocationError::CapacityExceeded { .. }
                                    | AllocationError::UnknownSlot(_)
                            );
                            debug!(slot = %slot.slot, %position, %person, code = error.code(), "fill candidate refused");
                            refused.insert(person.clone());
                            outcome.rejections.push(Rejection {
                                slot: slot.slot.clone(),
                                position,
                                person: person.clone(),
                                error,
                            });
                            if slot_wide {
                                break 'seats;
                            }
                        }
                    }
                }
            }

            if remaining > 0 {
                outcome.unfilled.insert(slot.slot.clone(), remaining);
            }
        }

        info!(
            %surface,
            placed = outcome.placed,
            unfilled = outcome.unfilled_seats(),
            rejected = outcome.rejections.len(),
            "fill complete"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::membership::Roster;
    use crate::models::{EventDay, Group, Partition, Person, Room, ShiftArea};
    use crate::report::OccupancyReport;

    /// 9 male groups feeding 100 workers.
    fn retreat_roster() -> Roster {
        let mut roster = Roster::new();
        for g in 1..=9 {
            roster.add_group(Group::male(format!("G{g}")));
        }
        for i in 0..100 {
            roster.add_person(Person::new(format!("P{i:03}"), format!("G{}", i % 9 + 1)));
        }
        roster
    }

    #[test]
    fn test_kitchen_scenario_fills_105() {
        let roster = retreat_roster();
        let candidates = roster.ids_in_partition(Partition::Male);
        assert_eq!(candidates.len(), 100);

        let config = EngineConfig::default().with_area(ShiftArea::new("kitchen", 15));
        let engine = AllocationEngine::new(&config, roster);
        let outcome = GreedyFiller::new()
            .with_seed(42)
            .fill(&engine, Surface::Shift, &Scope::all(), &candidates);

        assert_eq!(outcome.placed, 105);
        assert!(outcome.is_complete());
        assert!(outcome.rejections.is_empty());

        let slots = engine.occupancy(Surface::Shift, &Scope::all());
        assert_eq!(slots.len(), 7);
        assert!(slots.iter().all(|s| s.filled() == 15));

        let report = OccupancyReport::calculate(&slots);
        assert_eq!(report.filled_seats, 105);
        assert_eq!(report.distinct_people, 100);
        assert_eq!(report.max_load(), 2);
    }

    #[test]
    fn test_fill_bounded_by_candidates() {
        let roster = retreat_roster();
        let candidates: Vec<PersonId> = roster
            .ids_in_partition(Partition::Male)
            .into_iter()
            .take(10)
            .collect();
        let config = EngineConfig::default().with_area(ShiftArea::new("kitchen", 15));
        let engine = AllocationEngine::new(&config, roster);

        let outcome = GreedyFiller::new()
            .with_seed(1)
            .fill(&engine, Surface::Shift, &Scope::all(), &candidates);
        // Distinct people per slot bound the fill
        assert_eq!(outcome.placed, 70);
        assert_eq!(outcome.unfilled.len(), 7);
        assert_eq!(outcome.unfilled_seats(), 35);
    }

    #[test]
    fn test_room_fill_gives_one_bed_per_person() {
        let mut roster = Roster::new().with_group(Group::male("M"));
        for i in 0..4 {
            roster.add_person(Person::new(format!("P{i}"), "M"));
        }
        let candidates = roster.ids_in_partition(Partition::Male);
        let config = EngineConfig::default()
            .with_room(Room::new("R1", 3, Partition::Male))
            .with_room(Room::new("R2", 3, Partition::Male));
        let engine = AllocationEngine::new(&config, roster);

        let outcome = GreedyFiller::new()
            .with_seed(1)
            .fill(&engine, Surface::Room, &Scope::all(), &candidates);
        assert_eq!(outcome.placed, 4);
        assert_eq!(outcome.unfilled_seats(), 2);
        for person in &candidates {
            assert_eq!(engine.assignments_of(Surface::Room, person).len(), 1);
        }
    }

    #[test]
    fn test_room_fill_skips_people_already_housed() {
        let roster = Roster::new()
            .with_group(Group::male("M"))
            .with_person(Person::new("A", "M"))
            .with_person(Person::new("B", "M"));
        let candidates = roster.ids_in_partition(Partition::Male);
        let config = EngineConfig::default()
            .with_room(Room::new("R1", 2, Partition::Male))
            .with_room(Room::new("R2", 2, Partition::Male));
        let engine = AllocationEngine::new(&config, roster);
        engine
            .assign(Surface::Room, &SlotKey::room("R2"), Position(1), &PersonId::new("A"), &Scope::all())
            .unwrap();

        let outcome = GreedyFiller::new()
            .with_seed(5)
            .fill(&engine, Surface::Room, &Scope::all(), &candidates);
        assert_eq!(outcome.placed, 1);
        assert_eq!(engine.occupant(&SlotKey::room("R1"), Position(1)), Some(PersonId::new("B")));
        assert_eq!(engine.assignments_of(Surface::Room, &PersonId::new("A")).len(), 1);
    }

    #[test]
    fn test_fill_keeps_existing_occupants() {
        let roster = retreat_roster();
        let candidates = roster.ids_in_partition(Partition::Male);
        let config = EngineConfig::default().with_room(Room::new("R1", 3, Partition::Male));
        let engine = AllocationEngine::new(&config, roster);
        let room = SlotKey::room("R1");
        engine
            .assign(Surface::Room, &room, Position(2), &PersonId::new("P050"), &Scope::all())
            .unwrap();

        let outcome = GreedyFiller::new()
            .with_seed(3)
            .fill(&engine, Surface::Room, &Scope::all(), &candidates);
        assert_eq!(outcome.placed, 2);
        assert_eq!(engine.occupant(&room, Position(2)), Some(PersonId::new("P050")));

        let seated = &engine.occupancy(Surface::Room, &Scope::all())[0];
        assert_eq!(seated.load_by_person().len(), 3);
    }

    #[test]
    fn test_prayer_fill_records_partition_refusals() {
        let roster = Roster::new()
            .with_group(Group::male("G1"))
            .with_group(Group::female("G2"))
            .with_person(Person::new("A", "G1"))
            .with_person(Person::new("B", "G1"))
            .with_person(Person::new("F", "G2"));
        let candidates = vec![PersonId::new("A"), PersonId::new("B"), PersonId::new("F")];
        let engine = AllocationEngine::new(&EngineConfig::default(), roster);

        let scope = Scope::all()
            .with_day(EventDay::Friday)
            .with_partition(Partition::Male);
        let outcome = GreedyFiller::new()
            .with_seed(9)
            .fill(&engine, Surface::Prayer, &scope, &candidates);

        assert_eq!(outcome.placed, 10);
        assert!(outcome.is_complete());
        assert!(outcome.rejections.len() >= 4);
        assert!(outcome
            .rejections
            .iter()
            .all(|r| r.person == PersonId::new("F") && r.error.code() == "partition_mismatch"));
    }

    #[test]
    fn test_seeded_fill_is_reproducible() {
        let run = |seed| {
            let roster = retreat_roster();
            let candidates = roster.ids_in_partition(Partition::Male);
            let config = EngineConfig::default().with_area(ShiftArea::new("kitchen", 4));
            let engine = AllocationEngine::new(&config, roster);
            GreedyFiller::new()
                .with_seed(seed)
                .fill(&engine, Surface::Shift, &Scope::all(), &candidates);
            engine.occupancy(Surface::Shift, &Scope::all())
        };
        assert_eq!(run(11), run(11));
    }
}
