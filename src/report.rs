//! Occupancy metrics.
//!
//! Summarizes the seat listing of one surface into staffing indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total seats | Sum of slot capacities |
//! | Filled seats | Seats with an occupant, including seats beyond capacity |
//! | Fill rate | filled / total, 1.0 when there are no seats |
//! | Fully staffed | Slots with `filled >= capacity` |
//! | Empty slots | Slots with no occupant |
//! | Read-only seats | Occupants that no longer match the slot's partition |
//! | Distinct people | Number of different people seated |
//! | Load | Seats held per person |

use std::collections::HashMap;

use crate::models::{PersonId, SlotOccupancy};

/// Staffing indicators over a set of slots.
#[derive(Debug, Clone)]
pub struct OccupancyReport {
    /// Sum of capacities.
    pub total_seats: usize,
    /// Seats with an occupant.
    pub filled_seats: usize,
    /// Fraction of seats filled (0.0..=1.0).
    pub fill_rate: f64,
    /// Slots with no vacancy.
    pub fully_staffed: usize,
    /// Slots with no occupant.
    pub empty_slots: usize,
    /// Occupants flagged read-only.
    pub read_only_seats: usize,
    /// Number of distinct people seated.
    pub distinct_people: usize,
    /// Seats held per person.
    pub load_by_person: HashMap<PersonId, usize>,
}

impl OccupancyReport {
    /// Computes indicators from an occupancy listing.
    pub fn calculate(slots: &[SlotOccupancy]) -> Self {
        let mut total_seats = 0;
        let mut filled_seats = 0;
        let mut fully_staffed = 0;
        let mut empty_slots = 0;
        let mut read_only_seats = 0;
        let mut load_by_person: HashMap<PersonId, usize> = HashMap::new();

        for slot in slots {
            total_seats += slot.capacity;
            filled_seats += slot.filled();
            if slot.is_full() {
                fully_staffed += 1;
            }
            if slot.is_empty() {
                empty_slots += 1;
            }
            read_only_seats += slot.seats.iter().filter(|s| s.read_only).count();
            for (person, seats) in slot.load_by_person() {
                *load_by_person.entry(person).or_insert(0) += seats;
            }
        }

        // Seats beyond a lowered capacity can push filled over total
        let fill_rate = if total_seats == 0 {
            1.0
        } else {
            (filled_seats as f64 / total_seats as f64).min(1.0)
        };

        Self {
            total_seats,
            filled_seats,
            fill_rate,
            fully_staffed,
            empty_slots,
            read_only_seats,
            distinct_people: load_by_person.len(),
            load_by_person,
        }
    }

    /// Largest number of seats held by one person.
    pub fn max_load(&self) -> usize {
        self.load_by_person.values().copied().max().unwrap_or(0)
    }

    /// Whether the fill rate reaches `min_fill_rate`.
    pub fn meets_threshold(&self, min_fill_rate: f64) -> bool {
        self.fill_rate >= min_fill_rate
    }
}
