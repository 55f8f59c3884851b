//! Seat allocation engine for a weekend retreat.
//!
//! Places people into capacity-bounded, partition-aware seats across three
//! surfaces that share one contract:
//!
//! | Surface | Slot | Capacity | Partition filter | Exclusive with |
//! |---------|------|----------|------------------|----------------|
//! | Shift | (day, period, area) | area's required people | none | other areas at the same (day, period) |
//! | Prayer | rotation hour | 2 ordered seats | scope's partition | the other seat of the hour |
//! | Room | room | beds | room's partition | nothing |
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Person`, `Group`, `EventCalendar`,
//!   `PrayerRotation`, `SlotKey`, `Slot`, `Assignment`, `Scope`
//! - **`membership`**: Person/group lookup seam and the in-memory `Roster`
//! - **`catalog`**: Enumerates and resolves slots per surface
//! - **`store`**: Assignment persistence seam and the in-memory store
//! - **`conflict`** / **`capacity`**: Exclusivity and capacity rules
//! - **`engine`**: `AllocationEngine` with assign, clear, swap, occupancy
//! - **`filler`**: Load-balancing greedy bulk fill
//! - **`report`**: Occupancy metrics
//! - **`config`** / **`validation`**: JSON configuration and input checks
//! - **`error`**: Allocation error taxonomy
//!
//! # Logging
//!
//! Decisions are emitted as `tracing` events; install any subscriber to see
//! them.

pub mod capacity;
pub mod catalog;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod filler;
pub mod membership;
pub mod models;
pub mod report;
pub mod store;
pub mod validation;

pub use engine::AllocationEngine;
pub use error::{AllocationError, AllocationResult};
