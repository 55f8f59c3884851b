//! Allocation domain models.
//!
//! Provides the data types shared by every scheduling surface: people and
//! their groups, the event calendar, slots with their seats, and the
//! assignments placing people into seats.
//!
//! # Surface Mappings
//!
//! | u-allocate | Shift grid | Prayer rotation | Dormitory |
//! |------------|-----------|-----------------|-----------|
//! | Slot | (day, period, area) | rotation hour | room |
//! | Position | interchangeable seat | seat 1 / seat 2 | bed |
//! | Partition filter | none | scope partition | room partition |

mod assignment;
mod calendar;
mod person;
mod slot;

pub use assignment::{Assignment, Placement, SeatKey, SeatView, SlotOccupancy};
pub use calendar::{CalendarDay, DaySpan, EventCalendar, EventDay, Period, PrayerHour, PrayerRotation};
pub use person::{Group, GroupId, Partition, Person, PersonId, PersonKind};
pub use slot::{AreaId, Position, Room, RoomId, Scope, ShiftArea, Slot, SlotKey, Surface};
