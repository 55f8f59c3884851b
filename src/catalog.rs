//! Slot catalog.
//!
//! Enumerates the addressable slots of each surface and resolves slot keys
//! to their static capacity and partition filter. The catalog is immutable
//! and never fails: scopes that select nothing yield an empty sequence.
//!
//! # Ordering
//!
//! - Shift: calendar table order (day, then period), then area order.
//! - Prayer: rotation order (hour index 0 first).
//! - Room: configuration order.

use crate::config::EngineConfig;
use crate::models::{
    AreaId, EventCalendar, Partition, PrayerRotation, Room, RoomId, Scope, ShiftArea, Slot,
    SlotKey, Surface,
};

/// Immutable enumeration of every slot of the event.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    calendar: EventCalendar,
    prayer: PrayerRotation,
    prayer_seats: usize,
    areas: Vec<ShiftArea>,
    rooms: Vec<Room>,
}

impl SlotCatalog {
    /// Builds a catalog from a configuration.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            calendar: config.calendar.clone(),
            prayer: config.prayer.clone(),
            prayer_seats: config.prayer_seats,
            areas: config.areas.clone(),
            rooms: config.rooms.clone(),
        }
    }

    pub fn calendar(&self) -> &EventCalendar {
        &self.calendar
    }

    pub fn prayer_rotation(&self) -> &PrayerRotation {
        &self.prayer
    }

    pub fn area(&self, id: &AreaId) -> Option<&ShiftArea> {
        self.areas.iter().find(|a| &a.id == id)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// Slots of `surface` selected by `scope`, in catalog order.
    pub fn slots_for(&self, surface: Surface, scope: &Scope) -> Vec<Slot> {
        match surface {
            Surface::Shift => self.shift_slots(scope),
            Surface::Prayer => self.prayer_slots(scope),
            Surface::Room => self.room_slots(scope),
        }
    }

    /// Resolves a key to its slot.
    ///
    /// Only the scope's partition is considered: it becomes the filter of a
    /// prayer slot, and hides a room reserved for the other partition.
    /// Returns `None` for keys that address nothing.
    pub fn resolve(&self, key: &SlotKey, scope: &Scope) -> Option<Slot> {
        match key {
            SlotKey::Shift { day, period, area } => {
                if !self.calendar.is_valid(*day, *period) {
                    return None;
                }
                self.area(area).map(|a| self.shift_slot(key.clone(), a))
            }
            SlotKey::Prayer { hour } => {
                let prayer_hour = self.prayer.hour(*hour)?;
                Some(Slot {
                    key: key.clone(),
                    capacity: self.prayer_seats,
                    partition: scope.partition,
                    label: prayer_hour.to_string(),
                    prayer_hour: Some(prayer_hour),
                })
            }
            SlotKey::Room { room } => {
                let room = self.room(room)?;
                if !Partition::admits(scope.partition, Some(room.partition)) {
                    return None;
                }
                Some(room_slot(room))
            }
        }
    }

    /// Number of slots of a surface under `scope`.
    pub fn slot_count(&self, surface: Surface, scope: &Scope) -> usize {
        self.slots_for(surface, scope).len()
    }

    fn shift_slot(&self, key: SlotKey, area: &ShiftArea) -> Slot {
        let label = match &key {
            SlotKey::Shift { day, period, .. } => {
                format!("{day} {period} / {}", area.display_name())
            }
            other => other.to_string(),
        };
        Slot {
            key,
            capacity: area.required_people,
            partition: None,
            label,
            prayer_hour: None,
        }
    }

    fn shift_slots(&self, scope: &Scope) -> Vec<Slot> {
        self.calendar
            .combinations()
            .into_iter()
            .filter(|(day, _)| scope.day.map_or(true, |d| d == *day))
            .filter(|(_, period)| scope.period.map_or(true, |p| p == *period))
            .flat_map(|(day, period)| {
                self.areas.iter().map(move |area| {
                    self.shift_slot(
                        SlotKey::Shift {
                            day,
                            period,
                            area: area.id.clone(),
                        },
                        area,
                    )
                })
            })
            .collect()
    }

    fn prayer_slots(&self, scope: &Scope) -> Vec<Slot> {
        self.prayer
            .hours()
            .into_iter()
            .filter(|h| scope.day.map_or(true, |d| d == h.day))
            .map(|h| Slot {
                key: SlotKey::Prayer { hour: h.index },
                capacity: self.prayer_seats,
                partition: scope.partition,
                label: h.to_string(),
                prayer_hour: Some(h),
            })
            .collect()
    }

    fn room_slots(&self, scope: &Scope) -> Vec<Slot> {
        self.rooms
            .iter()
            .filter(|r| Partition::admits(scope.partition, Some(r.partition)))
            .map(room_slot)
            .collect()
    }
}

fn room_slot(room: &Room) -> Slot {
    Slot {
        key: SlotKey::Room {
            room: room.id.clone(),
        },
        capacity: room.beds,
        partition: Some(room.partition),
        label: room.display_name().to_string(),
        prayer_hour: None,
    }
}
