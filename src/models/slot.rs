//! Slot models.
//!
//! A slot is an addressable unit of schedulable capacity on one of the three
//! scheduling surfaces. Each slot has numbered positions (seats) `1..=capacity`.
//!
//! | Surface | Key | Capacity | Positions |
//! |---------|-----|----------|-----------|
//! | Shift | (day, period, area) | area's `required_people` | interchangeable |
//! | Prayer | rotation hour index | 2 | distinguishable |
//! | Room | room id | room's bed count | interchangeable |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EventDay, Partition, Period, PrayerHour};

/// One of the three independent scheduling domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Surface {
    /// Work shifts across service areas.
    Shift,
    /// Continuous hourly prayer rotation.
    Prayer,
    /// Dormitory room placement.
    Room,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Surface::Shift => "shift",
            Surface::Prayer => "prayer",
            Surface::Room => "room",
        })
    }
}

/// Service area identifier (e.g. "kitchen").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AreaId(pub String);

/// Room identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl AreaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A service area staffed in every (day, period) of the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftArea {
    /// Unique area identifier.
    pub id: AreaId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Seats to fill per (day, period).
    pub required_people: usize,
}

impl ShiftArea {
    pub fn new(id: impl Into<String>, required_people: usize) -> Self {
        Self {
            id: AreaId::new(id),
            name: String::new(),
            required_people,
        }
    }

    /// Sets the area name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id.0
        } else {
            &self.name
        }
    }
}

/// A dormitory room. Rooms are gender-exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: RoomId,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Number of beds (capacity).
    pub beds: usize,
    /// Partition allowed in this room.
    pub partition: Partition,
}

impl Room {
    pub fn new(id: impl Into<String>, beds: usize, partition: Partition) -> Self {
        Self {
            id: RoomId::new(id),
            name: String::new(),
            beds,
            partition,
        }
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id.0
        } else {
            &self.name
        }
    }
}

/// Address of a slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotKey {
    Shift {
        day: EventDay,
        period: Period,
        area: AreaId,
    },
    Prayer {
        hour: u8,
    },
    Room {
        room: RoomId,
    },
}

impl SlotKey {
    pub fn shift(day: EventDay, period: Period, area: impl Into<String>) -> Self {
        Self::Shift {
            day,
            period,
            area: AreaId::new(area),
        }
    }

    pub fn prayer(hour: u8) -> Self {
        Self::Prayer { hour }
    }

    pub fn room(room: impl Into<String>) -> Self {
        Self::Room {
            room: RoomId::new(room),
        }
    }

    /// Surface this key addresses.
    pub fn surface(&self) -> Surface {
        match self {
            SlotKey::Shift { .. } => Surface::Shift,
            SlotKey::Prayer { .. } => Surface::Prayer,
            SlotKey::Room { .. } => Surface::Room,
        }
    }

    /// `(day, period)` of a shift key.
    pub fn shift_time(&self) -> Option<(EventDay, Period)> {
        match self {
            SlotKey::Shift { day, period, .. } => Some((*day, *period)),
            _ => None,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKey::Shift { day, period, area } => write!(f, "{day} {period} / {area}"),
            SlotKey::Prayer { hour } => write!(f, "prayer hour {hour}"),
            SlotKey::Room { room } => write!(f, "room {room}"),
        }
    }
}

/// One seat within a slot (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub u16);

impl Position {
    pub fn new(seat: u16) -> Self {
        Self(seat)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// A resolved slot: key, capacity, and effective partition filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub key: SlotKey,
    /// Maximum simultaneous occupants.
    pub capacity: usize,
    /// Partition filter applied to incoming occupants.
    pub partition: Option<Partition>,
    /// Human-readable label.
    pub label: String,
    /// Rotation details for prayer slots.
    pub prayer_hour: Option<PrayerHour>,
}

impl Slot {
    pub fn surface(&self) -> Surface {
        self.key.surface()
    }

    /// Whether positions are distinguishable (each seat has its own meaning).
    pub fn has_ordered_positions(&self) -> bool {
        self.surface() == Surface::Prayer
    }

    /// Whether `position` is one of this slot's seats.
    pub fn has_position(&self, position: Position) -> bool {
        position.0 >= 1 && (position.0 as usize) <= self.capacity
    }

    /// All seats of the slot in order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (1..=self.capacity)
            .filter_map(|seat| u16::try_from(seat).ok())
            .map(Position)
    }
}

/// Explicit view filter passed into catalog and engine calls.
///
/// Replaces ambient UI state such as the "current gender view".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub day: Option<EventDay>,
    pub period: Option<Period>,
    pub partition: Option<Partition>,
}

impl Scope {
    /// Scope with no filters.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, day: EventDay) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.partition = Some(partition);
        self
    }
}
