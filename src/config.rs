//! Engine configuration.
//!
//! Describes the fixed event layout the catalog enumerates: the calendar
//! table, the prayer rotation, service areas, and rooms.
//!
//! # Examples
//!
//! ```
//! use u_allocate::config::EngineConfig;
//! use u_allocate::models::{Partition, Room, ShiftArea};
//!
//! let config = EngineConfig::default()
//!     .with_area(ShiftArea::new("kitchen", 15).with_name("Kitchen"))
//!     .with_room(Room::new("R1", 6, Partition::Male));
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{EventCalendar, PrayerRotation, Room, ShiftArea};
use crate::validation::{self, ValidationError};

/// Seats per prayer hour.
pub const PRAYER_SEATS: usize = 2;

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Fixed event layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `day → periods` table for the shift grid.
    pub calendar: EventCalendar,
    /// Hourly prayer rotation.
    pub prayer: PrayerRotation,
    /// Service areas staffed in every calendar combination.
    pub areas: Vec<ShiftArea>,
    /// Dormitory rooms.
    pub rooms: Vec<Room>,
    /// Seats per prayer hour. Must equal [`PRAYER_SEATS`].
    pub prayer_seats: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calendar: EventCalendar::default(),
            prayer: PrayerRotation::default(),
            areas: Vec::new(),
            rooms: Vec::new(),
            prayer_seats: PRAYER_SEATS,
        }
    }
}

impl EngineConfig {
    pub fn with_calendar(mut self, calendar: EventCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_prayer_rotation(mut self, prayer: PrayerRotation) -> Self {
        self.prayer = prayer;
        self
    }

    pub fn with_area(mut self, area: ShiftArea) -> Self {
        self.areas.push(area);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Parses a JSON document and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        info!(
            areas = config.areas.len(),
            rooms = config.rooms.len(),
            shift_combinations = config.calendar.combination_count(),
            prayer_hours = config.prayer.len(),
            "loaded allocation config"
        );
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        validation::validate_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventDay, Partition, Period};

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.prayer_seats, 2);
        assert_eq!(config.prayer.len(), 49);
        assert_eq!(config.calendar.combination_count(), 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig::default()
            .with_area(ShiftArea::new("kitchen", 15))
            .with_room(Room::new("R1", 4, Partition::Female));
        let json = config.to_json().unwrap();
        let back = EngineConfig::from_json(&json).unwrap();

        assert_eq!(back.areas.len(), 1);
        assert_eq!(back.areas[0].required_people, 15);
        assert_eq!(back.rooms[0].partition, Partition::Female);
        assert_eq!(back.calendar, config.calendar);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let json = r#"{ "areas": [ { "id": "cleaning", "name": "Cleaning", "required_people": 4 } ] }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.areas[0].name, "Cleaning");
        assert!(config.calendar.is_valid(EventDay::Saturday, Period::Snack));
        assert_eq!(config.prayer_seats, PRAYER_SEATS);
    }

    #[test]
    fn test_from_json_names_optional() {
        let json = r#"{
            "areas": [ { "id": "kitchen", "required_people": 15 } ],
            "rooms": [ { "id": "R1", "beds": 6, "partition": "Male" } ]
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.areas[0].display_name(), "kitchen");
        assert_eq!(config.rooms[0].display_name(), "R1");
        assert_eq!(config.rooms[0].partition, Partition::Male);
    }

    #[test]
    fn test_from_json_parse_error() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_json_invalid() {
        let json = r#"{ "areas": [ { "id": "a", "name": "", "required_people": 0 } ], "prayer_seats": 3 }"#;
        let err = EngineConfig::from_json(json).unwrap_err();
        match err {
            ConfigError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
