//! Input validation for allocation setups.
//!
//! Checks structural integrity of the event layout and the membership data
//! before any placement is attempted. Detects:
//! - Duplicate IDs
//! - Zero-capacity areas and rooms
//! - Empty or malformed calendars and rotations
//! - People referencing missing groups
//! - Groups without members
//!
//! All checks run; every problem found is reported.

use crate::config::{EngineConfig, PRAYER_SEATS};
use crate::models::{Group, Person};
use std::collections::HashSet;

/// Hour indices are `u8`.
const MAX_PRAYER_HOURS: usize = u8::MAX as usize + 1;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A slot source declares no seats.
    ZeroCapacity,
    /// Calendar or rotation has no usable entries.
    EmptySchedule,
    /// Prayer rotation has more hours than an hour index can address.
    RotationTooLong,
    /// Prayer seat count differs from the fixed two seats.
    InvalidPrayerSeats,
    /// A person references a group that doesn't exist.
    InvalidGroupReference,
    /// A group has no members.
    EmptyGroup,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates an engine configuration.
///
/// Checks:
/// 1. No duplicate area IDs
/// 2. No duplicate room IDs
/// 3. Every area requires at least one person
/// 4. Every room has at least one bed
/// 5. The calendar has at least one day, and no day is without periods
/// 6. No duplicate calendar days
/// 7. The prayer rotation has at least one hour
/// 8. The prayer rotation fits in `u8` hour indices
/// 9. Prayer slots have exactly two seats
pub fn validate_config(config: &EngineConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let mut area_ids = HashSet::new();
    for area in &config.areas {
        if !area_ids.insert(&area.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate area ID: {}", area.id),
            ));
        }
        if area.required_people == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Area '{}' requires no people", area.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for room in &config.rooms {
        if !room_ids.insert(&room.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", room.id),
            ));
        }
        if room.beds == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Room '{}' has no beds", room.id),
            ));
        }
    }

    if config.calendar.days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptySchedule,
            "Calendar has no days",
        ));
    }
    let mut days = HashSet::new();
    for row in &config.calendar.days {
        if !days.insert(row.day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate calendar day: {}", row.day),
            ));
        }
        if row.periods.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySchedule,
                format!("Calendar day {} has no periods", row.day),
            ));
        }
    }

    if config.prayer.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptySchedule,
            "Prayer rotation has no hours",
        ));
    }
    if config.prayer.len() > MAX_PRAYER_HOURS {
        errors.push(ValidationError::new(
            ValidationErrorKind::RotationTooLong,
            format!(
                "Prayer rotation has {} hours, at most {MAX_PRAYER_HOURS} allowed",
                config.prayer.len()
            ),
        ));
    }

    if config.prayer_seats != PRAYER_SEATS {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidPrayerSeats,
            format!(
                "Prayer slots have {PRAYER_SEATS} seats, got {}",
                config.prayer_seats
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates membership data.
///
/// Checks:
/// 1. No duplicate group IDs
/// 2. No duplicate person IDs
/// 3. Every person references an existing group
/// 4. Every group has at least one member
pub fn validate_membership(groups: &[Group], people: &[Person]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut group_ids = HashSet::new();
    for g in groups {
        if !group_ids.insert(&g.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate group ID: {}", g.id),
            ));
        }
    }

    let mut person_ids = HashSet::new();
    let mut populated = HashSet::new();
    for p in people {
        if !person_ids.insert(&p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate person ID: {}", p.id),
            ));
        }
        if group_ids.contains(&p.group_id) {
            populated.insert(&p.group_id);
        } else {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidGroupReference,
                format!("Person '{}' references unknown group '{}'", p.id, p.group_id),
            ));
        }
    }

    for g in groups {
        if !populated.contains(&g.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyGroup,
                format!("Group '{}' has no members", g.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CalendarDay, DaySpan, EventCalendar, EventDay, Partition, PrayerRotation, Room,
        ShiftArea,
    };

    fn sample_groups() -> Vec<Group> {
        vec![Group::male("G1"), Group::female("G2")]
    }

    fn sample_people() -> Vec<Person> {
        vec![
            Person::new("P1", "G1"),
            Person::new("P2", "G1"),
            Person::passer("P3", "G2"),
        ]
    }

    #[test]
    fn test_valid_config() {
        let config = EngineConfig::default()
            .with_area(ShiftArea::new("kitchen", 15))
            .with_room(Room::new("R1", 6, Partition::Male));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_duplicate_area_and_room() {
        let config = EngineConfig::default()
            .with_area(ShiftArea::new("kitchen", 15))
            .with_area(ShiftArea::new("kitchen", 3))
            .with_room(Room::new("R1", 6, Partition::Male))
            .with_room(Room::new("R1", 2, Partition::Female));

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("area")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("room")));
    }

    #[test]
    fn test_zero_capacity() {
        let config = EngineConfig::default()
            .with_area(ShiftArea::new("kitchen", 0))
            .with_room(Room::new("R1", 0, Partition::Male));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::ZeroCapacity)
                .count(),
            2
        );
    }

    #[test]
    fn test_empty_calendar_and_rotation() {
        let config = EngineConfig::default()
            .with_calendar(EventCalendar::new())
            .with_prayer_rotation(PrayerRotation {
                start_hour: 19,
                spans: vec![],
            });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::EmptySchedule)
                .count(),
            2
        );
    }

    #[test]
    fn test_day_without_periods_and_duplicate_day() {
        let mut config = EngineConfig::default();
        config.calendar.days.push(CalendarDay {
            day: EventDay::Friday,
            periods: vec![],
        });

        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptySchedule));
    }

    #[test]
    fn test_rotation_too_long() {
        let span = |day| DaySpan { day, hours: 100 };
        let config = EngineConfig::default().with_prayer_rotation(PrayerRotation {
            start_hour: 19,
            spans: vec![
                span(EventDay::Friday),
                span(EventDay::Saturday),
                span(EventDay::Sunday),
            ],
        });
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::RotationTooLong);

        let mut fits = config.clone();
        fits.prayer.spans[2].hours = 56;
        assert!(validate_config(&fits).is_ok());
    }

    #[test]
    fn test_invalid_prayer_seats() {
        let mut config = EngineConfig::default();
        config.prayer_seats = 3;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidPrayerSeats);
    }

    #[test]
    fn test_valid_membership() {
        assert!(validate_membership(&sample_groups(), &sample_people()).is_ok());
    }

    #[test]
    fn test_duplicate_person() {
        let mut people = sample_people();
        people.push(Person::new("P1", "G2"));
        let errors = validate_membership(&sample_groups(), &people).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("person")));
    }

    #[test]
    fn test_invalid_group_reference() {
        let mut people = sample_people();
        people.push(Person::new("P9", "G404"));
        let errors = validate_membership(&sample_groups(), &people).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidGroupReference));
    }

    #[test]
    fn test_empty_group_and_multiple_errors() {
        let groups = vec![Group::male("G1"), Group::male("G1"), Group::female("G3")];
        let people = vec![Person::new("P1", "G1")];

        let errors = validate_membership(&groups, &people).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyGroup && e.message.contains("G3")));
        assert!(errors.len() >= 2);
    }
}
