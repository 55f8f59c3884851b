//! Event calendar and prayer rotation models.
//!
//! The event runs over three named days. Which meal/service periods exist
//! on each day is a fixed table, not something derived from the clock.
//!
//! # Default Table
//!
//! | Day | Periods |
//! |-----|---------|
//! | Friday | Dinner |
//! | Saturday | Breakfast, Lunch, Snack, Dinner |
//! | Sunday | Breakfast, Lunch |
//!
//! # Prayer Rotation
//! A continuous sequence of hourly slots starting Friday 19:00. Element `i`
//! falls at hour-of-day `(start_hour + i) mod 24`; the owning day is given by
//! consecutive day spans (5 Friday hours, 24 Saturday hours, 20 Sunday hours).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named day of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventDay {
    Friday,
    Saturday,
    Sunday,
}

/// A service period within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Period {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl EventDay {
    pub fn label(self) -> &'static str {
        match self {
            EventDay::Friday => "Friday",
            EventDay::Saturday => "Saturday",
            EventDay::Sunday => "Sunday",
        }
    }
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Breakfast => "Breakfast",
            Period::Lunch => "Lunch",
            Period::Snack => "Snack",
            Period::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for EventDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the calendar table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: EventDay,
    pub periods: Vec<Period>,
}

/// Central `day → periods` table.
///
/// Row order is the display order of the shift grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCalendar {
    pub days: Vec<CalendarDay>,
}

impl Default for EventCalendar {
    fn default() -> Self {
        Self::new()
            .with_day(EventDay::Friday, vec![Period::Dinner])
            .with_day(
                EventDay::Saturday,
                vec![Period::Breakfast, Period::Lunch, Period::Snack, Period::Dinner],
            )
            .with_day(EventDay::Sunday, vec![Period::Breakfast, Period::Lunch])
    }
}

impl EventCalendar {
    /// Creates an empty calendar (no days).
    pub fn new() -> Self {
        Self { days: Vec::new() }
    }

    /// Adds (or replaces) the periods of a day.
    pub fn with_day(mut self, day: EventDay, periods: Vec<Period>) -> Self {
        match self.days.iter_mut().find(|d| d.day == day) {
            Some(row) => row.periods = periods,
            None => self.days.push(CalendarDay { day, periods }),
        }
        self
    }

    /// Valid periods of a day. Empty if the day is not in the table.
    pub fn periods(&self, day: EventDay) -> &[Period] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.periods.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `(day, period)` is a valid combination.
    pub fn is_valid(&self, day: EventDay, period: Period) -> bool {
        self.periods(day).contains(&period)
    }

    /// All valid `(day, period)` combinations in table order.
    pub fn combinations(&self) -> Vec<(EventDay, Period)> {
        self.days
            .iter()
            .flat_map(|d| d.periods.iter().map(move |&p| (d.day, p)))
            .collect()
    }

    /// Number of valid `(day, period)` combinations.
    pub fn combination_count(&self) -> usize {
        self.days.iter().map(|d| d.periods.len()).sum()
    }
}

/// Consecutive run of rotation hours belonging to one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySpan {
    pub day: EventDay,
    pub hours: u8,
}

/// One element of the prayer rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrayerHour {
    /// Absolute index within the rotation (0-based).
    pub index: u8,
    /// Day owning this hour.
    pub day: EventDay,
    /// Hour of day (0..24).
    pub hour_of_day: u8,
}

impl fmt::Display for PrayerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.day, self.hour_of_day)
    }
}

/// Fixed prayer rotation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerRotation {
    /// Hour of day of element 0.
    pub start_hour: u8,
    /// Day spans in rotation order.
    pub spans: Vec<DaySpan>,
}

impl Default for PrayerRotation {
    fn default() -> Self {
        Self {
            start_hour: 19,
            spans: vec![
                DaySpan {
                    day: EventDay::Friday,
                    hours: 5,
                },
                DaySpan {
                    day: EventDay::Saturday,
                    hours: 24,
                },
                DaySpan {
                    day: EventDay::Sunday,
                    hours: 20,
                },
            ],
        }
    }
}

impl PrayerRotation {
    /// Total number of hours in the rotation.
    pub fn len(&self) -> usize {
        self.spans.iter().map(|s| s.hours as usize).sum()
    }

    /// Whether the rotation has no hours.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves an absolute index. `None` past the end of the rotation.
    pub fn hour(&self, index: u8) -> Option<PrayerHour> {
        let mut remaining = index as usize;
        for span in &self.spans {
            let hours = span.hours as usize;
            if remaining < hours {
                return Some(PrayerHour {
                    index,
                    day: span.day,
                    hour_of_day: ((self.start_hour as usize + index as usize) % 24) as u8,
                });
            }
            remaining -= hours;
        }
        None
    }

    /// Every hour of the rotation in order.
    pub fn hours(&self) -> Vec<PrayerHour> {
        (0..self.len())
            .filter_map(|i| u8::try_from(i).ok())
            .filter_map(|i| self.hour(i))
            .collect()
    }

    /// Index of the first element owned by `day`.
    pub fn day_start(&self, day: EventDay) -> Option<usize> {
        let mut offset = 0;
        for span in &self.spans {
            if span.day == day {
                return Some(offset);
            }
            offset += span.hours as usize;
        }
        None
    }
}
