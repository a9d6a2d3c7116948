use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use super::{format_date, format_time, status_marker, Entity};
use crate::store::{Completable, Record};

/// A patient appointment on a given day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub date: NaiveDate,
    pub notes: String,
    pub importance: u8,
    pub done: bool,
}

impl Appointment {
    pub const DEFAULT_IMPORTANCE: u8 = 2;

    pub fn new(
        name: impl Into<String>,
        start: NaiveTime,
        end: NaiveTime,
        date: NaiveDate,
        notes: impl Into<String>,
        importance: u8,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            date,
            notes: notes.into(),
            importance,
            done: false,
        }
    }

    /// True when both appointments fall on the same day and their
    /// half-open [start, end) intervals intersect
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }

    /// Identifies an appointment the way del/mark/unmark commands do
    pub fn matches(&self, name: &str, start: NaiveTime, date: NaiveDate) -> bool {
        self.name == name && self.start == start && self.date == date
    }

    pub fn importance_label(&self) -> &'static str {
        match self.importance {
            1 => "LOW",
            3 => "HIGH",
            _ => "MEDIUM",
        }
    }
}

impl Record for Appointment {
    const ENTITY: Entity = Entity::Appointment;

    fn conflicts_with(&self, other: &Self) -> bool {
        self.overlaps(other)
    }
}

impl Completable for Appointment {
    fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Name: {}, From: {}, To: {}, Date: {}, Importance: {}, Notes: {}",
            status_marker(self.done),
            self.name,
            format_time(self.start),
            format_time(self.end),
            format_date(self.date),
            self.importance_label(),
            self.notes
        )
    }
}
