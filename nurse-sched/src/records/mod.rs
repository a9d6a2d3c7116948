pub mod appointment;
pub mod medicine;
pub mod patient;
pub mod shift;

use std::fmt;

use chrono::{NaiveDate, NaiveTime};

pub use appointment::Appointment;
pub use medicine::Medicine;
pub use patient::Patient;
pub use shift::Shift;

/// chrono format strings shared by the parser, the save files and display
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The kinds of record the assistant keeps a list of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Appointment,
    Shift,
    Patient,
    Medicine,
}

impl Entity {
    /// Capitalised name for the start of a sentence
    pub fn title(self) -> &'static str {
        match self {
            Entity::Appointment => "Appointment",
            Entity::Shift => "Shift",
            Entity::Patient => "Patient",
            Entity::Medicine => "Medicine",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Appointment => "appointment",
            Entity::Shift => "shift",
            Entity::Patient => "patient",
            Entity::Medicine => "medicine",
        };
        f.write_str(name)
    }
}

/// Formats a time of day as HH:MM
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Formats a date as YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Checkbox shown in front of records that can be marked as done
pub fn status_marker(done: bool) -> &'static str {
    if done {
        "[X]"
    } else {
        "[ ]"
    }
}
