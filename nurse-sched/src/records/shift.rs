use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use super::{format_date, format_time, status_marker, Entity};
use crate::store::{Completable, Record};

/// A work shift with the task assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub date: NaiveDate,
    pub task: String,
    pub done: bool,
}

impl Shift {
    /// Callers must pass `start < end` and a non-empty task; the parser and
    /// the save-file decoder both check this before getting here.
    pub fn new(start: NaiveTime, end: NaiveTime, date: NaiveDate, task: impl Into<String>) -> Self {
        let task = task.into();
        debug_assert!(start < end, "shift start must be before its end");
        debug_assert!(!task.is_empty(), "shift task cannot be empty");
        Self {
            start,
            end,
            date,
            task,
            done: false,
        }
    }
}

impl Record for Shift {
    const ENTITY: Entity = Entity::Shift;
}

impl Completable for Shift {
    fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} From: {}, To: {}, Date: {}, Task: {}",
            status_marker(self.done),
            format_time(self.start),
            format_time(self.end),
            format_date(self.date),
            self.task
        )
    }
}
