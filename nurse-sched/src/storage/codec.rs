//! Save-file line formats, one per record type:
//!
//! ```text
//! appointment: done | name | start | end | date | importance | notes
//! shift:       done | start | end | date | task
//! patient:     name | age | notes
//! medicine:    name | quantity
//! ```

use chrono::{NaiveDate, NaiveTime};
use csv::StringRecord;

use super::FlatRecord;
use crate::error::StorageError;
use crate::records::{
    format_date, format_time, Appointment, Entity, Medicine, Patient, Shift, DATE_FORMAT,
    TIME_FORMAT,
};

fn malformed(entity: Entity, reason: impl Into<String>) -> StorageError {
    StorageError::Malformed {
        entity,
        reason: reason.into(),
    }
}

fn field(fields: &StringRecord, index: usize, entity: Entity) -> Result<&str, StorageError> {
    fields
        .get(index)
        .ok_or_else(|| malformed(entity, format!("missing field {}", index + 1)))
}

fn parse_done(raw: &str, entity: Entity) -> Result<bool, StorageError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(malformed(entity, format!("bad status '{other}'"))),
    }
}

fn parse_time(raw: &str, entity: Entity) -> Result<NaiveTime, StorageError> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| malformed(entity, format!("bad time '{raw}': {e}")))
}

fn parse_date(raw: &str, entity: Entity) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| malformed(entity, format!("bad date '{raw}': {e}")))
}

fn parse_number<N: std::str::FromStr>(raw: &str, entity: Entity) -> Result<N, StorageError> {
    raw.parse()
        .map_err(|_| malformed(entity, format!("bad number '{raw}'")))
}

impl FlatRecord for Appointment {
    fn to_fields(&self) -> Vec<String> {
        vec![
            self.done.to_string(),
            self.name.clone(),
            format_time(self.start),
            format_time(self.end),
            format_date(self.date),
            self.importance.to_string(),
            self.notes.clone(),
        ]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, StorageError> {
        let entity = Entity::Appointment;
        let done = parse_done(field(fields, 0, entity)?, entity)?;
        let name = field(fields, 1, entity)?;
        let start = parse_time(field(fields, 2, entity)?, entity)?;
        let end = parse_time(field(fields, 3, entity)?, entity)?;
        let date = parse_date(field(fields, 4, entity)?, entity)?;
        let importance: u8 = parse_number(field(fields, 5, entity)?, entity)?;
        // notes are optional on disk
        let notes = fields.get(6).unwrap_or("");

        if name.is_empty() {
            return Err(malformed(entity, "empty name"));
        }
        if !(1..=3).contains(&importance) {
            return Err(malformed(entity, format!("importance {importance} out of range")));
        }
        if start >= end {
            return Err(malformed(entity, "start time is not before end time"));
        }

        let mut appointment = Appointment::new(name, start, end, date, notes, importance);
        appointment.done = done;
        Ok(appointment)
    }
}

impl FlatRecord for Shift {
    fn to_fields(&self) -> Vec<String> {
        vec![
            self.done.to_string(),
            format_time(self.start),
            format_time(self.end),
            format_date(self.date),
            self.task.clone(),
        ]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, StorageError> {
        let entity = Entity::Shift;
        let done = parse_done(field(fields, 0, entity)?, entity)?;
        let start = parse_time(field(fields, 1, entity)?, entity)?;
        let end = parse_time(field(fields, 2, entity)?, entity)?;
        let date = parse_date(field(fields, 3, entity)?, entity)?;
        let task = field(fields, 4, entity)?;

        if start >= end {
            return Err(malformed(entity, "start time is not before end time"));
        }
        if task.is_empty() {
            return Err(malformed(entity, "empty task"));
        }

        let mut shift = Shift::new(start, end, date, task);
        shift.done = done;
        Ok(shift)
    }
}

impl FlatRecord for Patient {
    fn to_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.age.clone(), self.notes.clone()]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, StorageError> {
        let entity = Entity::Patient;
        let name = field(fields, 0, entity)?;
        let age = field(fields, 1, entity)?;
        let notes = fields.get(2).unwrap_or("");

        if name.is_empty() {
            return Err(malformed(entity, "empty name"));
        }
        parse_number::<u32>(age, entity)?;

        Ok(Patient::new(name, age, notes))
    }
}

impl FlatRecord for Medicine {
    fn to_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.quantity.to_string()]
    }

    fn from_fields(fields: &StringRecord) -> Result<Self, StorageError> {
        let entity = Entity::Medicine;
        let name = field(fields, 0, entity)?;
        let quantity = parse_number(field(fields, 1, entity)?, entity)?;

        if name.is_empty() {
            return Err(malformed(entity, "empty name"));
        }
        Ok(Medicine::new(name, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FlatFile, SkippedLine};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_appointment_line_format() {
        let mut appt = Appointment::new(
            "jean doe",
            time("13:00"),
            time("14:00"),
            date("2026-02-15"),
            "needs a wheelchair",
            2,
        );
        appt.done = true;
        assert_eq!(
            appt.to_line(),
            "true | jean doe | 13:00 | 14:00 | 2026-02-15 | 2 | needs a wheelchair"
        );
    }

    #[test]
    fn test_missing_file_loads_empty_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("Appt.txt");
        let file: FlatFile<Appointment> = FlatFile::new(&path);

        let report = file.load_all().unwrap();
        assert!(report.records.is_empty());
        assert!(report.skipped.is_empty());
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Shift.txt");
        fs::write(
            &path,
            "false | 08:00 | 12:00 | 2026-03-01 | ward rounds\n\
             maybe | 08:00 | 12:00 | 2026-03-01 | bad status\n\
             true | 14:00 | 18:00 | 2026-03-01 | handover\n\
             false | 12:00 | 08:00 | 2026-03-02 | backwards\n",
        )
        .unwrap();

        let report = FlatFile::<Shift>::new(&path).load_all().unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[1].task, "handover");
        assert!(report.records[1].done);

        let skipped: Vec<(u64, &str)> = report
            .skipped
            .iter()
            .map(|SkippedLine { line_number, content, .. }| (*line_number, content.as_str()))
            .collect();
        assert_eq!(
            skipped,
            vec![
                (2, "maybe | 08:00 | 12:00 | 2026-03-01 | bad status"),
                (4, "false | 12:00 | 08:00 | 2026-03-02 | backwards"),
            ]
        );
    }

    #[test]
    fn test_skipped_line_keeps_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Medicine.txt");
        fs::write(&path, "paracetamol | 20
  ibuprofen|lots  
").unwrap();

        let report = FlatFile::<Medicine>::new(&path).load_all().unwrap();
        assert_eq!(report.records, vec![Medicine::new("paracetamol", 20)]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_number, 2);
        assert_eq!(report.skipped[0].content, "  ibuprofen|lots  ");
    }

    #[test]
    fn test_overwrite_of_load_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Appt.txt");
        let original = "false | jean doe | 13:00 | 14:00 | 2026-02-15 | 2 | needs a wheelchair\n\
                        true | john doe | 09:30 | 10:00 | 2026-02-16 | 3 | \n\
                        false | ann lee | 11:00 | 11:45 | 2026-02-16 | 1 | bring \"charts\"\n";
        fs::write(&path, original).unwrap();

        let file: FlatFile<Appointment> = FlatFile::new(&path);
        let first = file.load_all().unwrap();
        assert_eq!(first.records.len(), 3);
        assert_eq!(first.records[2].notes, "bring \"charts\"");

        file.overwrite_all(&first.records).unwrap();
        let second = file.load_all().unwrap();
        assert_eq!(first.records, second.records);

        file.overwrite_all(&second.records).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), {
            let mut expected = String::new();
            for record in &second.records {
                expected.push_str(&record.to_line());
                expected.push('\n');
            }
            expected
        });
    }

    #[test]
    fn test_append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file: FlatFile<Medicine> = FlatFile::new(dir.path().join("nested/Medicine.txt"));

        file.append_one(&Medicine::new("paracetamol", 20)).unwrap();
        file.append_one(&Medicine::new("ibuprofen", 0)).unwrap();

        let report = file.load_all().unwrap();
        assert_eq!(
            report.records,
            vec![Medicine::new("paracetamol", 20), Medicine::new("ibuprofen", 0)]
        );
    }

    #[test]
    fn test_patient_round_trip_keeps_case() {
        let dir = tempfile::tempdir().unwrap();
        let file: FlatFile<Patient> = FlatFile::new(dir.path().join("Patient.txt"));
        let patients = vec![
            Patient::new("Jean Doe", "25", "Allergic to penicillin"),
            Patient::new("John Doe", "40", ""),
        ];

        file.overwrite_all(&patients).unwrap();
        assert_eq!(file.load_all().unwrap().records, patients);
    }
}
