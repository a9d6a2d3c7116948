use chrono::{NaiveDate, NaiveTime};

use super::fields::SortKey;
use super::syntax::{Field, ParsedFields, Verb};
use crate::error::CommandError;
use crate::records::{Appointment, Entity, Medicine, Patient, Shift};

/// A fully validated command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Appointment(AppointmentCommand),
    Shift(ShiftCommand),
    Patient(PatientCommand),
    Medicine(MedicineCommand),
    Help,
    Exit,
}

/// What del/mark/unmark use to pick out one appointment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentKey {
    pub name: String,
    pub start: NaiveTime,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentCommand {
    Add(Appointment),
    List,
    Delete(AppointmentKey),
    Mark(AppointmentKey),
    Unmark(AppointmentKey),
    Find { name: String },
    Sort(SortKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftCommand {
    Add(Shift),
    List,
    Delete { index: usize },
    Mark { index: usize },
    Unmark { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientCommand {
    Add(Patient),
    List,
    Delete { index: usize },
    Find { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MedicineCommand {
    Add(Medicine),
    List,
    Remove { name: String, quantity: u32 },
    Find { name: String },
    Delete { name: String },
    Edit {
        name: String,
        updated_name: String,
        updated_quantity: u32,
    },
}

/// Turns the fields read for `verb` into the typed command of `entity`
pub fn build(entity: Entity, verb: Verb, fields: ParsedFields) -> Result<Command, CommandError> {
    let command = match entity {
        Entity::Appointment => Command::Appointment(appointment(verb, &fields)?),
        Entity::Shift => Command::Shift(shift(verb, &fields)?),
        Entity::Patient => Command::Patient(patient(verb, &fields)?),
        Entity::Medicine => Command::Medicine(medicine(verb, &fields)?),
    };
    Ok(command)
}

fn appointment_key(fields: &ParsedFields) -> Result<AppointmentKey, CommandError> {
    Ok(AppointmentKey {
        name: fields.text(Field::Name)?,
        start: fields.time(Field::Start)?,
        date: fields.date(Field::Date)?,
    })
}

fn appointment(verb: Verb, fields: &ParsedFields) -> Result<AppointmentCommand, CommandError> {
    let command = match verb {
        Verb::Add => AppointmentCommand::Add(Appointment::new(
            fields.text(Field::Name)?,
            fields.time(Field::Start)?,
            fields.time(Field::End)?,
            fields.date(Field::Date)?,
            fields.text(Field::Notes)?,
            fields.importance().unwrap_or(Appointment::DEFAULT_IMPORTANCE),
        )),
        Verb::List => AppointmentCommand::List,
        Verb::Del => AppointmentCommand::Delete(appointment_key(fields)?),
        Verb::Mark => AppointmentCommand::Mark(appointment_key(fields)?),
        Verb::Unmark => AppointmentCommand::Unmark(appointment_key(fields)?),
        Verb::Find => AppointmentCommand::Find {
            name: fields.text(Field::Name)?,
        },
        Verb::Sort => AppointmentCommand::Sort(fields.sort_key()?),
        _ => return Err(CommandError::ParsingError),
    };
    Ok(command)
}

fn shift(verb: Verb, fields: &ParsedFields) -> Result<ShiftCommand, CommandError> {
    let command = match verb {
        Verb::Add => ShiftCommand::Add(Shift::new(
            fields.time(Field::Start)?,
            fields.time(Field::End)?,
            fields.date(Field::Date)?,
            fields.text(Field::Task)?,
        )),
        Verb::List => ShiftCommand::List,
        Verb::Del => ShiftCommand::Delete {
            index: fields.index(Field::Index)?,
        },
        Verb::Mark => ShiftCommand::Mark {
            index: fields.index(Field::Index)?,
        },
        Verb::Unmark => ShiftCommand::Unmark {
            index: fields.index(Field::Index)?,
        },
        _ => return Err(CommandError::ParsingError),
    };
    Ok(command)
}

fn patient(verb: Verb, fields: &ParsedFields) -> Result<PatientCommand, CommandError> {
    let command = match verb {
        Verb::Add => PatientCommand::Add(Patient::new(
            fields.text(Field::Name)?,
            fields.text(Field::Age)?,
            fields.text(Field::Notes)?,
        )),
        Verb::List => PatientCommand::List,
        Verb::Del => PatientCommand::Delete {
            index: fields.index(Field::Index)?,
        },
        Verb::Find => PatientCommand::Find {
            name: fields.text(Field::Name)?,
        },
        _ => return Err(CommandError::ParsingError),
    };
    Ok(command)
}

fn medicine(verb: Verb, fields: &ParsedFields) -> Result<MedicineCommand, CommandError> {
    let command = match verb {
        Verb::Add => MedicineCommand::Add(Medicine::new(
            fields.text(Field::Name)?,
            fields.count(Field::Quantity)?,
        )),
        Verb::List => MedicineCommand::List,
        Verb::Remove => MedicineCommand::Remove {
            name: fields.text(Field::Name)?,
            quantity: fields.count(Field::Quantity)?,
        },
        Verb::Find => MedicineCommand::Find {
            name: fields.text(Field::Name)?,
        },
        Verb::Delete => MedicineCommand::Delete {
            name: fields.text(Field::Name)?,
        },
        Verb::Edit => MedicineCommand::Edit {
            name: fields.text(Field::Name)?,
            updated_name: fields.text(Field::NewName)?,
            updated_quantity: fields.count(Field::NewQuantity)?,
        },
        _ => return Err(CommandError::ParsingError),
    };
    Ok(command)
}
