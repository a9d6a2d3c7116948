use std::cmp::Reverse;
use std::path::Path;

use log::{error, info, warn};

use crate::config::Config;
use crate::display::{format_list, format_matches, help, plural, FAREWELL};
use crate::error::{StorageError, StoreError};
use crate::parser::{
    AppointmentCommand, AppointmentKey, Command, MedicineCommand, PatientCommand, ShiftCommand,
    SortKey,
};
use crate::records::{Appointment, Entity, Medicine, Patient, Shift};
use crate::storage::{FlatFile, FlatRecord, SkippedLine};
use crate::store::RecordList;

/// One entity's list together with the file it is saved to
#[derive(Debug)]
pub struct Ledger<T> {
    pub list: RecordList<T>,
    file: FlatFile<T>,
}

impl<T: FlatRecord> Ledger<T> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<(Self, Vec<SkippedLine>), StorageError> {
        let file = FlatFile::new(path);
        let report = file.load_all()?;
        let ledger = Self {
            list: RecordList::from_vec(report.records),
            file,
        };
        Ok((ledger, report.skipped))
    }

    /// Appends `record` to the save file; returns a warning for the user on failure
    fn save_one(&self, record: &T) -> Option<String> {
        self.report(self.file.append_one(record))
    }

    /// Rewrites the save file from the list; returns a warning for the user on failure
    fn save_all(&self) -> Option<String> {
        self.report(self.file.overwrite_all(self.list.list()))
    }

    fn report(&self, result: Result<(), StorageError>) -> Option<String> {
        match result {
            Ok(()) => None,
            Err(e) => {
                error!(
                    "Failed to save {} to {}: {}",
                    plural(T::ENTITY),
                    self.file.path().display(),
                    e
                );
                Some(format!("Error saving {}: {}", plural(T::ENTITY), e))
            }
        }
    }
}

/// What the console prints after a command, and whether to stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub exit: bool,
}

impl Reply {
    fn say(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }
}

fn with_warning(message: String, warning: Option<String>) -> String {
    match warning {
        Some(warning) => format!("{message}\n{warning}"),
        None => message,
    }
}

/// All lists the assistant works on, loaded once at start-up
#[derive(Debug)]
pub struct Session {
    pub appointments: Ledger<Appointment>,
    pub shifts: Ledger<Shift>,
    pub patients: Ledger<Patient>,
    pub medicines: Ledger<Medicine>,
}

impl Session {
    /// Loads every save file under the configured data directory. Lines that
    /// could not be read come back alongside the session.
    pub fn open(config: &Config) -> Result<(Self, Vec<(Entity, SkippedLine)>), StorageError> {
        let mut skipped = Vec::new();

        let (appointments, lines) = Ledger::open(config.save_file(Entity::Appointment))?;
        skipped.extend(lines.into_iter().map(|line| (Entity::Appointment, line)));
        let (shifts, lines) = Ledger::open(config.save_file(Entity::Shift))?;
        skipped.extend(lines.into_iter().map(|line| (Entity::Shift, line)));
        let (patients, lines) = Ledger::open(config.save_file(Entity::Patient))?;
        skipped.extend(lines.into_iter().map(|line| (Entity::Patient, line)));
        let (medicines, lines) = Ledger::open(config.save_file(Entity::Medicine))?;
        skipped.extend(lines.into_iter().map(|line| (Entity::Medicine, line)));

        let session = Self {
            appointments,
            shifts,
            patients,
            medicines,
        };
        info!(
            "Session opened with {} appointments, {} shifts, {} patients, {} medicines",
            session.appointments.list.len(),
            session.shifts.list.len(),
            session.patients.list.len(),
            session.medicines.list.len()
        );
        Ok((session, skipped))
    }

    /// Applies one command. Store errors become the reply text and leave
    /// every list untouched.
    pub fn execute(&mut self, command: Command) -> Reply {
        let outcome = match command {
            Command::Help => return Reply::say(help()),
            Command::Exit => {
                return Reply {
                    message: FAREWELL.to_string(),
                    exit: true,
                }
            }
            Command::Appointment(command) => self.appointment(command),
            Command::Shift(command) => self.shift(command),
            Command::Patient(command) => self.patient(command),
            Command::Medicine(command) => self.medicine(command),
        };

        match outcome {
            Ok(message) => Reply::say(message),
            Err(e) => {
                warn!("Command rejected: {}", e);
                Reply::say(e.to_string())
            }
        }
    }

    fn appointment(&mut self, command: AppointmentCommand) -> Result<String, StoreError> {
        let ledger = &mut self.appointments;
        match command {
            AppointmentCommand::Add(appt) => {
                if !ledger.list.add(appt.clone()) {
                    return Err(StoreError::Conflict {
                        entity: Entity::Appointment,
                    });
                }
                info!("Appointment added: {}", appt);
                let warning = ledger.save_one(&appt);
                Ok(with_warning(format!("Appointment added:\n  {appt}"), warning))
            }
            AppointmentCommand::List => Ok(format_list(Entity::Appointment, ledger.list.list())),
            AppointmentCommand::Delete(key) => {
                let index = locate_appointment(ledger, &key)?;
                let removed = ledger.list.delete_at(index)?;
                info!("Appointment deleted: {}", removed);
                let warning = ledger.save_all();
                Ok(with_warning(format!("Appointment deleted:\n  {removed}"), warning))
            }
            AppointmentCommand::Mark(key) => mark_appointment(ledger, &key, true),
            AppointmentCommand::Unmark(key) => mark_appointment(ledger, &key, false),
            AppointmentCommand::Find { name } => {
                let found = ledger.list.find_all(|a| a.name.contains(name.as_str()));
                Ok(format_matches(Entity::Appointment, &found))
            }
            AppointmentCommand::Sort(key) => {
                if ledger.list.is_empty() {
                    return Ok(format_list(Entity::Appointment, ledger.list.list()));
                }
                match key {
                    SortKey::Time => ledger
                        .list
                        .sort_by(|a, b| (a.date, a.start).cmp(&(b.date, b.start))),
                    SortKey::Importance => ledger.list.sort_by(|a, b| {
                        (Reverse(a.importance), a.date, a.start)
                            .cmp(&(Reverse(b.importance), b.date, b.start))
                    }),
                }
                info!("Appointments sorted by {:?}", key);
                let warning = ledger.save_all();
                Ok(with_warning(
                    format_list(Entity::Appointment, ledger.list.list()),
                    warning,
                ))
            }
        }
    }

    fn shift(&mut self, command: ShiftCommand) -> Result<String, StoreError> {
        let ledger = &mut self.shifts;
        match command {
            ShiftCommand::Add(shift) => {
                // shifts never conflict, so the add always succeeds
                ledger.list.add(shift.clone());
                info!("Shift added: {}", shift);
                let warning = ledger.save_one(&shift);
                Ok(with_warning(format!("Shift added:\n  {shift}"), warning))
            }
            ShiftCommand::List => Ok(format_list(Entity::Shift, ledger.list.list())),
            ShiftCommand::Delete { index } => {
                let removed = ledger.list.delete_at(index)?;
                info!("Shift deleted: {}", removed);
                let warning = ledger.save_all();
                Ok(with_warning(format!("Shift deleted:\n  {removed}"), warning))
            }
            ShiftCommand::Mark { index } => mark_shift(ledger, index, true),
            ShiftCommand::Unmark { index } => mark_shift(ledger, index, false),
        }
    }

    fn patient(&mut self, command: PatientCommand) -> Result<String, StoreError> {
        let ledger = &mut self.patients;
        match command {
            PatientCommand::Add(patient) => {
                // patients never conflict, so the add always succeeds
                ledger.list.add(patient.clone());
                info!("Patient added: {}", patient);
                let warning = ledger.save_one(&patient);
                Ok(with_warning(format!("Patient added:\n  {patient}"), warning))
            }
            PatientCommand::List => Ok(format_list(Entity::Patient, ledger.list.list())),
            PatientCommand::Delete { index } => {
                let removed = ledger.list.delete_at(index)?;
                info!("Patient deleted: {}", removed);
                let warning = ledger.save_all();
                Ok(with_warning(format!("Patient deleted:\n  {removed}"), warning))
            }
            PatientCommand::Find { name } => {
                let needle = name.to_lowercase();
                let found = ledger
                    .list
                    .find_all(|p| p.name.to_lowercase().contains(needle.as_str()));
                Ok(format_matches(Entity::Patient, &found))
            }
        }
    }

    fn medicine(&mut self, command: MedicineCommand) -> Result<String, StoreError> {
        let ledger = &mut self.medicines;
        match command {
            MedicineCommand::Add(medicine) => {
                // same name adds to the stock already on the list
                if let Some(index) = ledger.list.position(|m| m.name == medicine.name) {
                    let existing = ledger.list.get_mut(index)?;
                    existing.restock(medicine.quantity);
                    let message = format!("Medicine restocked:\n  {existing}");
                    info!("{}", message);
                    let warning = ledger.save_all();
                    return Ok(with_warning(message, warning));
                }
                // medicines never conflict, so the add always succeeds
                ledger.list.add(medicine.clone());
                info!("Medicine added: {}", medicine);
                let warning = ledger.save_one(&medicine);
                Ok(with_warning(format!("Medicine added:\n  {medicine}"), warning))
            }
            MedicineCommand::List => Ok(format_list(Entity::Medicine, ledger.list.list())),
            MedicineCommand::Remove { name, quantity } => {
                let index = locate_medicine(ledger, &name)?;
                let medicine = ledger.list.get_mut(index)?;
                medicine.dispense(quantity)?;
                let message = format!("Removed {quantity} of {name}:\n  {medicine}");
                info!("{}", message);
                let warning = ledger.save_all();
                Ok(with_warning(message, warning))
            }
            MedicineCommand::Find { name } => {
                let found = ledger.list.find_all(|m| m.name.contains(name.as_str()));
                Ok(format_matches(Entity::Medicine, &found))
            }
            MedicineCommand::Delete { name } => {
                let index = locate_medicine(ledger, &name)?;
                let removed = ledger.list.delete_at(index)?;
                info!("Medicine deleted: {}", removed);
                let warning = ledger.save_all();
                Ok(with_warning(format!("Medicine deleted:\n  {removed}"), warning))
            }
            MedicineCommand::Edit {
                name,
                updated_name,
                updated_quantity,
            } => {
                let index = locate_medicine(ledger, &name)?;
                let taken = ledger.list.position(|m| m.name == updated_name).is_some();
                if updated_name != name && taken {
                    return Err(StoreError::DuplicateName {
                        entity: Entity::Medicine,
                        name: updated_name,
                    });
                }
                let medicine = ledger.list.get_mut(index)?;
                medicine.name = updated_name;
                medicine.quantity = updated_quantity;
                let message = format!("Medicine updated:\n  {medicine}");
                info!("{}", message);
                let warning = ledger.save_all();
                Ok(with_warning(message, warning))
            }
        }
    }
}

fn locate_appointment(
    ledger: &Ledger<Appointment>,
    key: &AppointmentKey,
) -> Result<usize, StoreError> {
    ledger
        .list
        .position(|a| a.matches(&key.name, key.start, key.date))
        .ok_or(StoreError::NoMatch {
            entity: Entity::Appointment,
        })
}

fn locate_medicine(ledger: &Ledger<Medicine>, name: &str) -> Result<usize, StoreError> {
    ledger
        .list
        .position(|m| m.name == name)
        .ok_or(StoreError::NoMatch {
            entity: Entity::Medicine,
        })
}

fn mark_appointment(
    ledger: &mut Ledger<Appointment>,
    key: &AppointmentKey,
    done: bool,
) -> Result<String, StoreError> {
    let index = locate_appointment(ledger, key)?;
    ledger.list.mark_at(index, done)?;
    let message = format!(
        "{}\n  {}",
        mark_heading(Entity::Appointment, done),
        ledger.list.get(index)?
    );
    info!("{}", message);
    let warning = ledger.save_all();
    Ok(with_warning(message, warning))
}

fn mark_shift(ledger: &mut Ledger<Shift>, index: usize, done: bool) -> Result<String, StoreError> {
    ledger.list.mark_at(index, done)?;
    let message = format!("{}\n  {}", mark_heading(Entity::Shift, done), ledger.list.get(index)?);
    info!("{}", message);
    let warning = ledger.save_all();
    Ok(with_warning(message, warning))
}

fn mark_heading(entity: Entity, done: bool) -> String {
    if done {
        format!("Marked {entity} as done:")
    } else {
        format!("Marked {entity} as undone:")
    }
}
