use std::fmt::{Display, Write};

use crate::records::Entity;

pub const GREETING: &str = "Hello from NurseSched! Type 'help' to see the available commands.";
pub const FAREWELL: &str = "Goodbye, see you next shift!";

/// Plural noun used in list headings and empty-list messages
pub fn plural(entity: Entity) -> &'static str {
    match entity {
        Entity::Appointment => "appointments",
        Entity::Shift => "shifts",
        Entity::Patient => "patients",
        Entity::Medicine => "medicines",
    }
}

/// Numbers records from 1, in list order
pub fn format_list<T: Display>(entity: Entity, records: &[T]) -> String {
    if records.is_empty() {
        return format!("No {} available.", plural(entity));
    }
    let mut out = format!("List of all {}:", plural(entity));
    for (i, record) in records.iter().enumerate() {
        let _ = write!(out, "\n{}. {}", i + 1, record);
    }
    out
}

/// Search results keep the index each record has in the full list, so it
/// can be used in a follow-up command
pub fn format_matches<T: Display>(entity: Entity, matches: &[(usize, &T)]) -> String {
    if matches.is_empty() {
        return format!("No matching {} found.", plural(entity));
    }
    let mut out = format!("Matching {}:", plural(entity));
    for (index, record) in matches {
        let _ = write!(out, "\n{}. {}", index, record);
    }
    out
}

pub fn help() -> String {
    [
        "Appointments:",
        "  appt add p/NAME s/START_TIME e/END_TIME d/DATE n/NOTES [im/IMPORTANCE]",
        "  appt del|mark|unmark p/NAME s/START_TIME d/DATE",
        "  appt find p/NAME",
        "  appt sort by/time|importance",
        "  appt list",
        "Shifts:",
        "  shift add s/START_TIME e/END_TIME d/DATE st/SHIFT_TASK",
        "  shift del|mark|unmark sn/SHIFT_NUMBER",
        "  shift list",
        "Patients:",
        "  pf add p/NAME a/AGE n/NOTES",
        "  pf del INDEX",
        "  pf find p/NAME",
        "  pf list",
        "Medicines:",
        "  mn add mn/MEDICINE_NAME q/QUANTITY",
        "  mn remove mn/MEDICINE_NAME q/QUANTITY",
        "  mn find|delete mn/MEDICINE_NAME",
        "  mn edit mn/MEDICINE_NAME un/UPDATED_NAME uq/UPDATED_QUANTITY",
        "  mn list",
        "Times are HH:mm (24-hour), dates are YYYY-MM-DD. Type 'bye' to quit.",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Medicine;

    #[test]
    fn test_format_empty_list() {
        let none: Vec<Medicine> = Vec::new();
        assert_eq!(format_list(Entity::Medicine, &none), "No medicines available.");
    }

    #[test]
    fn test_format_list_numbers_from_one() {
        let meds = vec![Medicine::new("paracetamol", 20), Medicine::new("ibuprofen", 5)];
        assert_eq!(
            format_list(Entity::Medicine, &meds),
            "List of all medicines:\n1. Medicine: paracetamol, Quantity: 20\n2. Medicine: ibuprofen, Quantity: 5"
        );
    }

    #[test]
    fn test_format_matches_keeps_list_index() {
        let med = Medicine::new("ibuprofen", 5);
        assert_eq!(
            format_matches(Entity::Medicine, &[(2, &med)]),
            "Matching medicines:\n2. Medicine: ibuprofen, Quantity: 5"
        );
    }
}
