pub mod command;
pub mod extract;
pub mod fields;
pub mod syntax;

pub use command::{
    AppointmentCommand, AppointmentKey, Command, MedicineCommand, PatientCommand, ShiftCommand,
};
pub use fields::SortKey;
pub use syntax::Verb;

use crate::error::CommandError;

/// Parses one line typed at the prompt into a validated command
///
/// # Arguments
/// * `line` - Raw input, e.g. `appt add p/Jean doe s/13:00 e/14:00 d/2026-02-15 n/Needs a wheelchair`
///
/// The first word picks the entity (`appt`, `shift`, `pf`, `mn`) or one of the
/// top-level commands `help`, `bye` and `exit`.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::InputEmpty);
    }

    let (head, remainder) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let head = head.to_lowercase();

    match head.as_str() {
        "help" => return Ok(Command::Help),
        "bye" | "exit" => return Ok(Command::Exit),
        _ => {}
    }

    let syntax =
        syntax::for_prefix(&head).ok_or_else(|| CommandError::UnknownCommand(head.clone()))?;
    let (verb, fields) = syntax.parse(remainder)?;
    command::build(syntax.entity, verb, fields)
}
