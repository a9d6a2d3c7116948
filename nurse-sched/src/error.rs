use thiserror::Error;

use crate::parser::Verb;
use crate::records::Entity;

/// Everything that can be wrong with a command line the user typed.
///
/// Each variant carries a fixed message that is printed verbatim by the
/// console loop. No list is touched when parsing fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Input line cannot be empty!")]
    InputEmpty,

    #[error("Unknown command '{0}'! Type 'help' to see what is available.")]
    UnknownCommand(String),

    #[error("Invalid {entity} command! Use one of: {accepted}.")]
    InvalidCommand { entity: Entity, accepted: String },

    #[error("Invalid {entity} {verb} format! Input as: {usage}")]
    InvalidFormat {
        entity: Entity,
        verb: Verb,
        usage: &'static str,
    },

    #[error("Invalid time format! Input as HH:mm")]
    InvalidTimeFormat,

    #[error("Invalid date format! Input as YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("Start time must be before end time.")]
    InvalidStartTime,

    #[error("{} index must be a positive integer!", .entity.title())]
    InvalidIndex { entity: Entity },

    #[error("Importance must be between 1 and 3!")]
    InvalidImportance,

    #[error("Shift task cannot be empty!")]
    ShiftTaskEmpty,

    #[error("Text cannot contain '|', it separates fields in the save files.")]
    ReservedCharacter,

    #[error("Error parsing command!")]
    ParsingError,
}

/// Lookups and updates against an in-memory record list that could not be
/// carried out. These leave the list unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("There is no {entity} with index: {index}")]
    NotFound { entity: Entity, index: usize },

    #[error("No matching {entity} found.")]
    NoMatch { entity: Entity },

    #[error("This {entity} overlaps an existing one and was not added.")]
    Conflict { entity: Entity },

    #[error("A {entity} named {name} already exists.")]
    DuplicateName { entity: Entity, name: String },

    #[error("Not enough {name} in stock! Available: {available}, requested: {requested}")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },
}

/// Failures reading or writing a save file.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed {entity} record: {reason}")]
    Malformed { entity: Entity, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown log level '{0}'")]
    LogLevel(String),
}
