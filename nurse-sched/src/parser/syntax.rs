//! Marker syntax of every entity, and the one parser that reads it.
//!
//! Each entity lists its verbs; each verb lists the fields it needs, in the
//! order their markers appear on the command line, together with the kind of
//! value expected and any check that spans several fields. Adding a verb is a
//! matter of adding a row here and a case in `command.rs`.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use log::debug;

use super::extract::{extract, MissingMarker};
use super::fields::{
    parse_count, parse_date, parse_importance, parse_index, parse_sort_key, parse_time, SortKey,
};
use crate::error::CommandError;
use crate::records::Entity;

/// Sub-command keyword following the entity prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Add,
    List,
    Del,
    Mark,
    Unmark,
    Find,
    Edit,
    Remove,
    Delete,
    Sort,
}

impl Verb {
    const ALL: [Verb; 10] = [
        Verb::Add,
        Verb::List,
        Verb::Del,
        Verb::Mark,
        Verb::Unmark,
        Verb::Find,
        Verb::Edit,
        Verb::Remove,
        Verb::Delete,
        Verb::Sort,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Verb::Add => "add",
            Verb::List => "list",
            Verb::Del => "del",
            Verb::Mark => "mark",
            Verb::Unmark => "unmark",
            Verb::Find => "find",
            Verb::Edit => "edit",
            Verb::Remove => "remove",
            Verb::Delete => "delete",
            Verb::Sort => "sort",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.keyword() == keyword)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Name under which a converted value is handed to the command builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Start,
    End,
    Date,
    Notes,
    Importance,
    Task,
    Index,
    Age,
    Quantity,
    NewName,
    NewQuantity,
    SortBy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// non-empty free text
    Name,
    /// free text, may be empty
    Notes,
    /// non-empty free text with its own diagnostic
    Task,
    Time,
    Date,
    Quantity,
    Index,
    Age,
    Importance,
    SortKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Marker(&'static str),
    /// the whole remainder after the verb
    Positional,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub source: Source,
    pub kind: Kind,
    pub required: bool,
}

const fn marked(field: Field, marker: &'static str, kind: Kind) -> FieldSpec {
    FieldSpec {
        field,
        source: Source::Marker(marker),
        kind,
        required: true,
    }
}

const fn optional(field: Field, marker: &'static str, kind: Kind) -> FieldSpec {
    FieldSpec {
        field,
        source: Source::Marker(marker),
        kind,
        required: false,
    }
}

const fn positional(field: Field, kind: Kind) -> FieldSpec {
    FieldSpec {
        field,
        source: Source::Positional,
        kind,
        required: true,
    }
}

/// Checks run once every field of a verb has been converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    StartBeforeEnd,
}

#[derive(Debug)]
pub struct VerbRule {
    pub verb: Verb,
    pub usage: &'static str,
    pub fields: &'static [FieldSpec],
    pub checks: &'static [Check],
}

#[derive(Debug)]
pub struct EntitySyntax {
    pub entity: Entity,
    pub prefix: &'static str,
    /// lowercase the whole remainder before reading any field
    pub case_fold: bool,
    pub rules: &'static [VerbRule],
}

const APPOINTMENT_KEY: &[FieldSpec] = &[
    marked(Field::Name, "p/", Kind::Name),
    marked(Field::Start, "s/", Kind::Time),
    marked(Field::Date, "d/", Kind::Date),
];

const APPOINTMENT_RULES: &[VerbRule] = &[
    VerbRule {
        verb: Verb::Add,
        usage: "appt add p/NAME s/START_TIME e/END_TIME d/DATE n/NOTES [im/IMPORTANCE]",
        fields: &[
            marked(Field::Name, "p/", Kind::Name),
            marked(Field::Start, "s/", Kind::Time),
            marked(Field::End, "e/", Kind::Time),
            marked(Field::Date, "d/", Kind::Date),
            marked(Field::Notes, "n/", Kind::Notes),
            optional(Field::Importance, "im/", Kind::Importance),
        ],
        checks: &[Check::StartBeforeEnd],
    },
    VerbRule {
        verb: Verb::List,
        usage: "appt list",
        fields: &[],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Del,
        usage: "appt del p/NAME s/START_TIME d/DATE",
        fields: APPOINTMENT_KEY,
        checks: &[],
    },
    VerbRule {
        verb: Verb::Mark,
        usage: "appt mark p/NAME s/START_TIME d/DATE",
        fields: APPOINTMENT_KEY,
        checks: &[],
    },
    VerbRule {
        verb: Verb::Unmark,
        usage: "appt unmark p/NAME s/START_TIME d/DATE",
        fields: APPOINTMENT_KEY,
        checks: &[],
    },
    VerbRule {
        verb: Verb::Find,
        usage: "appt find p/NAME",
        fields: &[marked(Field::Name, "p/", Kind::Name)],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Sort,
        usage: "appt sort by/time OR appt sort by/importance",
        fields: &[marked(Field::SortBy, "by/", Kind::SortKey)],
        checks: &[],
    },
];

const SHIFT_INDEX: &[FieldSpec] = &[marked(Field::Index, "sn/", Kind::Index)];

const SHIFT_RULES: &[VerbRule] = &[
    VerbRule {
        verb: Verb::Add,
        usage: "shift add s/START_TIME e/END_TIME d/DATE st/SHIFT_TASK",
        fields: &[
            marked(Field::Start, "s/", Kind::Time),
            marked(Field::End, "e/", Kind::Time),
            marked(Field::Date, "d/", Kind::Date),
            marked(Field::Task, "st/", Kind::Task),
        ],
        checks: &[Check::StartBeforeEnd],
    },
    VerbRule {
        verb: Verb::List,
        usage: "shift list",
        fields: &[],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Del,
        usage: "shift del sn/SHIFT_NUMBER",
        fields: SHIFT_INDEX,
        checks: &[],
    },
    VerbRule {
        verb: Verb::Mark,
        usage: "shift mark sn/SHIFT_NUMBER",
        fields: SHIFT_INDEX,
        checks: &[],
    },
    VerbRule {
        verb: Verb::Unmark,
        usage: "shift unmark sn/SHIFT_NUMBER",
        fields: SHIFT_INDEX,
        checks: &[],
    },
];

const PATIENT_RULES: &[VerbRule] = &[
    VerbRule {
        verb: Verb::Add,
        usage: "pf add p/NAME a/AGE n/NOTES",
        fields: &[
            marked(Field::Name, "p/", Kind::Name),
            marked(Field::Age, "a/", Kind::Age),
            marked(Field::Notes, "n/", Kind::Notes),
        ],
        checks: &[],
    },
    VerbRule {
        verb: Verb::List,
        usage: "pf list",
        fields: &[],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Del,
        usage: "pf del INDEX",
        fields: &[positional(Field::Index, Kind::Index)],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Find,
        usage: "pf find p/NAME",
        fields: &[marked(Field::Name, "p/", Kind::Name)],
        checks: &[],
    },
];

const MEDICINE_RULES: &[VerbRule] = &[
    VerbRule {
        verb: Verb::Add,
        usage: "mn add mn/MEDICINE_NAME q/QUANTITY",
        fields: &[
            marked(Field::Name, "mn/", Kind::Name),
            marked(Field::Quantity, "q/", Kind::Quantity),
        ],
        checks: &[],
    },
    VerbRule {
        verb: Verb::List,
        usage: "mn list",
        fields: &[],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Remove,
        usage: "mn remove mn/MEDICINE_NAME q/QUANTITY",
        fields: &[
            marked(Field::Name, "mn/", Kind::Name),
            marked(Field::Quantity, "q/", Kind::Quantity),
        ],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Find,
        usage: "mn find mn/MEDICINE_NAME",
        fields: &[marked(Field::Name, "mn/", Kind::Name)],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Delete,
        usage: "mn delete mn/MEDICINE_NAME",
        fields: &[marked(Field::Name, "mn/", Kind::Name)],
        checks: &[],
    },
    VerbRule {
        verb: Verb::Edit,
        usage: "mn edit mn/MEDICINE_NAME un/UPDATED_NAME uq/UPDATED_QUANTITY",
        fields: &[
            marked(Field::Name, "mn/", Kind::Name),
            marked(Field::NewName, "un/", Kind::Name),
            marked(Field::NewQuantity, "uq/", Kind::Quantity),
        ],
        checks: &[],
    },
];

pub static SYNTAXES: [EntitySyntax; 4] = [
    EntitySyntax {
        entity: Entity::Appointment,
        prefix: "appt",
        case_fold: true,
        rules: APPOINTMENT_RULES,
    },
    EntitySyntax {
        entity: Entity::Shift,
        prefix: "shift",
        case_fold: false,
        rules: SHIFT_RULES,
    },
    EntitySyntax {
        entity: Entity::Patient,
        prefix: "pf",
        case_fold: false,
        rules: PATIENT_RULES,
    },
    EntitySyntax {
        entity: Entity::Medicine,
        prefix: "mn",
        case_fold: true,
        rules: MEDICINE_RULES,
    },
];

/// Looks up the syntax table for a lowercased entity prefix
pub fn for_prefix(prefix: &str) -> Option<&'static EntitySyntax> {
    SYNTAXES.iter().find(|syntax| syntax.prefix == prefix)
}

/// A converted field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Time(NaiveTime),
    Date(NaiveDate),
    Count(u32),
    Index(usize),
    Importance(u8),
    Sort(SortKey),
}

/// Fields read for one verb, in table order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    values: Vec<(Field, Value)>,
}

impl ParsedFields {
    fn push(&mut self, field: Field, value: Value) {
        self.values.push((field, value));
    }

    fn get(&self, field: Field) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    // A field missing here means a table row and its builder disagree,
    // which is reported as a generic parsing error.

    pub fn text(&self, field: Field) -> Result<String, CommandError> {
        match self.get(field) {
            Some(Value::Text(text)) => Ok(text.clone()),
            _ => Err(CommandError::ParsingError),
        }
    }

    pub fn time(&self, field: Field) -> Result<NaiveTime, CommandError> {
        match self.get(field) {
            Some(Value::Time(time)) => Ok(*time),
            _ => Err(CommandError::ParsingError),
        }
    }

    pub fn date(&self, field: Field) -> Result<NaiveDate, CommandError> {
        match self.get(field) {
            Some(Value::Date(date)) => Ok(*date),
            _ => Err(CommandError::ParsingError),
        }
    }

    pub fn count(&self, field: Field) -> Result<u32, CommandError> {
        match self.get(field) {
            Some(Value::Count(count)) => Ok(*count),
            _ => Err(CommandError::ParsingError),
        }
    }

    pub fn index(&self, field: Field) -> Result<usize, CommandError> {
        match self.get(field) {
            Some(Value::Index(index)) => Ok(*index),
            _ => Err(CommandError::ParsingError),
        }
    }

    pub fn importance(&self) -> Option<u8> {
        match self.get(Field::Importance) {
            Some(Value::Importance(level)) => Some(*level),
            _ => None,
        }
    }

    pub fn sort_key(&self) -> Result<SortKey, CommandError> {
        match self.get(Field::SortBy) {
            Some(Value::Sort(key)) => Ok(*key),
            _ => Err(CommandError::ParsingError),
        }
    }
}

impl EntitySyntax {
    fn rule(&self, verb: Verb) -> Option<&VerbRule> {
        self.rules.iter().find(|rule| rule.verb == verb)
    }

    fn invalid_command(&self) -> CommandError {
        let accepted: Vec<&str> = self.rules.iter().map(|rule| rule.verb.keyword()).collect();
        CommandError::InvalidCommand {
            entity: self.entity,
            accepted: accepted.join(", "),
        }
    }

    /// Parses everything after the entity prefix: the verb, then its fields
    pub fn parse(&self, remainder: &str) -> Result<(Verb, ParsedFields), CommandError> {
        let remainder = if self.case_fold {
            remainder.trim().to_lowercase()
        } else {
            remainder.trim().to_string()
        };
        if remainder.is_empty() {
            return Err(self.invalid_command());
        }

        let (keyword, rest) = remainder
            .split_once(char::is_whitespace)
            .unwrap_or((remainder.as_str(), ""));

        let rule = Verb::from_keyword(&keyword.to_lowercase())
            .and_then(|verb| self.rule(verb))
            .ok_or_else(|| self.invalid_command())?;

        let fields = rule.read(self.entity, rest.trim())?;
        Ok((rule.verb, fields))
    }
}

/// Free text ends up as one save-file column, so it may not hold the
/// column separator
fn free_text(raw: &str) -> Result<Value, CommandError> {
    if raw.contains('|') {
        return Err(CommandError::ReservedCharacter);
    }
    Ok(Value::Text(raw.to_string()))
}

impl VerbRule {
    fn format_error(&self, entity: Entity) -> CommandError {
        CommandError::InvalidFormat {
            entity,
            verb: self.verb,
            usage: self.usage,
        }
    }

    /// End marker for the field at `position`: the next marker of this rule
    /// that actually occurs in the input
    fn next_marker(&self, position: usize, input: &str) -> Option<&'static str> {
        self.fields[position + 1..]
            .iter()
            .filter_map(|spec| match spec.source {
                Source::Marker(marker) => Some(marker),
                Source::Positional => None,
            })
            .find(|marker| input.contains(marker))
    }

    fn read(&self, entity: Entity, input: &str) -> Result<ParsedFields, CommandError> {
        let missing_required = self.fields.iter().any(|spec| match spec.source {
            Source::Marker(marker) => spec.required && !input.contains(marker),
            Source::Positional => false,
        });
        if missing_required {
            return Err(self.format_error(entity));
        }

        let mut fields = ParsedFields::default();
        for (position, spec) in self.fields.iter().enumerate() {
            let raw = match spec.source {
                Source::Positional => input,
                Source::Marker(marker) => {
                    if !input.contains(marker) {
                        continue;
                    }
                    extract(input, marker, self.next_marker(position, input)).map_err(
                        |MissingMarker(marker)| {
                            debug!("Marker {} not found in '{}'", marker, input);
                            self.format_error(entity)
                        },
                    )?
                }
            };
            let value = self.convert(entity, spec.kind, raw)?;
            fields.push(spec.field, value);
        }

        for check in self.checks {
            match check {
                Check::StartBeforeEnd => {
                    if fields.time(Field::Start)? >= fields.time(Field::End)? {
                        return Err(CommandError::InvalidStartTime);
                    }
                }
            }
        }

        Ok(fields)
    }

    fn convert(&self, entity: Entity, kind: Kind, raw: &str) -> Result<Value, CommandError> {
        let value = match kind {
            Kind::Name => {
                if raw.is_empty() {
                    return Err(self.format_error(entity));
                }
                free_text(raw)?
            }
            Kind::Notes => free_text(raw)?,
            Kind::Task => {
                if raw.is_empty() {
                    return Err(CommandError::ShiftTaskEmpty);
                }
                free_text(raw)?
            }
            Kind::Time => Value::Time(parse_time(raw)?),
            Kind::Date => Value::Date(parse_date(raw)?),
            Kind::Quantity => {
                Value::Count(parse_count(raw).ok_or_else(|| self.format_error(entity))?)
            }
            Kind::Age => {
                parse_count(raw).ok_or_else(|| self.format_error(entity))?;
                Value::Text(raw.to_string())
            }
            Kind::Index => {
                Value::Index(parse_index(raw).ok_or(CommandError::InvalidIndex { entity })?)
            }
            Kind::Importance => Value::Importance(parse_importance(raw)?),
            Kind::SortKey => {
                Value::Sort(parse_sort_key(raw).ok_or_else(|| self.format_error(entity))?)
            }
        };
        Ok(value)
    }
}
