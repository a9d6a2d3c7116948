use std::fmt;

use super::Entity;
use crate::store::Record;

/// A patient profile. Age stays textual, it is only checked to be numeric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patient {
    pub name: String,
    pub age: String,
    pub notes: String,
}

impl Patient {
    pub fn new(name: impl Into<String>, age: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            notes: notes.into(),
        }
    }
}

impl Record for Patient {
    const ENTITY: Entity = Entity::Patient;
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Age: {}, Notes: {}", self.name, self.age, self.notes)
    }
}
