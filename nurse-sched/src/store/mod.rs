use std::cmp::Ordering;

use crate::error::StoreError;
use crate::records::Entity;

/// A record kept in a [`RecordList`]
pub trait Record {
    const ENTITY: Entity;

    /// Whether `self` may not coexist with `other` in the same list
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

/// Records carrying a done flag that mark/unmark commands flip
pub trait Completable {
    fn set_done(&mut self, done: bool);
}

/// Ordered list of records addressed by 1-based index.
///
/// Out-of-range indices come back as [`StoreError::NotFound`] and leave the
/// list as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList<T> {
    items: Vec<T>,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> RecordList<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Appends `record` unless it conflicts with one already stored.
    /// Returns whether the record was added.
    pub fn add(&mut self, record: T) -> bool {
        if self.items.iter().any(|existing| existing.conflicts_with(&record)) {
            return false;
        }
        self.items.push(record);
        true
    }

    pub fn delete_at(&mut self, index: usize) -> Result<T, StoreError> {
        let slot = self.slot(index)?;
        Ok(self.items.remove(slot))
    }

    pub fn get(&self, index: usize) -> Result<&T, StoreError> {
        let slot = self.slot(index)?;
        Ok(&self.items[slot])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, StoreError> {
        let slot = self.slot(index)?;
        Ok(&mut self.items[slot])
    }

    /// 1-based index of the first record matching `pred`
    pub fn position<P>(&self, pred: P) -> Option<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().position(pred).map(|slot| slot + 1)
    }

    /// Matching records paired with their 1-based index
    pub fn find_all<P>(&self, pred: P) -> Vec<(usize, &T)>
    where
        P: Fn(&T) -> bool,
    {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, record)| pred(record))
            .map(|(slot, record)| (slot + 1, record))
            .collect()
    }

    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn slot(&self, index: usize) -> Result<usize, StoreError> {
        if index == 0 || index > self.items.len() {
            return Err(StoreError::NotFound {
                entity: T::ENTITY,
                index,
            });
        }
        Ok(index - 1)
    }
}

impl<T: Record + Completable> RecordList<T> {
    pub fn mark_at(&mut self, index: usize, done: bool) -> Result<(), StoreError> {
        self.get_mut(index)?.set_done(done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Appointment, Patient, Shift};
    use chrono::{NaiveDate, NaiveTime};

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn appt(name: &str, start: &str, end: &str) -> Appointment {
        Appointment::new(name, time(start), time(end), date("2026-02-15"), "", 2)
    }

    fn patients() -> RecordList<Patient> {
        let mut list = RecordList::default();
        list.add(Patient::new("Jean Doe", "25", "Allergic to penicillin"));
        list.add(Patient::new("John Doe", "40", "Allergic to peanuts"));
        list
    }

    #[test]
    fn test_overlapping_appointment_not_added() {
        let mut list = RecordList::default();
        assert!(list.add(appt("jean doe", "13:00", "14:00")));
        let before = list.len();
        assert!(!list.add(appt("john doe", "13:00", "14:00")));
        assert_eq!(list.len(), before);
        assert!(list.add(appt("john doe", "14:00", "15:00")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_delete_first_by_one_based_index() {
        let mut list = patients();
        let removed = list.delete_at(1).unwrap();
        assert_eq!(removed.name, "Jean Doe");
        assert_eq!(list.len(), 1);
        assert_eq!(list.list()[0].name, "John Doe");
    }

    #[test]
    fn test_delete_out_of_range_leaves_list() {
        let mut list = patients();
        let expected = list.clone();

        assert_eq!(
            list.delete_at(0),
            Err(StoreError::NotFound {
                entity: Entity::Patient,
                index: 0
            })
        );
        assert_eq!(
            list.delete_at(3),
            Err(StoreError::NotFound {
                entity: Entity::Patient,
                index: 3
            })
        );
        assert_eq!(list, expected);
    }

    #[test]
    fn test_mark_then_unmark() {
        let mut list = RecordList::default();
        list.add(Shift::new(time("08:00"), time("12:00"), date("2026-03-01"), "ward rounds"));

        list.mark_at(1, true).unwrap();
        assert!(list.get(1).unwrap().done);
        assert!(list.get(1).unwrap().to_string().starts_with("[X]"));

        list.mark_at(1, false).unwrap();
        assert!(!list.get(1).unwrap().done);
        assert!(list.get(1).unwrap().to_string().starts_with("[ ]"));
    }

    #[test]
    fn test_mark_out_of_range() {
        let mut list: RecordList<Shift> = RecordList::default();
        assert_eq!(
            list.mark_at(1, true),
            Err(StoreError::NotFound {
                entity: Entity::Shift,
                index: 1
            })
        );
    }

    #[test]
    fn test_position_and_find_all_are_one_based() {
        let list = patients();
        assert_eq!(list.position(|p| p.name == "John Doe"), Some(2));
        assert_eq!(list.position(|p| p.name == "Nobody"), None);

        let found = list.find_all(|p| p.name.contains("Doe"));
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].0, 2);
    }
}
