use std::fmt;

use super::Entity;
use crate::error::StoreError;
use crate::store::Record;

/// A medicine and how many units are in stock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medicine {
    pub name: String,
    pub quantity: u32,
}

impl Medicine {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Takes `amount` units out of stock, refusing to go below zero
    pub fn dispense(&mut self, amount: u32) -> Result<(), StoreError> {
        match self.quantity.checked_sub(amount) {
            Some(left) => {
                self.quantity = left;
                Ok(())
            }
            None => Err(StoreError::InsufficientStock {
                name: self.name.clone(),
                available: self.quantity,
                requested: amount,
            }),
        }
    }

    pub fn restock(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }
}

impl Record for Medicine {
    const ENTITY: Entity = Entity::Medicine;
}

impl fmt::Display for Medicine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Medicine: {}, Quantity: {}", self.name, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispense_within_stock() {
        let mut med = Medicine::new("paracetamol", 10);
        med.dispense(4).unwrap();
        assert_eq!(med.quantity, 6);
        med.dispense(6).unwrap();
        assert_eq!(med.quantity, 0);
    }

    #[test]
    fn test_dispense_more_than_stock_leaves_quantity() {
        let mut med = Medicine::new("paracetamol", 3);
        let err = med.dispense(5).unwrap_err();
        assert_eq!(
            err,
            StoreError::InsufficientStock {
                name: "paracetamol".to_string(),
                available: 3,
                requested: 5,
            }
        );
        assert_eq!(med.quantity, 3);
    }
}
