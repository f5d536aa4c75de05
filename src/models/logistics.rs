//! Logistics model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bookable item (equipment, catering, venue...) attached to events
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow)]
pub struct Logistics {
    pub id: i64,
    pub description: String,
    pub reserved: bool,
    pub unit_price: f64,
    pub quantity: i32,
}

impl Logistics {
    pub fn new(description: impl Into<String>, reserved: bool, unit_price: f64, quantity: i32) -> Self {
        Self {
            id: 0,
            description: description.into(),
            reserved,
            unit_price,
            quantity,
        }
    }

    /// Price of the whole line, `unit_price * quantity`
    pub fn total_price(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}
