//! Event model

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;
use crate::models::logistics::Logistics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: f64,
    /// Ids of the participants attending the event
    pub participants: BTreeSet<i64>,
    pub logistics: Vec<Logistics>,
}

impl Event {
    pub fn new(description: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: 0,
            description: description.into(),
            start_date,
            end_date,
            cost: 0.0,
            participants: BTreeSet::new(),
            logistics: Vec::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    /// Logistics items that are actually booked
    pub fn reserved_logistics(&self) -> impl Iterator<Item = &Logistics> {
        self.logistics.iter().filter(|item| item.reserved)
    }

    /// Sum of `unit_price * quantity` over reserved logistics
    pub fn reserved_cost(&self) -> f64 {
        self.reserved_logistics().map(Logistics::total_price).sum()
    }

    /// Whether the start date lies in `[start, end]`
    pub fn starts_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.start_date && self.start_date <= end
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub cost: f64,
}

impl EventRow {
    pub fn into_event(self, participants: BTreeSet<i64>, logistics: Vec<Logistics>) -> Event {
        Event {
            id: self.id,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            cost: self.cost,
            participants,
            logistics,
        }
    }
}

/// Logistics row joined with the event it is attached to
#[derive(Debug, Clone, FromRow)]
pub struct EventLogisticsRow {
    pub event_id: i64,
    #[sqlx(flatten)]
    pub logistics: Logistics,
}
