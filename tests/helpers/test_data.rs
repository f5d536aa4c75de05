//! Test data helpers for creating events, participants and logistics

use std::sync::Arc;
use chrono::NaiveDate;
use event_planner::database::{EventStore, MemoryStore, ParticipantStore};
use event_planner::models::{Event, Logistics, Participant, Role};
use event_planner::EventService;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// The organizer the cost recomputation looks for by default
pub fn default_organizer() -> Participant {
    Participant::new("Tounsi", "Ahmed", Role::Organizer)
}

pub fn create_test_participant(name: &str, first_name: &str, role: Role) -> Participant {
    Participant::new(name, first_name, role)
}

/// Event starting and ending on the given December 2024 days
pub fn create_test_event(description: &str, start_day: u32, end_day: u32) -> Event {
    Event::new(description, date(2024, 12, start_day), date(2024, 12, end_day))
}

pub fn reserved(description: &str, unit_price: f64, quantity: i32) -> Logistics {
    Logistics::new(description, true, unit_price, quantity)
}

pub fn unreserved(description: &str, unit_price: f64, quantity: i32) -> Logistics {
    Logistics::new(description, false, unit_price, quantity)
}

/// In-memory store plus a service wired to it
pub struct MemoryFixture {
    pub store: Arc<MemoryStore>,
    pub service: EventService,
}

impl MemoryFixture {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = EventService::new(store.clone(), store.clone(), store.clone());
        Self { store, service }
    }

    pub async fn participant(&self, participant: Participant) -> Participant {
        ParticipantStore::save(&*self.store, participant)
            .await
            .expect("Failed to seed participant")
    }

    pub async fn event(&self, event: Event) -> Event {
        EventStore::save(&*self.store, event)
            .await
            .expect("Failed to seed event")
    }

    /// Forget the calls made while seeding
    pub fn ready(&self) {
        self.store.reset_calls();
    }
}
