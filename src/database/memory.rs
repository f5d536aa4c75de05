//! In-memory store implementing every storage trait.
//!
//! Used by the test-suite and as an embedded backend. All three stores share
//! one state so the event/participant association behaves like the database
//! association table. Every trait call is counted per operation, which lets
//! tests check how many times the service hit the store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;
use crate::database::store::{EventStore, LogisticsStore, ParticipantStore};
use crate::models::{Event, EventRow, Logistics, Participant, Role};
use crate::utils::errors::{EventPlannerError, Result};

pub const EVENT_SAVE: &str = "events.save";
pub const EVENT_FIND_BY_DESCRIPTION: &str = "events.find_by_description";
pub const EVENT_FIND_BY_START_DATE: &str = "events.find_by_start_date_between";
pub const EVENT_FIND_BY_PARTICIPANT: &str = "events.find_by_participant";
pub const EVENT_ATTACH_LOGISTICS: &str = "events.attach_logistics";
pub const PARTICIPANT_SAVE: &str = "participants.save";
pub const PARTICIPANT_FIND_BY_ID: &str = "participants.find_by_id";
pub const LOGISTICS_SAVE: &str = "logistics.save";

#[derive(Default)]
struct State {
    events: BTreeMap<i64, EventRow>,
    participants: BTreeMap<i64, Participant>,
    logistics: BTreeMap<i64, Logistics>,
    /// (event_id, participant_id)
    event_participants: BTreeSet<(i64, i64)>,
    /// (event_id, logistics_id)
    event_logistics: BTreeSet<(i64, i64)>,
    next_event_id: i64,
    next_participant_id: i64,
    next_logistics_id: i64,
    calls: HashMap<&'static str, usize>,
    fail_saves: bool,
}

impl State {
    fn record(&mut self, operation: &'static str) {
        *self.calls.entry(operation).or_insert(0) += 1;
    }

    fn check_writable(&self, operation: &str) -> Result<()> {
        if self.fail_saves {
            return Err(EventPlannerError::Storage(format!("{} rejected by store", operation)));
        }
        Ok(())
    }

    fn upsert_logistics(&mut self, mut item: Logistics) -> Logistics {
        if item.id == 0 {
            self.next_logistics_id += 1;
            item.id = self.next_logistics_id;
        } else {
            self.next_logistics_id = self.next_logistics_id.max(item.id);
        }
        self.logistics.insert(item.id, item.clone());
        item
    }

    fn load_event(&self, id: i64) -> Option<Event> {
        let row = self.events.get(&id)?.clone();
        let participants = self
            .event_participants
            .iter()
            .filter(|(event_id, _)| *event_id == id)
            .map(|(_, participant_id)| *participant_id)
            .collect();
        let logistics = self
            .event_logistics
            .iter()
            .filter(|(event_id, _)| *event_id == id)
            .filter_map(|(_, logistics_id)| self.logistics.get(logistics_id).cloned())
            .collect();
        Some(row.into_event(participants, logistics))
    }

    fn load_participant(&self, id: i64) -> Option<Participant> {
        let mut participant = self.participants.get(&id)?.clone();
        participant.events = self
            .event_participants
            .iter()
            .filter(|(_, participant_id)| *participant_id == id)
            .map(|(event_id, _)| *event_id)
            .collect();
        Some(participant)
    }
}

/// Shared in-memory backend for events, participants and logistics
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of times a store operation was invoked
    pub fn calls(&self, operation: &str) -> usize {
        self.state().calls.get(operation).copied().unwrap_or(0)
    }

    /// Forget recorded calls, typically after seeding
    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }

    /// Make every subsequent save fail with a storage error
    pub fn set_fail_saves(&self, fail: bool) {
        self.state().fail_saves = fail;
    }

    /// Current stored version of an event
    pub fn event(&self, id: i64) -> Option<Event> {
        self.state().load_event(id)
    }

    /// Current stored version of a participant
    pub fn participant(&self, id: i64) -> Option<Participant> {
        self.state().load_participant(id)
    }

    pub fn logistics_item(&self, id: i64) -> Option<Logistics> {
        self.state().logistics.get(&id).cloned()
    }

    pub fn event_count(&self) -> usize {
        self.state().events.len()
    }

    pub fn logistics_count(&self) -> usize {
        self.state().logistics.len()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn save(&self, mut event: Event) -> Result<Event> {
        let mut state = self.state();
        state.record(EVENT_SAVE);
        state.check_writable(EVENT_SAVE)?;

        if let Some(missing) = event
            .participants
            .iter()
            .find(|id| !state.participants.contains_key(*id))
        {
            return Err(EventPlannerError::Storage(format!(
                "event references unknown participant {}",
                missing
            )));
        }

        if event.id == 0 {
            state.next_event_id += 1;
            event.id = state.next_event_id;
        } else {
            state.next_event_id = state.next_event_id.max(event.id);
        }
        let id = event.id;

        let logistics: Vec<Logistics> = event
            .logistics
            .drain(..)
            .map(|item| state.upsert_logistics(item))
            .collect();

        state.events.insert(
            id,
            EventRow {
                id,
                description: event.description.clone(),
                start_date: event.start_date,
                end_date: event.end_date,
                cost: event.cost,
            },
        );

        state.event_participants.retain(|(event_id, _)| *event_id != id);
        for participant_id in &event.participants {
            state.event_participants.insert((id, *participant_id));
        }
        state.event_logistics.retain(|(event_id, _)| *event_id != id);
        for item in &logistics {
            state.event_logistics.insert((id, item.id));
        }

        debug!(event_id = id, "Event stored in memory");
        state
            .load_event(id)
            .ok_or(EventPlannerError::EventNotFound { event_id: id })
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Event>> {
        let mut state = self.state();
        state.record(EVENT_FIND_BY_DESCRIPTION);
        let id = state
            .events
            .values()
            .find(|row| row.description == description)
            .map(|row| row.id);
        Ok(id.and_then(|id| state.load_event(id)))
    }

    async fn find_by_start_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>> {
        let mut state = self.state();
        state.record(EVENT_FIND_BY_START_DATE);
        Ok(state
            .events
            .keys()
            .filter_map(|id| state.load_event(*id))
            .filter(|event| event.starts_between(start, end))
            .collect())
    }

    async fn find_by_participant(&self, name: &str, first_name: &str, role: Role) -> Result<Vec<Event>> {
        let mut state = self.state();
        state.record(EVENT_FIND_BY_PARTICIPANT);
        let participant_ids: BTreeSet<i64> = state
            .participants
            .values()
            .filter(|p| p.name == name && p.first_name == first_name && p.role == role)
            .map(|p| p.id)
            .collect();
        let event_ids: BTreeSet<i64> = state
            .event_participants
            .iter()
            .filter(|(_, participant_id)| participant_ids.contains(participant_id))
            .map(|(event_id, _)| *event_id)
            .collect();
        Ok(event_ids.into_iter().filter_map(|id| state.load_event(id)).collect())
    }

    async fn attach_logistics(&self, event_id: i64, logistics_id: i64) -> Result<()> {
        let mut state = self.state();
        state.record(EVENT_ATTACH_LOGISTICS);
        state.check_writable(EVENT_ATTACH_LOGISTICS)?;
        if !state.events.contains_key(&event_id) {
            return Err(EventPlannerError::EventNotFound { event_id });
        }
        if !state.logistics.contains_key(&logistics_id) {
            return Err(EventPlannerError::Storage(format!(
                "unknown logistics item {}",
                logistics_id
            )));
        }
        state.event_logistics.insert((event_id, logistics_id));
        Ok(())
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn save(&self, mut participant: Participant) -> Result<Participant> {
        let mut state = self.state();
        state.record(PARTICIPANT_SAVE);
        state.check_writable(PARTICIPANT_SAVE)?;

        if let Some(missing) = participant
            .events
            .iter()
            .find(|id| !state.events.contains_key(*id))
        {
            return Err(EventPlannerError::Storage(format!(
                "participant references unknown event {}",
                missing
            )));
        }

        if participant.id == 0 {
            state.next_participant_id += 1;
            participant.id = state.next_participant_id;
        } else {
            state.next_participant_id = state.next_participant_id.max(participant.id);
        }
        let id = participant.id;

        state.event_participants.retain(|(_, participant_id)| *participant_id != id);
        for event_id in &participant.events {
            state.event_participants.insert((*event_id, id));
        }
        state.participants.insert(id, participant);

        state
            .load_participant(id)
            .ok_or_else(|| EventPlannerError::Storage(format!("participant {} vanished", id)))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Participant>> {
        let mut state = self.state();
        state.record(PARTICIPANT_FIND_BY_ID);
        Ok(state.load_participant(id))
    }
}

#[async_trait]
impl LogisticsStore for MemoryStore {
    async fn save(&self, logistics: Logistics) -> Result<Logistics> {
        let mut state = self.state();
        state.record(LOGISTICS_SAVE);
        state.check_writable(LOGISTICS_SAVE)?;
        Ok(state.upsert_logistics(logistics))
    }
}
