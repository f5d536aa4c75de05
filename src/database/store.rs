//! Storage traits consumed by the service layer

use async_trait::async_trait;
use chrono::NaiveDate;
use crate::models::{Event, Logistics, Participant, Role};
use crate::utils::errors::Result;

/// Persistence for events and their associations
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insert (id 0) or upsert an event, rewriting its participant and
    /// logistics associations
    async fn save(&self, event: Event) -> Result<Event>;

    /// First event whose description matches exactly
    async fn find_by_description(&self, description: &str) -> Result<Option<Event>>;

    /// Events whose start date lies in `[start, end]`
    async fn find_by_start_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>>;

    /// Events attended by a participant with the given name, first name and role
    async fn find_by_participant(&self, name: &str, first_name: &str, role: Role) -> Result<Vec<Event>>;

    /// Record that a stored logistics item belongs to a stored event
    async fn attach_logistics(&self, event_id: i64, logistics_id: i64) -> Result<()>;
}

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    /// Insert (id 0) or upsert a participant, rewriting its event
    /// associations to match `participant.events`
    async fn save(&self, participant: Participant) -> Result<Participant>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Participant>>;
}

#[async_trait]
pub trait LogisticsStore: Send + Sync {
    async fn save(&self, logistics: Logistics) -> Result<Logistics>;
}
