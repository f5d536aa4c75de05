//! Event service implementation
//!
//! This service registers participants, links participants and logistics to
//! events, lists booked logistics over a date range and recomputes event
//! costs for an organizer.

use std::sync::Arc;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use crate::database::store::{EventStore, LogisticsStore, ParticipantStore};
use crate::models::{Event, Logistics, Participant, Role};
use crate::utils::errors::{EventPlannerError, Result};
use crate::utils::logging::{log_association, log_cost_update, log_entity_saved, log_skipped_lookup};

/// Selects the events whose cost gets recomputed: those attended by the
/// participant with this name, first name and role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerFilter {
    pub name: String,
    pub first_name: String,
    pub role: Role,
}

impl OrganizerFilter {
    pub fn new(name: impl Into<String>, first_name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            first_name: first_name.into(),
            role,
        }
    }
}

impl Default for OrganizerFilter {
    fn default() -> Self {
        Self::new("Tounsi", "Ahmed", Role::Organizer)
    }
}

/// Event service for managing events, participants and logistics
#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    participants: Arc<dyn ParticipantStore>,
    logistics: Arc<dyn LogisticsStore>,
    organizer: OrganizerFilter,
}

impl EventService {
    /// Create a new EventService instance using the default organizer filter
    pub fn new(
        events: Arc<dyn EventStore>,
        participants: Arc<dyn ParticipantStore>,
        logistics: Arc<dyn LogisticsStore>,
    ) -> Self {
        Self {
            events,
            participants,
            logistics,
            organizer: OrganizerFilter::default(),
        }
    }

    /// Replace the organizer used by [`EventService::calculate_cost`]
    pub fn with_organizer(mut self, organizer: OrganizerFilter) -> Self {
        self.organizer = organizer;
        self
    }

    /// Persist a participant as given
    pub async fn add_participant(&self, participant: Participant) -> Result<Participant> {
        debug!(name = %participant.name, first_name = %participant.first_name, "Adding participant");

        let participant = self.participants.save(participant).await?;
        log_entity_saved("participant", participant.id);

        Ok(participant)
    }

    /// Attach an existing participant to the event, then save the event.
    ///
    /// Fails with [`EventPlannerError::ParticipantNotFound`] before anything is
    /// written when the participant does not exist.
    pub async fn assign_participant(&self, mut event: Event, participant_id: i64) -> Result<Event> {
        debug!(event_id = event.id, participant_id = participant_id, "Assigning participant to event");

        let participant = self
            .participants
            .find_by_id(participant_id)
            .await?
            .ok_or(EventPlannerError::ParticipantNotFound { participant_id })?;

        // Saving the event writes the association row both sides read from
        event.participants.insert(participant.id);
        let event = self.events.save(event).await?;

        log_association(event.id, "participant", participant.id);
        Ok(event)
    }

    /// Save the event with every participant already listed on it that
    /// exists. Unknown participants are dropped without raising.
    pub async fn assign_participants(&self, mut event: Event) -> Result<Event> {
        debug!(
            event_id = event.id,
            participants = event.participants.len(),
            "Assigning listed participants to event"
        );

        let listed = std::mem::take(&mut event.participants);
        for participant_id in listed {
            match self.participants.find_by_id(participant_id).await? {
                Some(participant) => {
                    event.participants.insert(participant.id);
                }
                None => log_skipped_lookup("participant", &participant_id.to_string()),
            }
        }

        let event = self.events.save(event).await?;
        for participant_id in &event.participants {
            log_association(event.id, "participant", *participant_id);
        }

        Ok(event)
    }

    /// Save a logistics item and attach it to the event with this exact
    /// description. A missing event only skips the attachment.
    pub async fn assign_logistics(&self, logistics: Logistics, event_description: &str) -> Result<Logistics> {
        debug!(event_description = %event_description, "Assigning logistics to event");

        let event = self.events.find_by_description(event_description).await?;
        let logistics = self.logistics.save(logistics).await?;
        log_entity_saved("logistics", logistics.id);

        match event {
            Some(event) => {
                self.events.attach_logistics(event.id, logistics.id).await?;
                log_association(event.id, "logistics", logistics.id);
            }
            None => log_skipped_lookup("event", event_description),
        }

        Ok(logistics)
    }

    /// Reserved logistics of every event starting within `[start, end]`
    pub async fn reserved_logistics_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Logistics>> {
        debug!(%start, %end, "Listing reserved logistics");

        let events = self.events.find_by_start_date_between(start, end).await?;
        let logistics: Vec<Logistics> = events
            .into_iter()
            .flat_map(|event| event.logistics.into_iter().filter(|item| item.reserved))
            .collect();

        debug!(%start, %end, count = logistics.len(), "Reserved logistics listed");
        Ok(logistics)
    }

    /// Recompute the cost of the configured organizer's events
    pub async fn calculate_cost(&self) -> Result<()> {
        self.calculate_cost_for(&self.organizer).await?;
        Ok(())
    }

    /// Recompute and save the cost of every event attended by the filtered
    /// participant. Returns how many events were saved.
    pub async fn calculate_cost_for(&self, filter: &OrganizerFilter) -> Result<usize> {
        debug!(name = %filter.name, first_name = %filter.first_name, role = %filter.role, "Calculating event costs");

        let events = self
            .events
            .find_by_participant(&filter.name, &filter.first_name, filter.role)
            .await?;

        let mut updated = 0;
        for mut event in events {
            let previous = event.cost;
            event.cost = event.reserved_cost();
            let event = self.events.save(event).await?;
            log_cost_update(event.id, previous, event.cost);
            updated += 1;
        }

        info!(name = %filter.name, first_name = %filter.first_name, updated = updated, "Event costs recalculated");
        Ok(updated)
    }
}
