//! Database service layer
//!
//! This module bundles the PostgreSQL repositories built from one pool

use std::sync::Arc;
use crate::database::{DatabasePool, EventRepository, LogisticsRepository, ParticipantRepository};
use crate::services::EventService;
use crate::utils::errors::EventPlannerError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub participants: ParticipantRepository,
    pub logistics: LogisticsRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            logistics: LogisticsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Build an event service backed by these repositories
    pub fn event_service(&self) -> EventService {
        EventService::new(
            Arc::new(self.events.clone()),
            Arc::new(self.participants.clone()),
            Arc::new(self.logistics.clone()),
        )
    }

    /// Check that the database answers
    pub async fn health_check(&self) -> Result<(), EventPlannerError> {
        super::connection::health_check(&self.pool).await
    }
}
