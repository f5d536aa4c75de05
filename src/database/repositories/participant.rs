//! Participant repository implementation

use std::collections::BTreeSet;
use std::time::Instant;
use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::store::ParticipantStore;
use crate::models::participant::{Participant, ParticipantRow};
use crate::utils::errors::EventPlannerError;
use crate::utils::logging::log_database_operation;

#[derive(Clone, Debug)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ids of the events a participant is associated with
    async fn event_ids(&self, participant_id: i64) -> Result<BTreeSet<i64>, EventPlannerError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT event_id FROM event_participants WHERE participant_id = $1"
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(event_id,)| event_id).collect())
    }

    async fn write(&self, participant: Participant) -> Result<Participant, EventPlannerError> {
        let mut tx = self.pool.begin().await?;

        let row = if participant.id == 0 {
            sqlx::query_as::<_, ParticipantRow>(
                r#"
                INSERT INTO participants (name, first_name, role)
                VALUES ($1, $2, $3)
                RETURNING id, name, first_name, role
                "#
            )
            .bind(&participant.name)
            .bind(&participant.first_name)
            .bind(participant.role.as_str())
            .fetch_one(&mut *tx)
            .await?
        } else {
            let row = sqlx::query_as::<_, ParticipantRow>(
                r#"
                INSERT INTO participants (id, name, first_name, role)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    first_name = EXCLUDED.first_name,
                    role = EXCLUDED.role
                RETURNING id, name, first_name, role
                "#
            )
            .bind(participant.id)
            .bind(&participant.name)
            .bind(&participant.first_name)
            .bind(participant.role.as_str())
            .fetch_one(&mut *tx)
            .await?;
            super::sync_sequence(&mut tx, "participants").await?;
            row
        };

        sqlx::query("DELETE FROM event_participants WHERE participant_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        for event_id in &participant.events {
            sqlx::query("INSERT INTO event_participants (event_id, participant_id) VALUES ($1, $2)")
                .bind(event_id)
                .bind(row.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        row.into_participant(participant.events)
    }
}

#[async_trait]
impl ParticipantStore for ParticipantRepository {
    async fn save(&self, participant: Participant) -> Result<Participant, EventPlannerError> {
        let started = Instant::now();
        let result = self.write(participant).await;
        log_database_operation("save", "participants", started.elapsed(), result.is_ok());
        result
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Participant>, EventPlannerError> {
        let row = sqlx::query_as::<_, ParticipantRow>(
            "SELECT id, name, first_name, role FROM participants WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let events = self.event_ids(row.id).await?;
                Ok(Some(row.into_participant(events)?))
            }
            None => Ok(None),
        }
    }
}
