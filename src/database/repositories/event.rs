//! Event repository implementation

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use crate::database::store::EventStore;
use crate::models::event::{Event, EventLogisticsRow, EventRow};
use crate::models::logistics::Logistics;
use crate::models::participant::Role;
use crate::utils::errors::EventPlannerError;
use crate::utils::logging::log_database_operation;
use super::logistics::upsert_logistics;

const EVENT_COLUMNS: &str = "e.id, e.description, e.start_date, e.end_date, e.cost";

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventPlannerError> {
        let row = sqlx::query_as::<_, EventRow>(
            &format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.id = $1")
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Upsert the event row, its logistics and both association tables in one transaction
    async fn write(&self, event: Event) -> Result<Event, EventPlannerError> {
        let mut tx = self.pool.begin().await?;

        let row = if event.is_new() {
            sqlx::query_as::<_, EventRow>(
                r#"
                INSERT INTO events (description, start_date, end_date, cost)
                VALUES ($1, $2, $3, $4)
                RETURNING id, description, start_date, end_date, cost
                "#
            )
            .bind(&event.description)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.cost)
            .fetch_one(&mut *tx)
            .await?
        } else {
            let row = sqlx::query_as::<_, EventRow>(
                r#"
                INSERT INTO events (id, description, start_date, end_date, cost)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (id) DO UPDATE
                SET description = EXCLUDED.description,
                    start_date = EXCLUDED.start_date,
                    end_date = EXCLUDED.end_date,
                    cost = EXCLUDED.cost
                RETURNING id, description, start_date, end_date, cost
                "#
            )
            .bind(event.id)
            .bind(&event.description)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(event.cost)
            .fetch_one(&mut *tx)
            .await?;
            super::sync_sequence(&mut tx, "events").await?;
            row
        };

        let mut logistics = Vec::with_capacity(event.logistics.len());
        for item in &event.logistics {
            logistics.push(upsert_logistics(&mut tx, item).await?);
        }

        sqlx::query("DELETE FROM event_participants WHERE event_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        for participant_id in &event.participants {
            sqlx::query("INSERT INTO event_participants (event_id, participant_id) VALUES ($1, $2)")
                .bind(row.id)
                .bind(participant_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM event_logistics WHERE event_id = $1")
            .bind(row.id)
            .execute(&mut *tx)
            .await?;
        for item in &logistics {
            sqlx::query(
                "INSERT INTO event_logistics (event_id, logistics_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
            )
            .bind(row.id)
            .bind(item.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into_event(event.participants, logistics))
    }

    /// Load participant ids and logistics for a batch of event rows
    async fn hydrate(&self, rows: Vec<EventRow>) -> Result<Vec<Event>, EventPlannerError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let links: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT event_id, participant_id FROM event_participants WHERE event_id = ANY($1)"
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, EventLogisticsRow>(
            r#"
            SELECT el.event_id, l.id, l.description, l.reserved, l.unit_price, l.quantity
            FROM event_logistics el
            INNER JOIN logistics l ON l.id = el.logistics_id
            WHERE el.event_id = ANY($1)
            ORDER BY l.id ASC
            "#
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut participants: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        for (event_id, participant_id) in links {
            participants.entry(event_id).or_default().insert(participant_id);
        }
        let mut logistics: HashMap<i64, Vec<Logistics>> = HashMap::new();
        for item in items {
            logistics.entry(item.event_id).or_default().push(item.logistics);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                row.into_event(
                    participants.remove(&id).unwrap_or_default(),
                    logistics.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn save(&self, event: Event) -> Result<Event, EventPlannerError> {
        let started = Instant::now();
        let result = self.write(event).await;
        log_database_operation("save", "events", started.elapsed(), result.is_ok());
        result
    }

    async fn find_by_description(&self, description: &str) -> Result<Option<Event>, EventPlannerError> {
        let row = sqlx::query_as::<_, EventRow>(
            &format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.description = $1 ORDER BY e.id ASC LIMIT 1")
        )
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_by_start_date_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>, EventPlannerError> {
        let rows = sqlx::query_as::<_, EventRow>(
            &format!("SELECT {EVENT_COLUMNS} FROM events e WHERE e.start_date BETWEEN $1 AND $2 ORDER BY e.start_date ASC, e.id ASC")
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn find_by_participant(&self, name: &str, first_name: &str, role: Role) -> Result<Vec<Event>, EventPlannerError> {
        let rows = sqlx::query_as::<_, EventRow>(
            &format!(
                r#"
                SELECT DISTINCT {EVENT_COLUMNS}
                FROM events e
                INNER JOIN event_participants ep ON ep.event_id = e.id
                INNER JOIN participants p ON p.id = ep.participant_id
                WHERE p.name = $1 AND p.first_name = $2 AND p.role = $3
                ORDER BY e.id ASC
                "#
            )
        )
        .bind(name)
        .bind(first_name)
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn attach_logistics(&self, event_id: i64, logistics_id: i64) -> Result<(), EventPlannerError> {
        let result = sqlx::query(
            r#"
            INSERT INTO event_logistics (event_id, logistics_id)
            SELECT id, $2::BIGINT FROM events WHERE id = $1
            ON CONFLICT DO NOTHING
            "#
        )
        .bind(event_id)
        .bind(logistics_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 && self.find_by_id(event_id).await?.is_none() {
            return Err(EventPlannerError::EventNotFound { event_id });
        }

        Ok(())
    }
}
