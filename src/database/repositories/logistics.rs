//! Logistics repository implementation

use std::time::Instant;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use crate::database::store::LogisticsStore;
use crate::models::logistics::Logistics;
use crate::utils::errors::EventPlannerError;
use crate::utils::logging::log_database_operation;

#[derive(Clone, Debug)]
pub struct LogisticsRepository {
    pool: PgPool,
}

impl LogisticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count stored logistics items
    pub async fn count(&self) -> Result<i64, EventPlannerError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM logistics")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

#[async_trait]
impl LogisticsStore for LogisticsRepository {
    async fn save(&self, logistics: Logistics) -> Result<Logistics, EventPlannerError> {
        let started = Instant::now();
        let result = match self.pool.acquire().await {
            Ok(mut conn) => upsert_logistics(&mut conn, &logistics).await,
            Err(e) => Err(e.into()),
        };
        log_database_operation("save", "logistics", started.elapsed(), result.is_ok());
        result
    }
}

/// Insert a new logistics row or overwrite the row with the same id
pub(crate) async fn upsert_logistics(conn: &mut PgConnection, item: &Logistics) -> Result<Logistics, EventPlannerError> {
    if item.is_new() {
        let saved = sqlx::query_as::<_, Logistics>(
            r#"
            INSERT INTO logistics (description, reserved, unit_price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, description, reserved, unit_price, quantity
            "#
        )
        .bind(&item.description)
        .bind(item.reserved)
        .bind(item.unit_price)
        .bind(item.quantity)
        .fetch_one(&mut *conn)
        .await?;

        return Ok(saved);
    }

    let saved = sqlx::query_as::<_, Logistics>(
        r#"
        INSERT INTO logistics (id, description, reserved, unit_price, quantity)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE
        SET description = EXCLUDED.description,
            reserved = EXCLUDED.reserved,
            unit_price = EXCLUDED.unit_price,
            quantity = EXCLUDED.quantity
        RETURNING id, description, reserved, unit_price, quantity
        "#
    )
    .bind(item.id)
    .bind(&item.description)
    .bind(item.reserved)
    .bind(item.unit_price)
    .bind(item.quantity)
    .fetch_one(&mut *conn)
    .await?;

    super::sync_sequence(conn, "logistics").await?;
    Ok(saved)
}
