//! Database repositories module
//!
//! This module contains the PostgreSQL implementations of the store traits

pub mod event;
pub mod participant;
pub mod logistics;

use sqlx::PgConnection;
use crate::utils::errors::EventPlannerError;

// Re-export repositories
pub use event::EventRepository;
pub use participant::ParticipantRepository;
pub use logistics::LogisticsRepository;

/// Move a serial sequence past rows inserted with an explicit id
async fn sync_sequence(conn: &mut PgConnection, table: &'static str) -> Result<(), EventPlannerError> {
    let query = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), GREATEST((SELECT MAX(id) FROM {table}), 1))"
    );
    sqlx::query(&query).execute(conn).await?;

    Ok(())
}
