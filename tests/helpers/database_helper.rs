//! Test database helper utilities
//!
//! PostgreSQL tests run against the database named by `TEST_DATABASE_URL`.
//! When the variable is not set they are skipped.

use std::sync::Once;
use sqlx::PgPool;
use event_planner::database::{run_migrations, DatabaseService};

static INIT: Once = Once::new();

pub struct TestDatabase {
    pub pool: PgPool,
    pub service: DatabaseService,
}

impl TestDatabase {
    /// Connect, migrate and empty the test database, or `None` when no
    /// database is configured
    pub async fn connect() -> Option<Self> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt::try_init();
        });

        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
                return None;
            }
        };

        let pool = PgPool::connect(&url).await.expect("Failed to connect to test database");
        run_migrations(&pool).await.expect("Failed to run migrations");

        let db = Self {
            service: DatabaseService::new(pool.clone()),
            pool,
        };
        db.cleanup().await.expect("Failed to clean test database");
        Some(db)
    }

    /// Clean all test data from the database
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "TRUNCATE event_logistics, event_participants, logistics, events, participants RESTART IDENTITY CASCADE"
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count_records(&self, table: &str) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
