//! Event Planner
//!
//! Main application entry point: connects to the database and keeps event
//! costs up to date until interrupted.

use std::time::Duration;
use anyhow::Context;
use tracing::{info, warn};

use event_planner::{
    config::Settings,
    utils::logging,
    database::{DatabaseService, connection::{create_pool, run_migrations, DatabaseConfig}},
    services::CostScheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", event_planner::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&DatabaseConfig::from(&settings.database))
        .await
        .context("failed to connect to the database")?;

    run_migrations(&db_pool).await?;

    let database_service = DatabaseService::new(db_pool);
    database_service.health_check().await?;

    let filter = settings.cost.organizer_filter();
    let event_service = database_service.event_service().with_organizer(filter.clone());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
        }
    };

    if settings.scheduler.enabled {
        let scheduler = CostScheduler::new(
            event_service,
            filter,
            Duration::from_secs(settings.scheduler.interval_seconds),
        );
        scheduler.run(shutdown).await;
    } else {
        info!("Scheduler disabled, running a single cost recomputation");
        event_service.calculate_cost().await?;
    }

    info!("Event planner stopped");
    Ok(())
}
