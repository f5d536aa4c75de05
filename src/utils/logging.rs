//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging helpers
//! for event planner operations.

use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventPlannerError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer when dropped, so it has to live
/// as long as the application.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| EventPlannerError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a write performed on a store
pub fn log_entity_saved(entity: &str, id: i64) {
    info!(entity = entity, id = id, "Entity saved");
}

/// Log an association between two entities
pub fn log_association(event_id: i64, target: &str, target_id: i64) {
    info!(
        event_id = event_id,
        target = target,
        target_id = target_id,
        "Association recorded"
    );
}

/// Log a lookup that missed and was skipped without raising
pub fn log_skipped_lookup(entity: &str, key: &str) {
    warn!(entity = entity, key = key, "Lookup missed, association skipped");
}

/// Log the outcome of a cost recomputation
pub fn log_cost_update(event_id: i64, previous: f64, cost: f64) {
    if (previous - cost).abs() > f64::EPSILON {
        info!(
            event_id = event_id,
            previous = previous,
            cost = cost,
            "Event cost updated"
        );
    } else {
        debug!(event_id = event_id, cost = cost, "Event cost unchanged");
    }
}

/// Log the outcome and duration of a database write
pub fn log_database_operation(operation: &str, table: &str, elapsed: Duration, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            elapsed = ?elapsed,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            elapsed = ?elapsed,
            "Database operation failed"
        );
    }
}
