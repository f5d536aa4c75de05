//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventPlannerError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_scheduler_config(&settings.scheduler)?;
    validate_cost_config(&settings.cost)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(EventPlannerError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(EventPlannerError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EventPlannerError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventPlannerError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventPlannerError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_empty() || config.file_prefix.is_empty() {
        return Err(EventPlannerError::Config(
            "Log directory and file prefix are required".to_string()
        ));
    }

    Ok(())
}

fn validate_scheduler_config(config: &super::SchedulerConfig) -> Result<()> {
    if config.enabled && config.interval_seconds == 0 {
        return Err(EventPlannerError::Config(
            "Scheduler interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate the organizer used for cost recomputation
fn validate_cost_config(config: &super::CostConfig) -> Result<()> {
    if config.organizer_name.trim().is_empty() || config.organizer_first_name.trim().is_empty() {
        return Err(EventPlannerError::Config(
            "Organizer name and first name are required".to_string()
        ));
    }

    Ok(())
}
