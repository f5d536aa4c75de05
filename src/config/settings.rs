//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::models::participant::Role;
use crate::services::event::OrganizerFilter;

/// Environment variable prefix, e.g. `EVENT_PLANNER__DATABASE__URL`
pub const ENV_PREFIX: &str = "EVENT_PLANNER";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub scheduler: SchedulerConfig,
    pub cost: CostConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
    pub json: bool,
}

/// Periodic cost recomputation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub interval_seconds: u64,
}

/// Participant whose events get their cost recomputed
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CostConfig {
    pub organizer_name: String,
    pub organizer_first_name: String,
    pub organizer_role: Role,
}

impl CostConfig {
    pub fn organizer_filter(&self) -> OrganizerFilter {
        OrganizerFilter::new(
            self.organizer_name.clone(),
            self.organizer_first_name.clone(),
            self.organizer_role,
        )
    }
}

impl Settings {
    /// Load settings from the optional `config` file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit configuration file, still honouring
    /// environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path.as_ref()).required(true))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventPlannerError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/eventsproject".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_prefix: "event-planner.log".to_string(),
                json: false,
            },
            scheduler: SchedulerConfig {
                enabled: true,
                interval_seconds: 60,
            },
            cost: CostConfig {
                organizer_name: "Tounsi".to_string(),
                organizer_first_name: "Ahmed".to_string(),
                organizer_role: Role::Organizer,
            },
        }
    }
}
