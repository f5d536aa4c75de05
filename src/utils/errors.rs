//! Error handling for the event planner
//!
//! This module defines the main error type used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for event planner operations
#[derive(Error, Debug)]
pub enum EventPlannerError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Participant not found: {participant_id}")]
    ParticipantNotFound { participant_id: i64 },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: i64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for event planner operations
pub type Result<T> = std::result::Result<T, EventPlannerError>;

impl EventPlannerError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventPlannerError::Database(_) => false,
            EventPlannerError::Migration(_) => false,
            EventPlannerError::Config(_) => false,
            EventPlannerError::ConfigLoad(_) => false,
            EventPlannerError::ParticipantNotFound { .. } => false,
            EventPlannerError::EventNotFound { .. } => false,
            EventPlannerError::InvalidInput(_) => false,
            EventPlannerError::Storage(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventPlannerError::Database(_) => ErrorSeverity::Critical,
            EventPlannerError::Migration(_) => ErrorSeverity::Critical,
            EventPlannerError::Config(_) => ErrorSeverity::Critical,
            EventPlannerError::ConfigLoad(_) => ErrorSeverity::Critical,
            EventPlannerError::ParticipantNotFound { .. } => ErrorSeverity::Warning,
            EventPlannerError::EventNotFound { .. } => ErrorSeverity::Warning,
            EventPlannerError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
