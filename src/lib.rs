//! Event Planner
//!
//! Service layer for an event-planning application: participants, events and
//! the logistics booked for them, stored in PostgreSQL or in memory.

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventPlannerError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, MemoryStore};
pub use services::{CostScheduler, EventService, OrganizerFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
