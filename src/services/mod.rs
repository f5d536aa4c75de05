//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod scheduler;

// Re-export commonly used services
pub use event::{EventService, OrganizerFilter};
pub use scheduler::CostScheduler;
