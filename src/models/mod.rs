//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod participant;
pub mod logistics;

// Re-export commonly used models
pub use event::{Event, EventRow, EventLogisticsRow};
pub use participant::{Participant, ParticipantRow, Role};
pub use logistics::Logistics;
