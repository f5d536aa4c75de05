//! Participant model

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::utils::errors::EventPlannerError;

/// Task a participant holds in the events they attend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    Guest,
    Organizer,
    Server,
    Entertainer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Organizer => "ORGANIZER",
            Role::Server => "SERVER",
            Role::Entertainer => "ENTERTAINER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = EventPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GUEST" => Ok(Role::Guest),
            "ORGANIZER" => Ok(Role::Organizer),
            "SERVER" => Ok(Role::Server),
            "ENTERTAINER" => Ok(Role::Entertainer),
            other => Err(EventPlannerError::InvalidInput(format!("Unknown role: {}", other))),
        }
    }
}

/// A person attending events.
///
/// `events` mirrors the event/participant association table: it is filled in
/// when the participant is loaded and is never written back by saving the
/// participant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    pub first_name: String,
    pub role: Role,
    pub events: BTreeSet<i64>,
}

impl Participant {
    pub fn new(name: impl Into<String>, first_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: 0,
            name: name.into(),
            first_name: first_name.into(),
            role,
            events: BTreeSet::new(),
        }
    }

    pub fn attends(&self, event_id: i64) -> bool {
        self.events.contains(&event_id)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ParticipantRow {
    pub id: i64,
    pub name: String,
    pub first_name: String,
    pub role: String,
}

impl ParticipantRow {
    pub fn into_participant(self, events: BTreeSet<i64>) -> Result<Participant, EventPlannerError> {
        Ok(Participant {
            id: self.id,
            name: self.name,
            first_name: self.first_name,
            role: self.role.parse()?,
            events,
        })
    }
}
