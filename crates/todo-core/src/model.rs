//! Todo data model
//!
//! `Todo` is the stored record; `TodoView` is the flat record handed back to
//! callers in every response.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Urgency of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Sort rank, most urgent first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Normal => 2,
            Self::Low => 3,
        }
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    /// Exact, case-sensitive match on the canonical name.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| TodoError::InvalidPriority(value.to_string()))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress state of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Sort rank: completed work first, untouched work last.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Done => 0,
            Self::InProgress => 1,
            Self::Pending => 2,
        }
    }
}

impl FromStr for Status {
    type Err = TodoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| TodoError::InvalidStatus(value.to_string()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored todo item, owned by exactly one agent collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Insertion order within the owning collection.
    pub(crate) sequence: u64,
}

impl Todo {
    pub(crate) fn new(
        id: String,
        title: String,
        description: Option<String>,
        priority: Priority,
        sequence: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            priority,
            status: Status::Pending,
            created_at: now,
            updated_at: now,
            completed_at: None,
            sequence,
        }
    }

    /// Moves to `status`, keeping `completed_at` set exactly when done.
    pub(crate) fn set_status(&mut self, status: Status, now: DateTime<Utc>) {
        self.status = status;
        self.completed_at = match status {
            Status::Done => Some(now),
            _ => None,
        };
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub fn to_view(&self) -> TodoView {
        TodoView {
            todo_id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            completed_at: self.completed_at,
        }
    }
}

/// Flat todo record returned to callers
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TodoView {
    pub todo_id: String,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
