use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by todo operations.
///
/// Every variant is recoverable; callers receive the display string as the
/// `error` field of a failure payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Invalid priority '{0}'. Must be one of: low, normal, high, critical")]
    InvalidPriority(String),

    #[error("Invalid status '{0}'. Must be one of: pending, in_progress, done")]
    InvalidStatus(String),

    #[error("{0}")]
    InvalidTodoEntry(String),

    #[error("{0}")]
    InvalidInputShape(String),

    #[error("Provide a title or 'todos' list to create.")]
    NoItemsProvided,

    #[error("Todo with ID '{0}' not found")]
    NotFound(String),

    #[error("Title cannot be empty")]
    EmptyTitle,
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
