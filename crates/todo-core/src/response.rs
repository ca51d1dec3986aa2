//! Success/failure envelope returned at the operation boundary.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Result, TodoError};
use crate::operations::{CreateTodoResponse, ListTodosResponse};

/// `{success: true, ..data}` or `{success: false, error, ..fallback}`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> Outcome<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: None,
        }
    }

    /// Failure that still carries a renderable body.
    pub fn failure_with(error: impl Into<String>, fallback: T) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            data: Some(fallback),
        }
    }

    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(err.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            json!({
                "success": false,
                "error": format!("Failed to serialize response: {}", err),
            })
        })
    }
}

/// Creation failures are reported as `Failed to create todo: ...`, except
/// when nothing was supplied.
pub fn create_outcome(result: Result<CreateTodoResponse>) -> Outcome<CreateTodoResponse> {
    match result {
        Ok(response) => Outcome::success(response),
        Err(TodoError::NoItemsProvided) => Outcome::failure(TodoError::NoItemsProvided.to_string()),
        Err(err) => Outcome::failure(format!("Failed to create todo: {}", err)),
    }
}

/// Listing failures keep an empty listing with zeroed counts.
pub fn list_failure(error: impl std::fmt::Display) -> Outcome<ListTodosResponse> {
    Outcome::failure_with(
        format!("Failed to list todos: {}", error),
        ListTodosResponse::default(),
    )
}
