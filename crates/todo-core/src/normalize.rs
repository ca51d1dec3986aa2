//! Input normalization
//!
//! Validates priority/status values and converts the loosely-typed bulk
//! creation input into a list of [`DraftTodo`]s.

use serde_json::{Map, Value};

use crate::error::{Result, TodoError};
use crate::model::{Priority, Status};

/// Candidate todo produced by bulk parsing, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftTodo {
    pub title: String,
    pub description: Option<String>,
    /// Raw priority, resolved against the call's default at creation.
    pub priority: Option<String>,
}

impl DraftTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
        }
    }
}

/// Lower-cases `raw` (or `default`, or `normal`) and checks it is a known priority.
///
/// Empty strings count as absent.
pub fn normalize_priority(raw: Option<&str>, default: Option<&str>) -> Result<Priority> {
    let candidate = raw
        .filter(|value| !value.is_empty())
        .or_else(|| default.filter(|value| !value.is_empty()))
        .unwrap_or(Priority::Normal.as_str())
        .to_lowercase();
    candidate.parse()
}

pub fn normalize_status(raw: &str) -> Result<Status> {
    raw.to_lowercase().parse()
}

/// Trims `value`, mapping blank text to `None`.
pub fn trimmed_non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Shape of bulk creation input, decided by inspecting the JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkInput {
    Empty,
    SingleMapping(Map<String, Value>),
    SingleString(String),
    List(Vec<Value>),
    FreeText(String),
}

impl BulkInput {
    pub fn classify(raw: &Value) -> Result<Self> {
        match raw {
            Value::Null => Ok(Self::Empty),
            Value::Object(map) => Ok(Self::SingleMapping(map.clone())),
            Value::Array(items) => Ok(Self::List(items.clone())),
            Value::String(text) => Ok(Self::classify_text(text)),
            other => Err(TodoError::InvalidInputShape(format!(
                "Todos must be provided as a list, object, or text, got {}",
                other
            ))),
        }
    }

    /// Text is parsed as JSON first; anything that is not an object, array
    /// or string literal is treated as one title per line.
    fn classify_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => Self::SingleMapping(map),
            Ok(Value::Array(items)) => Self::List(items),
            Ok(Value::String(title)) => Self::SingleString(title),
            _ => Self::FreeText(trimmed.to_string()),
        }
    }

    pub fn into_drafts(self) -> Result<Vec<DraftTodo>> {
        match self {
            Self::Empty => Ok(Vec::new()),
            Self::SingleMapping(map) => Ok(vec![draft_from_mapping(&map)?]),
            Self::SingleString(title) => Ok(vec![draft_from_string(&title)?]),
            Self::List(items) => items.iter().map(draft_from_entry).collect(),
            Self::FreeText(text) => Ok(drafts_from_lines(&text)),
        }
    }
}

/// Expands any accepted bulk input shape into draft items, in input order.
pub fn normalize_bulk_input(raw: &Value) -> Result<Vec<DraftTodo>> {
    BulkInput::classify(raw)?.into_drafts()
}

fn draft_from_entry(entry: &Value) -> Result<DraftTodo> {
    match entry {
        Value::String(title) => draft_from_string(title),
        Value::Object(map) => draft_from_mapping(map),
        _ => Err(TodoError::InvalidInputShape(
            "Each todo entry must be a string or object with a title".to_string(),
        )),
    }
}

fn draft_from_string(title: &str) -> Result<DraftTodo> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TodoError::InvalidTodoEntry(
            "Each todo entry must include a non-empty title".to_string(),
        ));
    }
    Ok(DraftTodo::titled(title))
}

fn draft_from_mapping(map: &Map<String, Value>) -> Result<DraftTodo> {
    let title = map
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| {
            TodoError::InvalidTodoEntry(
                "Each todo entry must include a non-empty 'title'".to_string(),
            )
        })?;

    let description = match map.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => trimmed_non_empty(Some(text)),
        Some(_) => {
            return Err(TodoError::InvalidTodoEntry(format!(
                "Todo '{}' has a non-text 'description'",
                title
            )))
        }
    };

    let priority = match map.get("priority") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => return Err(TodoError::InvalidPriority(other.to_string())),
    };

    Ok(DraftTodo {
        title: title.to_string(),
        description,
        priority,
    })
}

fn drafts_from_lines(text: &str) -> Vec<DraftTodo> {
    text.lines()
        .map(|line| line.trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '*'))
        .filter(|line| !line.is_empty())
        .map(DraftTodo::titled)
        .collect()
}
