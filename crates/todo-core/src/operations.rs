//! The todo operations: create, list, update, mark done/pending, delete.
//!
//! Every mutating call validates its whole input before touching the
//! collection, so a failed call leaves the collection unchanged.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TodoError};
use crate::model::{Priority, Status, Todo, TodoView};
use crate::normalize::{
    normalize_bulk_input, normalize_priority, normalize_status, trimmed_non_empty, DraftTodo,
};
use crate::ordering;
use crate::store::{AgentTodos, TodoStore};

/// Arguments of [`TodoStore::create_todo`].
#[derive(Debug, Clone, Default)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Default priority for every created item; `normal` when absent.
    pub priority: Option<String>,
    /// Bulk input in any shape accepted by [`normalize_bulk_input`].
    pub todos: Option<Value>,
}

impl CreateTodoRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn bulk(todos: Value) -> Self {
        Self {
            todos: Some(todos),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Fields to change in [`TodoStore::update_todo`]; `None` leaves a field as is.
///
/// `description: Some("")` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

/// Case-insensitive exact-match filters for [`TodoStore::list_todos`].
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreatedTodo {
    pub todo_id: String,
    pub title: String,
    pub priority: Priority,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CreateTodoResponse {
    pub created: Vec<CreatedTodo>,
    pub count: usize,
    pub todos: Vec<TodoView>,
    pub total_count: usize,
}

/// Per-status counts of a listing.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub pending: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusSummary {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::Pending => self.pending += 1,
            Status::InProgress => self.in_progress += 1,
            Status::Done => self.done += 1,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ListTodosResponse {
    pub todos: Vec<TodoView>,
    pub total_count: usize,
    pub summary: StatusSummary,
}

/// Full ordered collection returned after a mutation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TodoListResponse {
    pub todos: Vec<TodoView>,
    pub total_count: usize,
}

impl TodoListResponse {
    fn from_collection(todos: &AgentTodos) -> Self {
        let todos = todos.ordered();
        Self {
            total_count: todos.len(),
            todos,
        }
    }
}

/// Validated form of an [`UpdateTodoRequest`].
struct TodoPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<Priority>,
    status: Option<Status>,
}

impl TodoPatch {
    fn validate(request: &UpdateTodoRequest, current_priority: Priority) -> Result<Self> {
        let title = match request.title.as_deref() {
            Some(title) => Some(trimmed_non_empty(Some(title)).ok_or(TodoError::EmptyTitle)?),
            None => None,
        };
        let priority = request
            .priority
            .as_deref()
            .map(|raw| normalize_priority(Some(raw), Some(current_priority.as_str())))
            .transpose()?;
        let status = request.status.as_deref().map(normalize_status).transpose()?;

        Ok(Self {
            title,
            description: request
                .description
                .as_deref()
                .map(|text| trimmed_non_empty(Some(text))),
            priority,
            status,
        })
    }

    fn apply(self, todo: &mut Todo, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(status) = self.status {
            todo.set_status(status, now);
        }
        todo.touch(now);
    }
}

impl TodoStore {
    /// Creates one todo per draft from `request.todos` plus the direct title.
    ///
    /// All-or-nothing: every draft is validated before the first insert.
    pub fn create_todo(
        &self,
        agent_id: &str,
        request: CreateTodoRequest,
    ) -> Result<CreateTodoResponse> {
        let default_priority = normalize_priority(request.priority.as_deref(), None)?;

        let mut drafts = match &request.todos {
            Some(raw) => normalize_bulk_input(raw)?,
            None => Vec::new(),
        };
        if let Some(title) = trimmed_non_empty(request.title.as_deref()) {
            drafts.push(DraftTodo {
                title,
                description: trimmed_non_empty(request.description.as_deref()),
                priority: Some(default_priority.as_str().to_string()),
            });
        }
        if drafts.is_empty() {
            return Err(TodoError::NoItemsProvided);
        }

        let resolved = drafts
            .into_iter()
            .map(|draft| -> Result<(DraftTodo, Priority)> {
                let priority =
                    normalize_priority(draft.priority.as_deref(), Some(default_priority.as_str()))?;
                Ok((draft, priority))
            })
            .collect::<Result<Vec<_>>>()?;

        self.with_agent(agent_id, |todos| -> Result<CreateTodoResponse> {
            let mut created = Vec::with_capacity(resolved.len());
            for (draft, priority) in resolved {
                let id = self.generate_id(todos);
                let sequence = todos.next_sequence();
                let todo = Todo::new(
                    id,
                    draft.title,
                    draft.description,
                    priority,
                    sequence,
                    Utc::now(),
                );
                created.push(CreatedTodo {
                    todo_id: todo.id.clone(),
                    title: todo.title.clone(),
                    priority,
                });
                todos.insert(todo);
            }

            debug!(
                "Agent '{}' created {} todo(s), {} total",
                agent_id,
                created.len(),
                todos.len()
            );

            let listing = TodoListResponse::from_collection(todos);
            Ok(CreateTodoResponse {
                count: created.len(),
                created,
                todos: listing.todos,
                total_count: listing.total_count,
            })
        })
    }

    /// Lists the agent's todos matching every given filter.
    ///
    /// Filter values are only lower-cased; unknown values match nothing.
    pub fn list_todos(&self, agent_id: &str, filter: &ListFilter) -> ListTodosResponse {
        let status_filter = lowered_filter(filter.status.as_deref());
        let priority_filter = lowered_filter(filter.priority.as_deref());

        self.with_agent(agent_id, |todos| {
            let matching = ordering::ordered(todos.iter().filter(|todo| {
                status_filter
                    .as_deref()
                    .map_or(true, |status| todo.status.as_str() == status)
                    && priority_filter
                        .as_deref()
                        .map_or(true, |priority| todo.priority.as_str() == priority)
            }));

            let mut summary = StatusSummary::default();
            for todo in &matching {
                summary.record(todo.status);
            }

            ListTodosResponse {
                total_count: matching.len(),
                todos: matching,
                summary,
            }
        })
    }

    /// Applies the provided fields to one todo, or none of them on failure.
    pub fn update_todo(
        &self,
        agent_id: &str,
        todo_id: &str,
        request: UpdateTodoRequest,
    ) -> Result<TodoListResponse> {
        self.with_agent(agent_id, |todos| -> Result<TodoListResponse> {
            let todo = todos
                .get_mut(todo_id)
                .ok_or_else(|| TodoError::NotFound(todo_id.to_string()))?;

            TodoPatch::validate(&request, todo.priority)?.apply(todo, Utc::now());
            debug!("Agent '{}' updated todo '{}'", agent_id, todo_id);

            Ok(TodoListResponse::from_collection(todos))
        })
    }

    pub fn mark_todo_done(&self, agent_id: &str, todo_id: &str) -> Result<TodoListResponse> {
        self.set_status(agent_id, todo_id, Status::Done)
    }

    pub fn mark_todo_pending(&self, agent_id: &str, todo_id: &str) -> Result<TodoListResponse> {
        self.set_status(agent_id, todo_id, Status::Pending)
    }

    pub fn delete_todo(&self, agent_id: &str, todo_id: &str) -> Result<TodoListResponse> {
        self.with_agent(agent_id, |todos| -> Result<TodoListResponse> {
            todos
                .remove(todo_id)
                .ok_or_else(|| TodoError::NotFound(todo_id.to_string()))?;
            debug!("Agent '{}' deleted todo '{}'", agent_id, todo_id);

            Ok(TodoListResponse::from_collection(todos))
        })
    }

    fn set_status(
        &self,
        agent_id: &str,
        todo_id: &str,
        status: Status,
    ) -> Result<TodoListResponse> {
        self.with_agent(agent_id, |todos| -> Result<TodoListResponse> {
            let todo = todos
                .get_mut(todo_id)
                .ok_or_else(|| TodoError::NotFound(todo_id.to_string()))?;

            let now = Utc::now();
            todo.set_status(status, now);
            todo.touch(now);
            debug!("Agent '{}' marked todo '{}' {}", agent_id, todo_id, status);

            Ok(TodoListResponse::from_collection(todos))
        })
    }
}

fn lowered_filter(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}
