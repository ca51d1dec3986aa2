//! todo_core - Per-agent in-memory todo lists
//!
//! - `model` - Todo, Priority, Status and the flat TodoView record
//! - `normalize` - priority/status validation and bulk input parsing
//! - `ordering` - presentation order used by every listing
//! - `store` - TodoStore registry with one lock per agent collection
//! - `operations` - create, list, update, mark done/pending, delete
//! - `response` - success/failure envelope for callers

pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod operations;
pub mod ordering;
pub mod response;
pub mod store;

pub use config::StoreConfig;
pub use error::{ConfigError, Result, TodoError};
pub use model::{Priority, Status, Todo, TodoView};
pub use normalize::{
    normalize_bulk_input, normalize_priority, normalize_status, BulkInput, DraftTodo,
};
pub use operations::{
    CreateTodoRequest, CreateTodoResponse, CreatedTodo, ListFilter, ListTodosResponse,
    StatusSummary, TodoListResponse, UpdateTodoRequest,
};
pub use response::{create_outcome, list_failure, Outcome};
pub use store::{AgentTodos, TodoStore};

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
