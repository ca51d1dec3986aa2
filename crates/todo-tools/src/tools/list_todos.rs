use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use todo_core::{list_failure, ListFilter, Outcome, TodoStore};

use crate::args::lenient_string;
use crate::registry::{Tool, ToolError};
use crate::types::{AgentContext, ToolResult};

/// Tool for reading the caller's todo list with optional filters
pub struct ListTodosTool {
    store: Arc<TodoStore>,
}

impl ListTodosTool {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListTodosTool {
    fn name(&self) -> &str {
        "list_todos"
    }

    fn description(&self) -> &str {
        "List your todo items, done first, then in progress, then pending; \
        most urgent first within each group. Optionally filter by status and priority. \
        Includes per-status counts."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["pending", "in_progress", "done"],
                    "description": "Only return todos with this status"
                },
                "priority": {
                    "type": "string",
                    "enum": ["low", "normal", "high", "critical"],
                    "description": "Only return todos with this priority"
                }
            }
        })
    }

    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError> {
        let filter = ListFilter {
            status: lenient_string(&args, "status"),
            priority: lenient_string(&args, "priority"),
        };

        let response = self.store.list_todos(&ctx.agent_id, &filter);
        Ok(ToolResult::from_outcome(&Outcome::success(response)))
    }

    fn failure_payload(&self, error: &ToolError) -> Value {
        list_failure(error).to_value()
    }
}
