use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use todo_core::{Outcome, TodoStore, UpdateTodoRequest};

use crate::args::{optional_string, required_string};
use crate::registry::{Tool, ToolError};
use crate::types::{AgentContext, ToolResult};

/// Tool for editing fields of an existing todo
pub struct UpdateTodoTool {
    store: Arc<TodoStore>,
}

impl UpdateTodoTool {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for UpdateTodoTool {
    fn name(&self) -> &str {
        "update_todo"
    }

    fn description(&self) -> &str {
        "Update an existing todo. Only the fields you pass are changed; \
        pass an empty description to clear it. Setting status to done records the completion time."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "todo_id": {
                    "type": "string",
                    "description": "ID of the todo to update"
                },
                "title": {
                    "type": "string",
                    "description": "New title (cannot be empty)"
                },
                "description": {
                    "type": "string",
                    "description": "New description; empty string clears it"
                },
                "priority": {
                    "type": "string",
                    "enum": ["low", "normal", "high", "critical"]
                },
                "status": {
                    "type": "string",
                    "enum": ["pending", "in_progress", "done"]
                }
            },
            "required": ["todo_id"]
        })
    }

    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError> {
        let todo_id = required_string(&args, "todo_id")?;
        let request = UpdateTodoRequest {
            title: optional_string(&args, "title")?,
            description: optional_string(&args, "description")?,
            priority: optional_string(&args, "priority")?,
            status: optional_string(&args, "status")?,
        };

        let result = self.store.update_todo(&ctx.agent_id, &todo_id, request);
        Ok(ToolResult::from_outcome(&Outcome::from_result(result)))
    }
}
