use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use todo_core::{Outcome, TodoStore};

use crate::args::required_string;
use crate::registry::{Tool, ToolError};
use crate::types::{AgentContext, ToolResult};

/// Tool for permanently removing a todo
pub struct DeleteTodoTool {
    store: Arc<TodoStore>,
}

impl DeleteTodoTool {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DeleteTodoTool {
    fn name(&self) -> &str {
        "delete_todo"
    }

    fn description(&self) -> &str {
        "Delete a todo from your list permanently"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "todo_id": {
                    "type": "string",
                    "description": "ID of the todo to delete"
                }
            },
            "required": ["todo_id"]
        })
    }

    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError> {
        let todo_id = required_string(&args, "todo_id")?;
        let result = self.store.delete_todo(&ctx.agent_id, &todo_id);
        Ok(ToolResult::from_outcome(&Outcome::from_result(result)))
    }
}
