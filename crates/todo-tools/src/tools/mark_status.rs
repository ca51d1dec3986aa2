use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use todo_core::{Outcome, TodoStore};

use crate::args::required_string;
use crate::registry::{Tool, ToolError};
use crate::types::{AgentContext, ToolResult};

fn todo_id_schema(action: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "todo_id": {
                "type": "string",
                "description": format!("ID of the todo to mark as {}", action)
            }
        },
        "required": ["todo_id"]
    })
}

/// Tool for marking a todo as done
pub struct MarkTodoDoneTool {
    store: Arc<TodoStore>,
}

impl MarkTodoDoneTool {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for MarkTodoDoneTool {
    fn name(&self) -> &str {
        "mark_todo_done"
    }

    fn description(&self) -> &str {
        "Mark a todo as done and record when it was completed"
    }

    fn parameters_schema(&self) -> Value {
        todo_id_schema("done")
    }

    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError> {
        let todo_id = required_string(&args, "todo_id")?;
        let result = self.store.mark_todo_done(&ctx.agent_id, &todo_id);
        Ok(ToolResult::from_outcome(&Outcome::from_result(result)))
    }
}

/// Tool for reopening a todo
pub struct MarkTodoPendingTool {
    store: Arc<TodoStore>,
}

impl MarkTodoPendingTool {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for MarkTodoPendingTool {
    fn name(&self) -> &str {
        "mark_todo_pending"
    }

    fn description(&self) -> &str {
        "Mark a todo as pending again, clearing its completion time"
    }

    fn parameters_schema(&self) -> Value {
        todo_id_schema("pending")
    }

    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError> {
        let todo_id = required_string(&args, "todo_id")?;
        let result = self.store.mark_todo_pending(&ctx.agent_id, &todo_id);
        Ok(ToolResult::from_outcome(&Outcome::from_result(result)))
    }
}
