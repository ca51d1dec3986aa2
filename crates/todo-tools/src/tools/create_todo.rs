use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use todo_core::{create_outcome, CreateTodoRequest, TodoStore};

use crate::args::{optional_string, optional_value};
use crate::registry::{Tool, ToolError};
use crate::types::{AgentContext, ToolResult};

/// Tool for adding one or many todos to the caller's list
pub struct CreateTodoTool {
    store: Arc<TodoStore>,
}

impl CreateTodoTool {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CreateTodoTool {
    fn name(&self) -> &str {
        "create_todo"
    }

    fn description(&self) -> &str {
        "Create one or more todo items in your personal task list. \
        Pass a single 'title', or a 'todos' batch as a list of titles or objects, \
        a JSON string, or newline-separated text (bullets are stripped). \
        Returns the created ids and the full ordered list."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Title of a single todo"
                },
                "description": {
                    "type": "string",
                    "description": "Optional details for the single todo"
                },
                "priority": {
                    "type": "string",
                    "enum": ["low", "normal", "high", "critical"],
                    "default": "normal",
                    "description": "Priority for the single todo and default for batch items"
                },
                "todos": {
                    "description": "Batch of todos: list of titles or {title, description, priority} objects, a JSON string, or newline-separated text",
                    "oneOf": [
                        { "type": "string" },
                        { "type": "object" },
                        {
                            "type": "array",
                            "items": {
                                "oneOf": [
                                    { "type": "string" },
                                    {
                                        "type": "object",
                                        "properties": {
                                            "title": { "type": "string" },
                                            "description": { "type": "string" },
                                            "priority": { "type": "string" }
                                        },
                                        "required": ["title"]
                                    }
                                ]
                            }
                        }
                    ]
                }
            }
        })
    }

    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError> {
        let request = CreateTodoRequest {
            title: optional_string(&args, "title")?,
            description: optional_string(&args, "description")?,
            priority: optional_string(&args, "priority")?,
            todos: optional_value(&args, "todos"),
        };

        let outcome = create_outcome(self.store.create_todo(&ctx.agent_id, request));
        Ok(ToolResult::from_outcome(&outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_from_bullet_text() {
        let tool = CreateTodoTool::new(Arc::new(TodoStore::new()));
        let result = tool
            .execute(
                &AgentContext::new("agent"),
                json!({"todos": "- write tests\n- ship it"}),
            )
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.payload["count"], 2);
        assert_eq!(result.payload["created"][0]["title"], "write tests");
        assert_eq!(result.payload["total_count"], 2);
    }

    #[tokio::test]
    async fn reports_validation_failures() {
        let tool = CreateTodoTool::new(Arc::new(TodoStore::new()));
        let result = tool
            .execute(
                &AgentContext::new("agent"),
                json!({"title": "x", "priority": "whenever"}),
            )
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to create todo: Invalid priority"));
    }

    #[tokio::test]
    async fn rejects_non_string_title() {
        let tool = CreateTodoTool::new(Arc::new(TodoStore::new()));
        let result = tool
            .execute(&AgentContext::new("agent"), json!({"title": 5}))
            .await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
