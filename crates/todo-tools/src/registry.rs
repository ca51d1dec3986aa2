use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use log::{debug, warn};
use serde_json::{json, Value};
use thiserror::Error;
use todo_core::TodoStore;

use crate::tools::{
    CreateTodoTool, DeleteTodoTool, ListTodosTool, MarkTodoDoneTool, MarkTodoPendingTool,
    UpdateTodoTool,
};
use crate::types::{AgentContext, FunctionSchema, ToolResult, ToolSchema};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, ctx: &AgentContext, args: Value) -> Result<ToolResult, ToolError>;

    /// Payload reported when `execute` fails before reaching the store.
    fn failure_payload(&self, error: &ToolError) -> Value {
        json!({
            "success": false,
            "error": error.to_string(),
        })
    }

    fn to_schema(&self) -> ToolSchema {
        ToolSchema {
            schema_type: "function".to_string(),
            function: FunctionSchema {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters_schema(),
            },
        }
    }
}

pub type SharedTool = Arc<dyn Tool>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool with name '{0}' already registered")]
    DuplicateTool(String),

    #[error("invalid tool: {0}")]
    InvalidTool(String),
}

pub struct ToolRegistry {
    tools: DashMap<String, SharedTool>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: DashMap::new(),
        }
    }

    /// Registry holding all six todo tools over one shared store.
    pub fn with_todo_tools(store: Arc<TodoStore>) -> Self {
        let registry = Self::new();
        let tools: [SharedTool; 6] = [
            Arc::new(CreateTodoTool::new(Arc::clone(&store))),
            Arc::new(ListTodosTool::new(Arc::clone(&store))),
            Arc::new(UpdateTodoTool::new(Arc::clone(&store))),
            Arc::new(MarkTodoDoneTool::new(Arc::clone(&store))),
            Arc::new(MarkTodoPendingTool::new(Arc::clone(&store))),
            Arc::new(DeleteTodoTool::new(store)),
        ];
        for tool in tools {
            if let Err(err) = registry.register_shared(tool) {
                warn!("Skipping todo tool: {}", err);
            }
        }
        registry
    }

    pub fn register<T>(&self, tool: T) -> Result<(), RegistryError>
    where
        T: Tool + 'static,
    {
        self.register_shared(Arc::new(tool))
    }

    pub fn register_shared(&self, tool: SharedTool) -> Result<(), RegistryError> {
        let name = tool.name().trim();

        if name.is_empty() {
            return Err(RegistryError::InvalidTool(
                "tool name cannot be empty".to_string(),
            ));
        }

        match self.tools.entry(name.to_string()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateTool(name.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(tool);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<SharedTool> {
        self.tools.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn list_tools(&self) -> Vec<ToolSchema> {
        let mut tools: Vec<ToolSchema> = self
            .tools
            .iter()
            .map(|entry| entry.value().to_schema())
            .collect();
        tools.sort_by(|left, right| left.function.name.cmp(&right.function.name));
        tools
    }

    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Runs the named tool for `ctx`. Never fails: every error becomes a
    /// failure payload.
    pub async fn invoke(&self, ctx: &AgentContext, name: &str, args: Value) -> ToolResult {
        let name = normalize_tool_name(name);
        let Some(tool) = self.get(name) else {
            warn!("Agent '{}' called unknown tool '{}'", ctx.agent_id, name);
            return ToolResult::failure(ToolError::NotFound(name.to_string()).to_string());
        };

        debug!("Agent '{}' invoking '{}'", ctx.agent_id, name);
        match tool.execute(ctx, args).await {
            Ok(result) => result,
            Err(err) => {
                warn!("Tool '{}' rejected call from '{}': {}", name, ctx.agent_id, err);
                ToolResult {
                    success: false,
                    payload: tool.failure_payload(&err),
                }
            }
        }
    }
}

pub fn normalize_tool_name(name: &str) -> &str {
    name.split("::").last().unwrap_or(name).trim()
}
