//! Todo operations exposed as agent tools.
//!
//! Each tool implements the `Tool` trait over a shared `TodoStore`; the
//! `ToolRegistry` dispatches named calls and always answers with a payload.

mod args;
pub mod registry;
pub mod tools;
pub mod types;

pub use registry::{normalize_tool_name, RegistryError, SharedTool, Tool, ToolError, ToolRegistry};
pub use tools::{
    CreateTodoTool, DeleteTodoTool, ListTodosTool, MarkTodoDoneTool, MarkTodoPendingTool,
    UpdateTodoTool,
};
pub use types::{AgentContext, FunctionSchema, ToolResult, ToolSchema};

// Re-export store types for hosts that only depend on this crate
pub use todo_core::{StoreConfig, TodoStore};
