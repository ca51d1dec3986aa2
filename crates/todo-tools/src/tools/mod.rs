mod create_todo;
mod delete_todo;
mod list_todos;
mod mark_status;
mod update_todo;

pub use create_todo::CreateTodoTool;
pub use delete_todo::DeleteTodoTool;
pub use list_todos::ListTodosTool;
pub use mark_status::{MarkTodoDoneTool, MarkTodoPendingTool};
pub use update_todo::UpdateTodoTool;
