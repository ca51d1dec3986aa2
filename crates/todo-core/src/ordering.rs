//! Presentation order for todo listings.
//!
//! Sorted ascending by status rank, then priority rank, then creation time;
//! items created at the same instant keep insertion order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::model::{Todo, TodoView};

pub fn sort_key(todo: &Todo) -> (u8, u8, DateTime<Utc>, u64) {
    (
        todo.status.rank(),
        todo.priority.rank(),
        todo.created_at,
        todo.sequence,
    )
}

pub fn compare(left: &Todo, right: &Todo) -> Ordering {
    sort_key(left).cmp(&sort_key(right))
}

/// Returns the given todos as views in presentation order.
pub fn ordered<'a, I>(todos: I) -> Vec<TodoView>
where
    I: IntoIterator<Item = &'a Todo>,
{
    let mut sorted: Vec<&Todo> = todos.into_iter().collect();
    sorted.sort_by(|left, right| compare(left, right));
    sorted.into_iter().map(Todo::to_view).collect()
}
