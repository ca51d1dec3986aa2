//! Per-agent todo registry
//!
//! Each agent identifier maps to its own lazily-created collection behind its
//! own mutex: calls for different agents never contend, calls for the same
//! agent run one at a time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use log::{info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::model::{Todo, TodoView};
use crate::ordering;

/// One agent's todos, keyed by todo id.
#[derive(Debug, Default)]
pub struct AgentTodos {
    todos: HashMap<String, Todo>,
    next_sequence: u64,
}

impl AgentTodos {
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn contains(&self, todo_id: &str) -> bool {
        self.todos.contains_key(todo_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.todos.values()
    }

    /// All todos in presentation order.
    pub fn ordered(&self) -> Vec<TodoView> {
        ordering::ordered(self.todos.values())
    }

    pub(crate) fn get_mut(&mut self, todo_id: &str) -> Option<&mut Todo> {
        self.todos.get_mut(todo_id)
    }

    pub(crate) fn insert(&mut self, todo: Todo) {
        self.todos.insert(todo.id.clone(), todo);
    }

    pub(crate) fn remove(&mut self, todo_id: &str) -> Option<Todo> {
        self.todos.remove(todo_id)
    }

    pub(crate) fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}

/// Process-wide registry of agent todo collections.
///
/// Construct one per host and share it (typically behind an `Arc`); it owns
/// every collection for its own lifetime.
#[derive(Debug, Default)]
pub struct TodoStore {
    agents: DashMap<String, Arc<Mutex<AgentTodos>>>,
    config: StoreConfig,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            agents: DashMap::new(),
            config,
        }
    }

    /// Number of agents that have touched the store.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    fn collection(&self, agent_id: &str) -> Arc<Mutex<AgentTodos>> {
        // Clone the Arc so the shard lock is released before the agent lock is taken.
        let entry = self.agents.entry(agent_id.to_string()).or_insert_with(|| {
            info!("Creating todo collection for agent '{}'", agent_id);
            Arc::new(Mutex::new(AgentTodos::default()))
        });
        Arc::clone(entry.value())
    }

    /// Runs `f` with exclusive access to the agent's collection.
    pub fn with_agent<R>(&self, agent_id: &str, f: impl FnOnce(&mut AgentTodos) -> R) -> R {
        let collection = self.collection(agent_id);
        let mut guard = collection.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard)
    }

    /// Draws a fresh id not already present in `todos`.
    pub(crate) fn generate_id(&self, todos: &AgentTodos) -> String {
        self.draw_id(todos, short_id)
    }

    fn draw_id(&self, todos: &AgentTodos, mut draw: impl FnMut(usize) -> String) -> String {
        let length = self.config.effective_id_length();
        let attempts = self.config.effective_max_id_attempts();

        let mut candidate = draw(length);
        for _ in 1..attempts {
            if !todos.contains(&candidate) {
                break;
            }
            warn!("Todo id '{}' already in use, drawing another", candidate);
            candidate = draw(length);
        }
        candidate
    }
}

fn short_id(length: usize) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(length);
    id
}
