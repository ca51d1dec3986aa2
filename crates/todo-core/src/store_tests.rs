//! Behavioural tests across the whole store

use std::thread;

use serde_json::json;

use crate::{
    CreateTodoRequest, ListFilter, Priority, Status, StatusSummary, TodoError, TodoStore,
    TodoView, UpdateTodoRequest,
};

fn list_all(store: &TodoStore, agent: &str) -> Vec<TodoView> {
    store.list_todos(agent, &ListFilter::default()).todos
}

fn assert_completion_invariant(todos: &[TodoView]) {
    for todo in todos {
        assert_eq!(
            todo.completed_at.is_some(),
            todo.status == Status::Done,
            "completed_at out of sync for {:?}",
            todo
        );
    }
}

#[test]
fn agents_are_isolated() {
    let store = TodoStore::new();
    let created = store
        .create_todo("agent-a", CreateTodoRequest::titled("secret plan"))
        .unwrap();
    let id = created.created[0].todo_id.clone();

    assert!(list_all(&store, "agent-b").is_empty());
    assert_eq!(
        store.mark_todo_done("agent-b", &id),
        Err(TodoError::NotFound(id.clone()))
    );
    assert_eq!(
        store.delete_todo("agent-b", &id),
        Err(TodoError::NotFound(id.clone()))
    );
    assert_eq!(list_all(&store, "agent-a").len(), 1);
}

#[test]
fn round_trip_single_todo() {
    let store = TodoStore::new();
    store
        .create_todo(
            "agent",
            CreateTodoRequest::titled("Buy milk").with_priority("high"),
        )
        .unwrap();

    let todos = list_all(&store, "agent");
    assert_eq!(todos.len(), 1);

    let todo = &todos[0];
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.priority, Priority::High);
    assert_eq!(todo.status, Status::Pending);
    assert_eq!(todo.created_at, todo.updated_at);
    assert!(todo.completed_at.is_none());
    assert_eq!(todo.todo_id.len(), 6);
}

#[test]
fn newline_text_creates_one_todo_per_line() {
    let store = TodoStore::new();
    let response = store
        .create_todo(
            "agent",
            CreateTodoRequest::bulk(json!("Task A\nTask B\n- Task C")),
        )
        .unwrap();

    let titles: Vec<&str> = response.created.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Task A", "Task B", "Task C"]);
    assert!(response
        .created
        .iter()
        .all(|created| created.priority == Priority::Normal));
    assert_eq!(response.count, 3);
}

#[test]
fn critical_lists_before_low() {
    let store = TodoStore::new();
    store
        .create_todo("agent", CreateTodoRequest::titled("later").with_priority("low"))
        .unwrap();
    store
        .create_todo(
            "agent",
            CreateTodoRequest::titled("now").with_priority("critical"),
        )
        .unwrap();

    let todos = list_all(&store, "agent");
    assert_eq!(todos[0].title, "now");
    assert_eq!(todos[1].title, "later");
}

#[test]
fn done_summary_after_marking() {
    let store = TodoStore::new();
    let created = store
        .create_todo("agent", CreateTodoRequest::titled("only one"))
        .unwrap();
    store
        .mark_todo_done("agent", &created.created[0].todo_id)
        .unwrap();

    let response = store.list_todos(
        "agent",
        &ListFilter {
            status: Some("done".to_string()),
            priority: None,
        },
    );

    assert_eq!(response.total_count, 1);
    assert_eq!(
        response.summary,
        StatusSummary {
            pending: 0,
            in_progress: 0,
            done: 1
        }
    );
}

#[test]
fn bulk_creation_is_all_or_nothing() {
    let store = TodoStore::new();
    store
        .create_todo("agent", CreateTodoRequest::titled("existing"))
        .unwrap();

    let bad_batches = [
        json!([{"title": "fine"}, {"title": "bad", "priority": "urgent"}]),
        json!([{"title": "fine"}, {"description": "missing title"}]),
        json!(["fine", 17]),
    ];
    for batch in bad_batches {
        assert!(store
            .create_todo("agent", CreateTodoRequest::bulk(batch))
            .is_err());
    }

    let todos = list_all(&store, "agent");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "existing");
}

#[test]
fn missing_ids_leave_collection_unchanged() {
    let store = TodoStore::new();
    store
        .create_todo("agent", CreateTodoRequest::bulk(json!(["one", "two"])))
        .unwrap();
    let before = list_all(&store, "agent");

    let missing = "nope00";
    let expected = Err(TodoError::NotFound(missing.to_string()));
    assert_eq!(
        store.update_todo(
            "agent",
            missing,
            UpdateTodoRequest {
                title: Some("x".to_string()),
                ..Default::default()
            }
        ),
        expected
    );
    assert_eq!(store.mark_todo_done("agent", missing), expected);
    assert_eq!(store.mark_todo_pending("agent", missing), expected);
    assert_eq!(store.delete_todo("agent", missing), expected);

    assert_eq!(list_all(&store, "agent"), before);
}

#[test]
fn listing_is_stable_and_sorted() {
    let store = TodoStore::new();
    store
        .create_todo(
            "agent",
            CreateTodoRequest::bulk(json!([
                {"title": "a", "priority": "low"},
                {"title": "b", "priority": "critical"},
                {"title": "c"},
                {"title": "d", "priority": "high"},
                {"title": "e", "priority": "low"}
            ])),
        )
        .unwrap();
    let ids: Vec<String> = list_all(&store, "agent")
        .into_iter()
        .map(|todo| todo.todo_id)
        .collect();
    store.mark_todo_done("agent", &ids[3]).unwrap();
    store
        .update_todo(
            "agent",
            &ids[4],
            UpdateTodoRequest {
                status: Some("in_progress".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let first = list_all(&store, "agent");
    let second = list_all(&store, "agent");
    assert_eq!(first, second);

    let keys: Vec<(u8, u8)> = first
        .iter()
        .map(|todo| (todo.status.rank(), todo.priority.rank()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    for pair in first.windows(2) {
        if (pair[0].status, pair[0].priority) == (pair[1].status, pair[1].priority) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }
}

#[test]
fn completion_invariant_holds_after_every_mutation() {
    let store = TodoStore::new();
    let created = store
        .create_todo("agent", CreateTodoRequest::bulk(json!(["x", "y"])))
        .unwrap();
    let id = created.created[0].todo_id.clone();
    assert_completion_invariant(&created.todos);

    let steps: Vec<Box<dyn Fn() -> Vec<TodoView> + '_>> = vec![
        Box::new(|| store.mark_todo_done("agent", &id).unwrap().todos),
        Box::new(|| {
            store
                .update_todo(
                    "agent",
                    &id,
                    UpdateTodoRequest {
                        status: Some("IN_PROGRESS".to_string()),
                        ..Default::default()
                    },
                )
                .unwrap()
                .todos
        }),
        Box::new(|| {
            store
                .update_todo(
                    "agent",
                    &id,
                    UpdateTodoRequest {
                        status: Some("done".to_string()),
                        ..Default::default()
                    },
                )
                .unwrap()
                .todos
        }),
        Box::new(|| store.mark_todo_pending("agent", &id).unwrap().todos),
    ];

    for step in steps {
        assert_completion_invariant(&step());
    }
}

#[test]
fn concurrent_agents_and_same_agent_writes() {
    let store = TodoStore::new();

    thread::scope(|scope| {
        for agent in 0..4 {
            let store = &store;
            scope.spawn(move || {
                let agent_id = format!("agent-{}", agent);
                for n in 0..25 {
                    store
                        .create_todo(&agent_id, CreateTodoRequest::titled(format!("task {}", n)))
                        .unwrap();
                }
            });
        }
        for writer in 0..4 {
            let store = &store;
            scope.spawn(move || {
                for n in 0..25 {
                    store
                        .create_todo(
                            "shared",
                            CreateTodoRequest::titled(format!("writer {} task {}", writer, n)),
                        )
                        .unwrap();
                }
            });
        }
    });

    for agent in 0..4 {
        assert_eq!(list_all(&store, &format!("agent-{}", agent)).len(), 25);
    }
    assert_eq!(list_all(&store, "shared").len(), 100);
    assert_eq!(store.agent_count(), 5);
}
