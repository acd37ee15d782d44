//! Integration tests for the todo app with the Store
//!
//! These tests drive the app the way a user does: render, click a row
//! control, render again.

use composable_todo_core::environment::IdentityFormatter;
use composable_todo_runtime::Store;
use composable_todo_testing::{MarkingFormatter, init_test_tracing, test_ids};
use std::sync::Arc;
use todo_app::{
    AppConfig, ClickOutcome, ControlKind, Decoration, TodoAction, TodoApp, TodoEnvironment,
    TodoId, TodoReducer, TodoRecord, TodoState, Variant,
};

fn record(id: u64, text: &str, completed: bool) -> TodoRecord {
    TodoRecord {
        id: TodoId::new(id),
        text: text.to_string(),
        completed,
    }
}

#[test]
fn test_seed_toggle_delete_scenario() {
    init_test_tracing();

    let env = TodoEnvironment::new(Arc::new(test_ids()));
    let mut store = Store::new(TodoState::seeded(), TodoReducer::new(), env);

    store.send(TodoAction::ToggleTodo { id: TodoId::new(1) }).unwrap();
    let todos = store.state(|s| s.todos.clone());
    assert_eq!(
        todos.as_slice(),
        &[record(1, "Learn React", true), record(2, "Build a project", false)]
    );

    store.send(TodoAction::DeleteTodo { id: TodoId::new(2) }).unwrap();
    let after_delete = store.state(|s| s.todos.clone());
    assert_eq!(after_delete.as_slice(), &[record(1, "Learn React", true)]);

    store.send(TodoAction::DeleteTodo { id: TodoId::new(99) }).unwrap();
    assert_eq!(store.state(|s| s.todos.clone()), after_delete);
    assert!(store.state(|s| s.last_error.is_none()));
}

#[test]
fn test_add_runs_through_feedback() {
    init_test_tracing();

    let env = TodoEnvironment::new(Arc::new(test_ids()));
    let mut store = Store::new(TodoState::seeded(), TodoReducer::new(), env);

    // Command plus the fed-back TodoAdded event
    let processed = store
        .send(TodoAction::AddTodo {
            text: "Write docs".to_string(),
        })
        .unwrap();
    assert_eq!(processed, 2);

    let state = store.into_state();
    assert_eq!(state.count(), 3);
    assert_eq!(state.todos.as_slice()[2], record(100, "Write docs", false));
}

#[test]
fn test_rows_rerender_after_each_click() {
    init_test_tracing();

    let mut app = TodoApp::new(AppConfig::default(), Box::new(MarkingFormatter));

    let before = app.render();
    assert_eq!(before.rows[0].decoration, Decoration::None);
    assert_eq!(before, app.render());

    assert_eq!(
        app.click(TodoId::new(1), ControlKind::Toggle),
        Ok(ClickOutcome::Dispatched)
    );

    let after = app.render();
    assert_eq!(after.rows[0].decoration, Decoration::LineThrough);
    assert_eq!(after.rows[0].text, "«Learn React»");
    assert_eq!(after.rows[1], before.rows[1]);
}

#[test]
fn test_student_variant_page() {
    let config = AppConfig::default().with_variant(Variant::Student);
    let mut app = TodoApp::new(config, Box::new(MarkingFormatter));

    assert_eq!(
        app.render().to_string(),
        "# My Todo App\n\n  1. Learn React [Toggle]\n  2. Build a project [Toggle]\n\n-- Toggle to mark done, delete to remove."
    );

    assert_eq!(
        app.click(TodoId::new(2), ControlKind::Delete),
        Ok(ClickOutcome::NoSuchControl)
    );
    assert_eq!(app.state(), TodoState::seeded());
}

#[test]
fn test_state_serializes_as_plain_records() {
    let mut app = TodoApp::new(AppConfig::default(), Box::new(IdentityFormatter));
    app.click(TodoId::new(2), ControlKind::Delete).unwrap();

    let json = serde_json::to_value(app.state()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "todos": [{"id": 1, "text": "Learn React", "completed": false}],
            "last_error": null,
        })
    );
}
