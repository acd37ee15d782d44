//! App composition: store, render layer, and configuration wired together.
//!
//! [`TodoApp`] owns the only copy of the todo state (inside its store). Row
//! controls reach the store through the app's [`TodoCallbacks`] impl, and
//! every render reads the state afresh.

use crate::config::AppConfig;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoState};
use crate::view::{ControlKind, Page, TodoCallbacks};
use composable_todo_core::environment::{SequentialIdGenerator, TextFormatter};
use composable_todo_runtime::{Store, StoreError};
use std::sync::Arc;

/// Store specialised to the todo reducer
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// What happened when a row control was clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The control existed and its action was dispatched
    Dispatched,
    /// No row shows this id
    NoSuchRow,
    /// The row exists but does not expose this control
    NoSuchControl,
}

/// The todo application
pub struct TodoApp {
    store: TodoStore,
    config: AppConfig,
    formatter: Box<dyn TextFormatter>,
}

impl TodoApp {
    /// Creates the app with the seed records
    #[must_use]
    pub fn new(config: AppConfig, formatter: Box<dyn TextFormatter>) -> Self {
        Self::with_state(config, formatter, TodoState::seeded())
    }

    /// Creates the app with an explicit starting state
    ///
    /// New ids are minted after the largest id already present.
    #[must_use]
    pub fn with_state(config: AppConfig, formatter: Box<dyn TextFormatter>, state: TodoState) -> Self {
        let last_id = state.todos.max_id().map_or(0, TodoId::get);
        let env = TodoEnvironment::new(Arc::new(SequentialIdGenerator::starting_after(last_id)));
        let store = Store::with_config(state, TodoReducer::new(), env, config.store);

        tracing::debug!(variant = %config.variant, last_id, "Todo app created");

        Self {
            store,
            config,
            formatter,
        }
    }

    /// The app configuration
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> TodoState {
        self.store.state(Clone::clone)
    }

    /// Renders the page from the current state
    #[must_use]
    pub fn render(&self) -> Page {
        self.store.state(|state| {
            Page::render(
                &self.config.title,
                &self.config.footer,
                &state.todos,
                &self.config.render_options(),
                &*self.formatter,
            )
        })
    }

    /// Sends an action straight to the store
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub fn dispatch(&mut self, action: TodoAction) -> Result<usize, StoreError> {
        self.store.send(action)
    }

    /// Clicks the `kind` control on the row showing `id`
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the dispatched action.
    pub fn click(&mut self, id: TodoId, kind: ControlKind) -> Result<ClickOutcome, StoreError> {
        let page = self.render();
        let Some(row) = page.row(id) else {
            tracing::debug!(%id, ?kind, "Click on a row that is not shown");
            return Ok(ClickOutcome::NoSuchRow);
        };

        if row.activate(kind, self)? {
            Ok(ClickOutcome::Dispatched)
        } else {
            tracing::debug!(%id, ?kind, "Row has no such control");
            Ok(ClickOutcome::NoSuchControl)
        }
    }

    /// Adds a todo with the given text
    ///
    /// Blank text is rejected by the reducer and reported in
    /// [`TodoState::last_error`].
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub fn add(&mut self, text: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::AddTodo { text: text.into() })?;
        Ok(())
    }
}

impl TodoCallbacks for TodoApp {
    type Error = StoreError;

    fn on_toggle(&mut self, id: TodoId) -> Result<(), StoreError> {
        tracing::info!(%id, "Toggle clicked");
        self.dispatch(TodoAction::ToggleTodo { id })?;
        Ok(())
    }

    fn on_delete(&mut self, id: TodoId) -> Result<(), StoreError> {
        tracing::info!(%id, "Delete clicked");
        self.dispatch(TodoAction::DeleteTodo { id })?;
        Ok(())
    }
}

impl std::fmt::Debug for TodoApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoApp")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::TodoCollection;
    use crate::config::Variant;
    use crate::error::TodoError;
    use crate::types::TodoRecord;
    use composable_todo_core::environment::IdentityFormatter;
    use composable_todo_testing::MarkingFormatter;

    fn complete_app() -> TodoApp {
        TodoApp::new(AppConfig::default(), Box::new(MarkingFormatter))
    }

    fn student_app() -> TodoApp {
        TodoApp::new(
            AppConfig::default().with_variant(Variant::Student),
            Box::new(MarkingFormatter),
        )
    }

    #[test]
    fn starts_with_seed() {
        let app = complete_app();
        assert_eq!(app.state(), TodoState::seeded());

        let page = app.render();
        assert_eq!(page.header, "My Todo App");
        assert_eq!(page.rows[0].text, "«Learn React»");
    }

    #[test]
    fn click_toggle_then_delete() {
        let mut app = complete_app();

        assert_eq!(app.click(TodoId::new(1), ControlKind::Toggle), Ok(ClickOutcome::Dispatched));
        assert_eq!(app.click(TodoId::new(2), ControlKind::Delete), Ok(ClickOutcome::Dispatched));

        assert_eq!(
            app.state().todos.as_slice(),
            &[TodoRecord {
                id: TodoId::new(1),
                text: "Learn React".to_string(),
                completed: true,
            }]
        );
    }

    #[test]
    fn click_unknown_row() {
        let mut app = complete_app();
        assert_eq!(app.click(TodoId::new(99), ControlKind::Delete), Ok(ClickOutcome::NoSuchRow));
        assert_eq!(app.state(), TodoState::seeded());
    }

    #[test]
    fn student_variant_cannot_delete() {
        let mut app = student_app();

        assert_eq!(
            app.click(TodoId::new(1), ControlKind::Delete),
            Ok(ClickOutcome::NoSuchControl)
        );
        assert_eq!(app.state().count(), 2);
        assert_eq!(app.render().rows[0].text, "Learn React");

        assert_eq!(app.click(TodoId::new(1), ControlKind::Toggle), Ok(ClickOutcome::Dispatched));
        assert_eq!(app.state().completed_count(), 1);
    }

    #[test]
    fn added_ids_are_never_reused() {
        let mut app = TodoApp::new(AppConfig::default(), Box::new(IdentityFormatter));

        app.add("Third").unwrap();
        assert_eq!(app.state().todos.max_id(), Some(TodoId::new(3)));

        app.click(TodoId::new(3), ControlKind::Delete).unwrap();
        app.add("Fourth").unwrap();

        let ids: Vec<u64> = app.state().todos.ids().map(TodoId::get).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn blank_add_sets_error() {
        let mut app = complete_app();
        app.add("  ").unwrap();
        assert_eq!(app.state().count(), 2);
        assert!(app.state().last_error.is_some());
    }

    #[test]
    fn max_id_seed_never_wraps() {
        let todos = TodoCollection::new(vec![TodoRecord::new(TodoId::new(u64::MAX), "Last")]).unwrap();
        let mut app = TodoApp::with_state(
            AppConfig::default(),
            Box::new(IdentityFormatter),
            TodoState::new(todos.clone()),
        );

        app.add("a").unwrap();
        app.add("b").unwrap();

        let state = app.state();
        assert_eq!(state.todos, todos);
        assert_eq!(state.last_error, Some(TodoError::IdsExhausted.to_string()));
        assert!(!state.todos.contains(TodoId::new(0)));
    }

    #[test]
    fn custom_state_mints_after_max_id() {
        let todos = TodoCollection::new(vec![TodoRecord::new(TodoId::new(41), "Answer")]).unwrap();
        let mut app = TodoApp::with_state(
            AppConfig::default(),
            Box::new(IdentityFormatter),
            TodoState::new(todos),
        );

        app.add("Next").unwrap();
        assert!(app.state().todos.contains(TodoId::new(42)));
    }
}
