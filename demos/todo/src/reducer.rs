//! Reducer logic for the todo list.
//!
//! Toggle and delete replace the collection with the result of the matching
//! pure transformation. Add is validated first, then recorded as a
//! `TodoAdded` event that the store feeds back into the reducer.

use crate::collection::{TodoCollection, add, delete, toggle, validate_text};
use crate::error::TodoError;
use crate::types::{TodoAction, TodoId, TodoState};
use composable_todo_core::{
    SmallVec, effect::Effect, environment::IdGenerator, reducer::Reducer, smallvec,
};
use std::sync::Arc;

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of fresh todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        match action {
            TodoAction::TodoAdded { id, text } => match add(&state.todos, *id, text) {
                Ok(todos) => {
                    state.todos = todos;
                    state.last_error = None;
                },
                Err(error) => {
                    tracing::warn!(%id, %error, "Dropping TodoAdded event");
                    state.last_error = Some(error.to_string());
                },
            },
            TodoAction::ValidationFailed { error } => {
                state.last_error = Some(error.clone());
            },
            // Commands are not applied as events
            TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. }
            | TodoAction::AddTodo { .. } => {},
        }
    }

    /// Replaces the list with `next` if `id` names a todo; otherwise a no-op
    fn replace_if_known(
        state: &mut TodoState,
        id: TodoId,
        command: &'static str,
        next: impl FnOnce(&TodoState) -> TodoCollection,
    ) {
        if state.todos.contains(id) {
            state.todos = next(state);
            state.last_error = None;
        } else {
            tracing::debug!(%id, command, "No todo with this id, leaving list unchanged");
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::trace!(action = action.name(), command = action.is_command(), "Reducing");

        match action {
            // ========== Commands ==========
            TodoAction::ToggleTodo { id } => {
                Self::replace_if_known(state, id, "toggle", |s| toggle(&s.todos, id));
                SmallVec::new()
            },

            TodoAction::DeleteTodo { id } => {
                Self::replace_if_known(state, id, "delete", |s| delete(&s.todos, id));
                SmallVec::new()
            },

            TodoAction::AddTodo { text } => {
                let minted = validate_text(&text)
                    .and_then(|()| env.ids.next_id().ok_or(TodoError::IdsExhausted));

                match minted {
                    Ok(raw) => {
                        let id = TodoId::new(raw);
                        smallvec![Effect::send(TodoAction::TodoAdded { id, text })]
                    },
                    Err(error) => {
                        tracing::debug!(%error, "Rejected AddTodo");
                        let error = error.to_string();
                        Self::apply_event(state, &TodoAction::ValidationFailed { error });
                        SmallVec::new()
                    },
                }
            },

            // ========== Events ==========
            TodoAction::TodoAdded { .. } | TodoAction::ValidationFailed { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
