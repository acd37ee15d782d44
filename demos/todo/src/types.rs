//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of records that can be toggled
//! between open and completed, deleted, and appended to. The state owned by
//! the store is the collection plus the last rejected command, if any.

use crate::collection::TodoCollection;
use composable_todo_macros::Action;
use serde::{Deserialize, Serialize};

/// Unique identifier for a todo record
///
/// Assigned once at creation and never reused for another record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TodoId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Unique identifier
    pub id: TodoId,
    /// Display text, fixed at creation
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoRecord {
    /// Creates a new, open todo record
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Returns a copy with `completed` negated
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// State of the todo application
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos, in display order
    pub todos: TodoCollection,
    /// Last rejected command (if any)
    pub last_error: Option<String>,
}

impl TodoState {
    /// Creates a state holding `todos` and no error
    #[must_use]
    pub const fn new(todos: TodoCollection) -> Self {
        Self {
            todos,
            last_error: None,
        }
    }

    /// Creates the startup state with the seed records
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(TodoCollection::seed())
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.completed_count()
    }
}

/// Actions representing commands and events for todos
///
/// Commands express what the user asked for and may be rejected. Events
/// record what happened and are always applied.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Flip the completed flag of a todo
    #[command]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Remove a todo
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: Append a new todo
    #[command]
    AddTodo {
        /// Text of the new todo
        text: String,
    },

    // ========== Events ==========
    /// Event: Todo was appended
    #[event]
    TodoAdded {
        /// Freshly minted identifier
        id: TodoId,
        /// Text of the todo
        text: String,
    },

    /// Event: Command validation failed
    #[event]
    ValidationFailed {
        /// Error message
        error: String,
    },
}
