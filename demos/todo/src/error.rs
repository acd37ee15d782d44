//! Error types for the todo domain.

use crate::types::TodoId;
use thiserror::Error;

/// Errors produced when building or extending a todo collection
///
/// Toggling or deleting an unknown id is not an error; those operations
/// leave the collection unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The todo text is empty or only whitespace
    #[error("Todo text cannot be empty")]
    EmptyText,

    /// Two records would share an id
    #[error("Todo with ID {0} already exists")]
    DuplicateId(TodoId),

    /// The id generator has no fresh ids left
    #[error("No fresh todo ids left")]
    IdsExhausted,
}
