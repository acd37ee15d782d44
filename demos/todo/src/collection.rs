//! The todo collection and its pure transformations.
//!
//! Every transformation borrows the current collection and returns a new
//! one; the input is never modified and stays valid after the call. Ids are
//! pairwise distinct in every collection this module produces.

use crate::error::TodoError;
use crate::types::{TodoId, TodoRecord};
use serde::{Deserialize, Serialize};

/// Ordered sequence of todo records with unique ids
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<TodoRecord>", into = "Vec<TodoRecord>")]
pub struct TodoCollection {
    records: Vec<TodoRecord>,
}

impl TodoCollection {
    /// Builds a collection from records in display order
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::DuplicateId`] for the first id that appears twice.
    pub fn new(records: Vec<TodoRecord>) -> Result<Self, TodoError> {
        for (index, record) in records.iter().enumerate() {
            if records[..index].iter().any(|earlier| earlier.id == record.id) {
                return Err(TodoError::DuplicateId(record.id));
            }
        }
        Ok(Self { records })
    }

    /// The records the application starts with
    #[must_use]
    pub fn seed() -> Self {
        Self {
            records: vec![
                TodoRecord::new(TodoId::new(1), "Learn React"),
                TodoRecord::new(TodoId::new(2), "Build a project"),
            ],
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in display order
    #[must_use]
    pub fn as_slice(&self) -> &[TodoRecord] {
        &self.records
    }

    /// Iterates over records in display order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoRecord> {
        self.records.iter()
    }

    /// Ids in display order
    pub fn ids(&self) -> impl Iterator<Item = TodoId> + '_ {
        self.records.iter().map(|record| record.id)
    }

    /// Looks up a record by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Checks if a record with `id` exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Number of completed records
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.records.iter().filter(|record| record.completed).count()
    }

    /// Largest id in the collection
    #[must_use]
    pub fn max_id(&self) -> Option<TodoId> {
        self.ids().max()
    }

    /// Copy with the matching record's `completed` flag negated
    ///
    /// Length and order are unchanged. Unknown ids yield an equal copy.
    #[must_use]
    pub fn toggled(&self, id: TodoId) -> Self {
        Self {
            records: self
                .records
                .iter()
                .map(|record| {
                    if record.id == id {
                        record.toggled()
                    } else {
                        record.clone()
                    }
                })
                .collect(),
        }
    }

    /// Copy without the matching record
    ///
    /// Survivors keep their relative order. Unknown ids yield an equal copy.
    #[must_use]
    pub fn without(&self, id: TodoId) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| record.id != id)
                .cloned()
                .collect(),
        }
    }

    /// Copy with an open record appended at the end
    ///
    /// # Errors
    ///
    /// - [`TodoError::EmptyText`] if `text` is blank
    /// - [`TodoError::DuplicateId`] if `id` is already present
    pub fn with_added(&self, id: TodoId, text: &str) -> Result<Self, TodoError> {
        validate_text(text)?;
        if self.contains(id) {
            return Err(TodoError::DuplicateId(id));
        }

        let mut records = self.records.clone();
        records.push(TodoRecord::new(id, text));
        Ok(Self { records })
    }
}

impl TryFrom<Vec<TodoRecord>> for TodoCollection {
    type Error = TodoError;

    fn try_from(records: Vec<TodoRecord>) -> Result<Self, Self::Error> {
        Self::new(records)
    }
}

impl From<TodoCollection> for Vec<TodoRecord> {
    fn from(collection: TodoCollection) -> Self {
        collection.records
    }
}

impl<'a> IntoIterator for &'a TodoCollection {
    type Item = &'a TodoRecord;
    type IntoIter = std::slice::Iter<'a, TodoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Checks that `text` can be the text of a new todo
///
/// # Errors
///
/// [`TodoError::EmptyText`] if `text` is empty or only whitespace
pub fn validate_text(text: &str) -> Result<(), TodoError> {
    if text.trim().is_empty() {
        return Err(TodoError::EmptyText);
    }
    Ok(())
}

/// Returns `collection` with the record matching `id` toggled
///
/// See [`TodoCollection::toggled`].
#[must_use]
pub fn toggle(collection: &TodoCollection, id: TodoId) -> TodoCollection {
    collection.toggled(id)
}

/// Returns `collection` without the record matching `id`
///
/// See [`TodoCollection::without`].
#[must_use]
pub fn delete(collection: &TodoCollection, id: TodoId) -> TodoCollection {
    collection.without(id)
}

/// Returns `collection` with a new open record appended
///
/// # Errors
///
/// See [`TodoCollection::with_added`].
pub fn add(collection: &TodoCollection, id: TodoId, text: &str) -> Result<TodoCollection, TodoError> {
    collection.with_added(id, text)
}
