//! Render layer: App page, todo list, and todo rows.
//!
//! Rendering is a pure function of the collection, the render options, and
//! the formatter. Rows carry the controls they expose; activating a control
//! invokes the matching callback with the row's own id and nothing else.

use crate::collection::TodoCollection;
use crate::types::{TodoId, TodoRecord};
use composable_todo_core::environment::TextFormatter;
use serde::Serialize;
use std::fmt;

/// Which parts of a todo row are wired up
///
/// The complete row formats its text and offers both controls. The student
/// row shows raw text and only a toggle control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RenderOptions {
    /// Whether rows expose a delete control
    pub supports_delete: bool,
    /// Whether row text goes through the formatter
    pub applies_formatting: bool,
}

impl RenderOptions {
    /// Both controls, formatted text
    #[must_use]
    pub const fn complete() -> Self {
        Self {
            supports_delete: true,
            applies_formatting: true,
        }
    }

    /// Toggle control only, raw text
    #[must_use]
    pub const fn student() -> Self {
        Self {
            supports_delete: false,
            applies_formatting: false,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::complete()
    }
}

/// How a row's text is decorated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Decoration {
    /// Plain text
    None,
    /// Struck-through text, for completed todos
    LineThrough,
}

impl Decoration {
    /// Decoration for a todo with the given completed flag
    #[must_use]
    pub const fn for_completed(completed: bool) -> Self {
        if completed { Self::LineThrough } else { Self::None }
    }
}

/// A control a row can expose
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ControlKind {
    /// Flip the completed flag
    Toggle,
    /// Remove the todo
    Delete,
}

impl ControlKind {
    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Toggle => "Toggle",
            Self::Delete => "Delete",
        }
    }
}

/// Receivers for row interactions
///
/// Each method is called with the id of the row whose control was activated.
pub trait TodoCallbacks {
    /// Error returned by a callback
    type Error;

    /// The toggle control of row `id` was activated
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn on_toggle(&mut self, id: TodoId) -> Result<(), Self::Error>;

    /// The delete control of row `id` was activated
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn on_delete(&mut self, id: TodoId) -> Result<(), Self::Error>;
}

/// One rendered todo
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TodoRow {
    /// Id of the record this row shows
    pub id: TodoId,
    /// Display text
    pub text: String,
    /// Text decoration
    pub decoration: Decoration,
    /// Controls in display order
    pub controls: Vec<ControlKind>,
}

impl TodoRow {
    /// Renders a single record
    #[must_use]
    pub fn render(record: &TodoRecord, options: &RenderOptions, formatter: &dyn TextFormatter) -> Self {
        let text = if options.applies_formatting {
            formatter.format(&record.text)
        } else {
            record.text.clone()
        };

        let mut controls = vec![ControlKind::Toggle];
        if options.supports_delete {
            controls.push(ControlKind::Delete);
        }

        Self {
            id: record.id,
            text,
            decoration: Decoration::for_completed(record.completed),
            controls,
        }
    }

    /// Returns `true` if the row exposes `kind`
    #[must_use]
    pub fn has_control(&self, kind: ControlKind) -> bool {
        self.controls.contains(&kind)
    }

    /// Activates the `kind` control of this row
    ///
    /// Returns `Ok(false)` without calling anything if the row has no such
    /// control.
    ///
    /// # Errors
    ///
    /// Propagates the callback's error.
    pub fn activate<C>(&self, kind: ControlKind, callbacks: &mut C) -> Result<bool, C::Error>
    where
        C: TodoCallbacks + ?Sized,
    {
        if !self.has_control(kind) {
            return Ok(false);
        }

        match kind {
            ControlKind::Toggle => callbacks.on_toggle(self.id)?,
            ControlKind::Delete => callbacks.on_delete(self.id)?,
        }
        Ok(true)
    }
}

impl fmt::Display for TodoRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decoration {
            Decoration::None => write!(f, "{}", self.text)?,
            Decoration::LineThrough => write!(f, "~~{}~~", self.text)?,
        }
        for control in &self.controls {
            write!(f, " [{}]", control.label())?;
        }
        Ok(())
    }
}

/// The todo list component
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoList;

impl TodoList {
    /// One row per record, in collection order
    #[must_use]
    pub fn render(
        todos: &TodoCollection,
        options: &RenderOptions,
        formatter: &dyn TextFormatter,
    ) -> Vec<TodoRow> {
        todos
            .iter()
            .map(|record| TodoRow::render(record, options, formatter))
            .collect()
    }
}

/// A rendered page: header, list, footer
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Page {
    /// Header title
    pub header: String,
    /// List rows
    pub rows: Vec<TodoRow>,
    /// Footer text
    pub footer: String,
}

impl Page {
    /// Renders the whole page
    #[must_use]
    pub fn render(
        title: &str,
        footer: &str,
        todos: &TodoCollection,
        options: &RenderOptions,
        formatter: &dyn TextFormatter,
    ) -> Self {
        Self {
            header: title.to_string(),
            rows: TodoList::render(todos, options, formatter),
            footer: footer.to_string(),
        }
    }

    /// The row showing `id`
    #[must_use]
    pub fn row(&self, id: TodoId) -> Option<&TodoRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.header)?;
        writeln!(f)?;
        if self.rows.is_empty() {
            writeln!(f, "  (nothing to do)")?;
        }
        for row in &self.rows {
            writeln!(f, "  {}. {row}", row.id)?;
        }
        writeln!(f)?;
        write!(f, "-- {}", self.footer)
    }
}
