//! Todo list built on the composable todo architecture.
//!
//! The whole application state is one ordered collection of todo records.
//! It changes only by whole-collection replacement through two pure
//! transformations (toggle and delete) plus append, and the render layer
//! turns the current collection into rows whose controls call back into the
//! store.
//!
//! - [`collection`]: the collection and its pure transformations
//! - [`reducer`]: commands and events applied to [`TodoState`]
//! - [`view`]: page, list, and row rendering with complete and student rows
//! - [`app`]: store, view, and config wired together
//!
//! # Quick Start
//!
//! ```
//! use composable_todo_core::environment::IdentityFormatter;
//! use todo_app::{AppConfig, ControlKind, TodoApp, TodoId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = TodoApp::new(AppConfig::default(), Box::new(IdentityFormatter));
//!
//! app.click(TodoId::new(1), ControlKind::Toggle)?;
//! app.click(TodoId::new(2), ControlKind::Delete)?;
//!
//! let state = app.state();
//! assert_eq!(state.count(), 1);
//! assert_eq!(state.completed_count(), 1);
//! println!("{}", app.render());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod collection;
pub mod command;
pub mod config;
pub mod error;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use app::{ClickOutcome, TodoApp, TodoStore};
pub use collection::{TodoCollection, add, delete, toggle, validate_text};
pub use config::{AppConfig, ConfigError, Variant};
pub use error::TodoError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoRecord, TodoState};
pub use view::{ControlKind, Decoration, Page, RenderOptions, TodoCallbacks, TodoList, TodoRow};
