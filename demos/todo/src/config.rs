//! Application configuration.
//!
//! Defaults describe the complete app titled "My Todo App". Each field can be
//! overridden from the environment:
//!
//! | variable | field | values |
//! |---|---|---|
//! | `TODO_APP_TITLE` | `title` | any non-blank text |
//! | `TODO_APP_FOOTER` | `footer` | any text |
//! | `TODO_APP_VARIANT` | `variant` | `complete`, `student` |
//! | `TODO_APP_MAX_FEEDBACK_DEPTH` | `store.max_feedback_depth` | integer |
//!
//! # Example
//!
//! ```no_run
//! use todo_app::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! println!("Title: {}", config.title);
//! # Ok(())
//! # }
//! ```

use crate::view::RenderOptions;
use composable_todo_runtime::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown row variant name
    #[error("Invalid variant: {0} (expected `complete` or `student`)")]
    InvalidVariant(String),

    /// Title is blank
    #[error("Configuration validation failed: title cannot be empty")]
    EmptyTitle,

    /// A numeric setting did not parse
    #[error("Failed to parse {key}: {value}")]
    InvalidNumber {
        /// Environment variable name
        key: &'static str,
        /// Offending value
        value: String,
    },
}

/// Which todo row the app renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Rows with formatting and both controls
    #[default]
    Complete,
    /// Rows without the delete control or formatting
    Student,
}

impl Variant {
    /// Parse a variant name
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVariant`] for unknown names.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "complete" => Ok(Self::Complete),
            "student" => Ok(Self::Student),
            _ => Err(ConfigError::InvalidVariant(s.to_string())),
        }
    }

    /// Render options for this variant
    #[must_use]
    pub const fn render_options(self) -> RenderOptions {
        match self {
            Self::Complete => RenderOptions::complete(),
            Self::Student => RenderOptions::student(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Student => write!(f, "student"),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Page title shown in the header
    pub title: String,
    /// Static footer text
    pub footer: String,
    /// Row variant
    pub variant: Variant,
    /// Store runtime settings
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "My Todo App".to_string(),
            footer: "Toggle to mark done, delete to remove.".to_string(),
            variant: Variant::Complete,
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load defaults overridden by `TODO_APP_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load defaults overridden by whatever `lookup` returns for each key
    ///
    /// # Errors
    ///
    /// Returns error if a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(title) = lookup("TODO_APP_TITLE") {
            config.title = title;
        }
        if let Some(footer) = lookup("TODO_APP_FOOTER") {
            config.footer = footer;
        }
        if let Some(variant) = lookup("TODO_APP_VARIANT") {
            config.variant = Variant::parse(&variant)?;
        }
        if let Some(depth) = lookup("TODO_APP_MAX_FEEDBACK_DEPTH") {
            let depth = depth
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "TODO_APP_MAX_FEEDBACK_DEPTH",
                    value: depth.clone(),
                })?;
            config.store = config.store.with_max_feedback_depth(depth);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the footer
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    /// Set the variant
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the store configuration
    #[must_use]
    pub const fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    /// Render options for the configured variant
    #[must_use]
    pub const fn render_options(&self) -> RenderOptions {
        self.variant.render_options()
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyTitle`] if the title is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(())
    }
}
