//! # Composable Todo Runtime
//!
//! Runtime implementation for the composable todo architecture.
//!
//! This crate provides the [`Store`](store::Store) that owns a feature's state
//! and coordinates reducer execution with effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state value and runs the reducer
//! - **Effect Executor**: Interprets effect descriptions and feeds actions back
//! - **Event Loop**: The action → reducer → effects → action feedback loop,
//!   run to completion inside a single `send` call
//!
//! The store is single-threaded and synchronous: `send` takes `&mut self`, so
//! exactly one reduction runs at a time and no locking is involved.
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use composable_todo_core::reducer::Reducer;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept feeding actions back past the configured depth
        ///
        /// State changes made before the limit was hit are kept.
        #[error("Feedback loop exceeded {limit} levels of fed-back actions")]
        FeedbackLimitExceeded {
            /// The configured maximum feedback depth
            limit: usize,
        },
    }
}

pub use error::StoreError;
pub use store::Store;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use composable_todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_depth(4);
/// assert_eq!(config.max_feedback_depth, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many generations of fed-back actions one `send` may produce
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_feedback_depth: usize) -> Self {
        Self { max_feedback_depth }
    }

    /// Set the maximum feedback depth
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_depth: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Reducer, StoreConfig, StoreError};
    use std::collections::VecDeque;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned outright, never shared)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with a custom configuration
        #[must_use]
        pub const fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                config,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer, then every action fed back by the returned
        /// effects, until no effects remain. Actions are processed in the
        /// order they were produced.
        ///
        /// Returns the number of actions reduced, including `action` itself.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] if effects keep
        /// producing actions beyond [`StoreConfig::max_feedback_depth`]
        /// generations. The remaining queued actions are dropped.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> Result<usize, StoreError> {
            let mut queue = VecDeque::from([(action, 0usize)]);
            let mut processed = 0;

            while let Some((action, depth)) = queue.pop_front() {
                tracing::debug!(?action, depth, "Processing action");
                metrics::counter!("store.actions.total").increment(1);

                let effects = self
                    .reducer
                    .reduce(&mut self.state, action, &self.environment);
                processed += 1;

                let fed_back: Vec<A> = effects
                    .into_iter()
                    .flat_map(composable_todo_core::effect::Effect::into_actions)
                    .collect();
                if fed_back.is_empty() {
                    continue;
                }

                if depth >= self.config.max_feedback_depth {
                    tracing::warn!(
                        limit = self.config.max_feedback_depth,
                        dropped = fed_back.len() + queue.len(),
                        "Feedback limit reached, dropping queued actions"
                    );
                    metrics::counter!("store.feedback.limit_exceeded").increment(1);
                    return Err(StoreError::FeedbackLimitExceeded {
                        limit: self.config.max_feedback_depth,
                    });
                }

                tracing::trace!(count = fed_back.len(), "Queueing fed-back actions");
                metrics::counter!("store.feedback.actions").increment(fed_back.len() as u64);
                queue.extend(fed_back.into_iter().map(|next| (next, depth + 1)));
            }

            tracing::debug!(processed, "Action processing completed");
            Ok(processed)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// The injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Consume the store, returning its final state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }
}
