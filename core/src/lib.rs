//! # Composable Todo Core
//!
//! Core traits and types for the composable todo architecture.
//!
//! This crate provides the small set of abstractions every feature is built
//! from: a pure reducer, effect descriptions, and injected dependencies.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state for a feature, owned by a single store
//! - **Action**: All possible inputs to a reducer (commands and events)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Description of follow-up work (never executed by the reducer)
//! - **Environment**: Injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit state threading (no ambient mutable cells)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use composable_todo_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     count: i64,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = CounterState::default();
//! CounterReducer.reduce(&mut state, CounterAction::Increment, &());
//! assert_eq!(state.count, 1);
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed by the store
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Descriptions of follow-up work
///
/// Effects are values, not execution. A reducer returns them and the store
/// interprets them after the reducer has finished with the state.
pub mod effect {
    /// Effect type - describes work to be performed after a reduction
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        Send(Box<Action>),

        /// Run effects one after another, in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Send(action) => f.debug_tuple("Effect::Send").field(action).finish(),
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Feed `action` back into the reducer
        #[must_use]
        pub fn send(action: Action) -> Effect<Action> {
            Effect::Send(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns `true` if running this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Effect::None => true,
                Effect::Send(_) => false,
                Effect::Sequential(effects) => effects.iter().all(Effect::is_none),
            }
        }

        /// Flatten into the actions this effect feeds back, in execution order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            let mut actions = Vec::new();
            self.collect_actions(&mut actions);
            actions
        }

        fn collect_actions(self, out: &mut Vec<Action>) {
            match self {
                Effect::None => {},
                Effect::Send(action) => out.push(*action),
                Effect::Sequential(effects) => {
                    for effect in effects {
                        effect.collect_actions(out);
                    }
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All dependencies a reducer or view needs are abstracted behind traits and
/// injected, so production and test wiring differ only in what is passed in.
pub mod environment {
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Text formatter - a pure `text -> text` transformation applied before display
    ///
    /// Implementations must be total, deterministic, and free of side effects:
    /// formatting the same input twice yields the same output.
    ///
    /// Any `Fn(&str) -> String` closure is a formatter:
    ///
    /// ```
    /// use composable_todo_core::environment::TextFormatter;
    ///
    /// let shout = |text: &str| text.to_uppercase();
    /// assert_eq!(shout.format("learn rust"), "LEARN RUST");
    /// ```
    pub trait TextFormatter: Send + Sync {
        /// Format `text` for display
        fn format(&self, text: &str) -> String;
    }

    impl<F> TextFormatter for F
    where
        F: Fn(&str) -> String + Send + Sync,
    {
        fn format(&self, text: &str) -> String {
            self(text)
        }
    }

    /// Formatter that displays text exactly as stored
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct IdentityFormatter;

    impl TextFormatter for IdentityFormatter {
        fn format(&self, text: &str) -> String {
            text.to_string()
        }
    }

    /// Id generator - mints identifiers that are never handed out twice
    pub trait IdGenerator: Send + Sync {
        /// Return the next unused identifier, or `None` once the id space is used up
        fn next_id(&self) -> Option<u64>;
    }

    /// Monotonic id generator
    ///
    /// Hands out `start, start + 1, ...` up to `u64::MAX - 1`, then `None`
    /// forever. Ids are never reused, even after the record that carried one
    /// has been removed.
    ///
    /// ```
    /// use composable_todo_core::environment::{IdGenerator, SequentialIdGenerator};
    ///
    /// let ids = SequentialIdGenerator::starting_after(2);
    /// assert_eq!(ids.next_id(), Some(3));
    /// assert_eq!(ids.next_id(), Some(4));
    ///
    /// let spent = SequentialIdGenerator::starting_after(u64::MAX);
    /// assert_eq!(spent.next_id(), None);
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `start`
        #[must_use]
        pub const fn new(start: u64) -> Self {
            Self {
                next: AtomicU64::new(start),
            }
        }

        /// Create a generator whose first id is `last + 1`
        ///
        /// With `last >= u64::MAX - 1` the generator starts out exhausted.
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self::new(last.saturating_add(1))
        }

        /// Peek at the id the next call to [`IdGenerator::next_id`] returns
        #[must_use]
        pub fn peek(&self) -> Option<u64> {
            Some(self.next.load(Ordering::Relaxed)).filter(|&id| id != u64::MAX)
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new(1)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Option<u64> {
            // u64::MAX is the exhausted marker and is never handed out
            self.next
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| id.checked_add(1))
                .ok()
        }
    }
}
