//! # Composable Todo Testing
//!
//! Testing utilities and helpers for the composable todo architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Property-based testing strategies
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use composable_todo_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(test_environment())
//!     .given_state(TodoState::seeded())
//!     .when_action(TodoAction::ToggleTodo { id: TodoId::new(1) })
//!     .then_state(|state| assert_eq!(state.completed_count(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use composable_todo_core::environment::{SequentialIdGenerator, TextFormatter};


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{SequentialIdGenerator, TextFormatter};

    /// Formatter that visibly wraps text, so tests can tell whether formatting ran
    ///
    /// ```
    /// use composable_todo_testing::mocks::MarkingFormatter;
    /// use composable_todo_core::environment::TextFormatter;
    ///
    /// assert_eq!(MarkingFormatter.format("Learn React"), "«Learn React»");
    /// ```
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct MarkingFormatter;

    impl TextFormatter for MarkingFormatter {
        fn format(&self, text: &str) -> String {
            format!("«{text}»")
        }
    }

    /// Id generator for tests, starting well clear of any seed ids (at 100)
    #[must_use]
    pub const fn test_ids() -> SequentialIdGenerator {
        SequentialIdGenerator::new(100)
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Honours `RUST_LOG`; defaults to `debug`. Safe to call from every test,
    /// only the first call installs anything.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use proptest::collection::btree_set;
    use proptest::prelude::*;

    /// Up to `max_len` pairwise-distinct ids in `1..1000`, in shuffled order
    pub fn unique_ids(max_len: usize) -> impl Strategy<Value = Vec<u64>> {
        btree_set(1u64..1000, 0..=max_len)
            .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
            .prop_shuffle()
    }

    /// Short display text, including the occasional blank string
    pub fn display_text() -> impl Strategy<Value = String> {
        prop_oneof![
            4 => "[A-Za-z][A-Za-z ]{0,20}",
            1 => Just(String::new()),
            1 => " {1,3}",
        ]
    }

    /// An id in `1..1000` that is not in `taken`
    ///
    /// Returns `None` only when every candidate is taken, which the
    /// strategies above never produce.
    #[must_use]
    pub fn absent_id(taken: &[u64], hint: u64) -> Option<u64> {
        (0..1000u64)
            .map(|offset| 1 + (hint % 999 + offset) % 999)
            .find(|id| !taken.contains(id))
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{MarkingFormatter, test_ids};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use composable_todo_core::environment::IdGenerator;
    use proptest::prelude::*;

    #[test]
    fn test_marking_formatter_is_deterministic() {
        assert_eq!(MarkingFormatter.format("a"), MarkingFormatter.format("a"));
        assert_eq!(MarkingFormatter.format(""), "«»");
    }

    #[test]
    fn test_ids_start_at_one_hundred() {
        let ids = test_ids();
        assert_eq!(ids.next_id(), Some(100));
        assert_eq!(ids.next_id(), Some(101));
    }

    #[test]
    fn test_absent_id_skips_taken() {
        assert_eq!(properties::absent_id(&[1, 2, 3], 0), Some(4));
        assert_eq!(properties::absent_id(&[], 41), Some(42));
    }

    #[test]
    fn test_tracing_init_twice() {
        init_test_tracing();
        init_test_tracing();
    }

    proptest! {
        #[test]
        fn unique_ids_are_distinct(ids in properties::unique_ids(16)) {
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), ids.len());
        }
    }
}
