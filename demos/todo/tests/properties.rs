//! Property tests for the collection transformations and the render layer.

use composable_todo_testing::MarkingFormatter;
use composable_todo_testing::properties::{absent_id, display_text, unique_ids};
use proptest::prelude::*;
use todo_app::{RenderOptions, TodoCollection, TodoId, TodoList, TodoRecord, delete, toggle};

/// Collections of up to 12 records with distinct ids and arbitrary flags
fn collections() -> impl Strategy<Value = TodoCollection> {
    unique_ids(12)
        .prop_flat_map(|ids| {
            let len = ids.len();
            (
                Just(ids),
                proptest::collection::vec("[a-z]{1,8}", len),
                proptest::collection::vec(any::<bool>(), len),
            )
        })
        .prop_map(|(ids, texts, flags)| {
            let records = ids
                .into_iter()
                .zip(texts)
                .zip(flags)
                .map(|((id, text), completed)| TodoRecord {
                    id: TodoId::new(id),
                    text,
                    completed,
                })
                .collect();
            TodoCollection::new(records).unwrap()
        })
}

/// A non-empty collection plus the index of one of its records
fn collection_with_member() -> impl Strategy<Value = (TodoCollection, usize)> {
    collections()
        .prop_filter("needs at least one record", |c| !c.is_empty())
        .prop_flat_map(|c| {
            let len = c.len();
            (Just(c), 0..len)
        })
}

fn raw_ids(collection: &TodoCollection) -> Vec<u64> {
    collection.ids().map(TodoId::get).collect()
}

proptest! {
    #[test]
    fn toggle_present_flips_exactly_one((c, index) in collection_with_member()) {
        let id = c.as_slice()[index].id;
        let next = toggle(&c, id);

        prop_assert_eq!(next.len(), c.len());
        prop_assert_eq!(raw_ids(&next), raw_ids(&c));
        for (before, after) in c.iter().zip(next.iter()) {
            if before.id == id {
                prop_assert_eq!(after.completed, !before.completed);
                prop_assert_eq!(&after.text, &before.text);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn absent_id_is_noop(c in collections(), hint in any::<u64>()) {
        let id = TodoId::new(absent_id(&raw_ids(&c), hint).unwrap());

        prop_assert_eq!(&toggle(&c, id), &c);
        prop_assert_eq!(&delete(&c, id), &c);
    }

    #[test]
    fn delete_present_removes_exactly_one((c, index) in collection_with_member()) {
        let id = c.as_slice()[index].id;
        let next = delete(&c, id);

        prop_assert_eq!(next.len(), c.len() - 1);
        prop_assert!(!next.contains(id));

        let expected: Vec<&TodoRecord> = c.iter().filter(|r| r.id != id).collect();
        let actual: Vec<&TodoRecord> = next.iter().collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn double_toggle_is_identity(c in collections(), raw in 1u64..1000) {
        let id = TodoId::new(raw);
        prop_assert_eq!(toggle(&toggle(&c, id), id), c);
    }

    #[test]
    fn transformations_leave_input_untouched((c, index) in collection_with_member()) {
        let snapshot = c.clone();
        let id = c.as_slice()[index].id;

        let _ = toggle(&c, id);
        let _ = delete(&c, id);

        prop_assert_eq!(c, snapshot);
    }

    #[test]
    fn add_appends_with_fresh_id(c in collections(), text in display_text(), hint in any::<u64>()) {
        let id = TodoId::new(absent_id(&raw_ids(&c), hint).unwrap());

        match c.with_added(id, &text) {
            Ok(next) => {
                prop_assert!(!text.trim().is_empty());
                prop_assert_eq!(next.len(), c.len() + 1);
                prop_assert_eq!(&next.as_slice()[..c.len()], c.as_slice());
                prop_assert_eq!(next.as_slice().last(), Some(&TodoRecord::new(id, text.clone())));
            },
            Err(_) => prop_assert!(text.trim().is_empty()),
        }
    }

    #[test]
    fn rendering_is_pure(c in collections(), delete_control in any::<bool>(), formatting in any::<bool>()) {
        let options = RenderOptions {
            supports_delete: delete_control,
            applies_formatting: formatting,
        };

        let first = TodoList::render(&c, &options, &MarkingFormatter);
        let second = TodoList::render(&c, &options, &MarkingFormatter);
        prop_assert_eq!(&first, &second);

        prop_assert_eq!(first.len(), c.len());
        for (row, record) in first.iter().zip(c.iter()) {
            prop_assert_eq!(row.id, record.id);
            prop_assert_eq!(row.controls.len(), if delete_control { 2 } else { 1 });
        }
    }
}
