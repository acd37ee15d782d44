//! Property tests for the chunker.

use code_grader::Chunker;
use proptest::prelude::*;

fn code_like() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            4 => "[a-zA-Z]{1,12}",
            2 => Just(" ".to_string()),
            2 => Just("\n".to_string()),
            1 => Just("\n\n".to_string()),
            1 => "[{}();=<>/]",
        ],
        0..400,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn chunks_are_bounded_trimmed_slices(text in code_like(), size in 8usize..120, overlap_ratio in 0usize..100) {
        let overlap = size * overlap_ratio / 100;
        let chunker = Chunker::new(size, overlap).unwrap();

        for chunk in chunker.split(&text) {
            prop_assert!(chunk.chars().count() <= size);
            prop_assert!(!chunk.is_empty());
            prop_assert_eq!(chunk.trim(), chunk.as_str());
            prop_assert!(text.contains(&chunk));
        }
    }

    #[test]
    fn short_words_land_whole_in_some_chunk(text in code_like()) {
        let chunks = Chunker::default().split(&text);

        // Longer runs may be cut at character level
        for word in text.split_whitespace().filter(|w| w.chars().count() < 200) {
            prop_assert!(chunks.iter().any(|c| c.contains(word)));
        }
    }
}
