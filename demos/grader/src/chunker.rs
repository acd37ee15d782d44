//! Recursive character chunking with overlap.
//!
//! Text is split on the coarsest separator it contains (blank line, line,
//! space, then single characters), the separator staying at the start of
//! the piece that follows it. Pieces shorter than the chunk size are packed
//! greedily into chunks; when a chunk is emitted, pieces are dropped from
//! its front until at most `overlap` characters remain to open the next
//! one. Pieces that are too long are split again with the finer
//! separators. Lengths are counted in characters.

use crate::error::GradeError;
use std::collections::VecDeque;

/// Default chunk length in characters
pub const DEFAULT_CHUNK_SIZE: usize = 300;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Separators tried in order, coarsest first
const SEPARATORS: &[&str] = &["\n\n", "\n", " ", ""];

/// Splits text into overlapping chunks of bounded length
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunker {
    size: usize,
    overlap: usize,
}

impl Chunker {
    /// Creates a chunker
    ///
    /// # Errors
    ///
    /// [`GradeError::InvalidChunking`] unless `0 <= overlap < size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self, GradeError> {
        if overlap >= size {
            return Err(GradeError::InvalidChunking { size, overlap });
        }
        Ok(Self { size, overlap })
    }

    /// Maximum chunk length
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Overlap between consecutive chunks
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }

    /// Splits `text` into chunks
    ///
    /// Every chunk is trimmed, non-empty, at most [`Chunker::size`]
    /// characters long, and a contiguous slice of `text`.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        self.split_with(text, SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let (separator, finer) = pick_separator(text, separators);

        let mut chunks = Vec::new();
        let mut small: Vec<&str> = Vec::new();

        for piece in split_keeping_separator(text, separator) {
            if char_len(piece) < self.size {
                small.push(piece);
                continue;
            }

            if !small.is_empty() {
                chunks.extend(self.merge(&small));
                small.clear();
            }

            if finer.is_empty() {
                chunks.push(piece.to_string());
            } else {
                chunks.extend(self.split_with(piece, finer));
            }
        }

        if !small.is_empty() {
            chunks.extend(self.merge(&small));
        }
        chunks
    }

    /// Packs consecutive pieces into chunks, carrying the overlap forward
    fn merge(&self, pieces: &[&str]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            let len = char_len(piece);

            if total + len > self.size && !window.is_empty() {
                chunks.extend(join_trimmed(&window));

                while total > self.overlap || (total > 0 && total + len > self.size) {
                    let Some(dropped) = window.pop_front() else {
                        break;
                    };
                    total -= char_len(dropped);
                }
            }

            window.push_back(piece);
            total += len;
        }

        chunks.extend(join_trimmed(&window));
        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// First separator present in `text` plus the finer ones after it
///
/// The empty separator always matches and has nothing finer.
fn pick_separator<'a, 's>(text: &str, separators: &'a [&'s str]) -> (&'s str, &'a [&'s str]) {
    for (index, &separator) in separators.iter().enumerate() {
        if separator.is_empty() {
            return ("", &[]);
        }
        if text.contains(separator) {
            return (separator, &separators[index + 1..]);
        }
    }
    (separators.last().copied().unwrap_or(""), &[])
}

/// Splits before every occurrence of `separator`, dropping empty pieces
///
/// The empty separator splits into single characters.
fn split_keeping_separator<'t>(text: &'t str, separator: &str) -> Vec<&'t str> {
    let starts: Vec<usize> = if separator.is_empty() {
        text.char_indices().map(|(index, _)| index).collect()
    } else {
        text.match_indices(separator).map(|(index, _)| index).collect()
    };

    let mut pieces = Vec::with_capacity(starts.len() + 1);
    let mut from = 0;
    for start in starts {
        pieces.push(&text[from..start]);
        from = start;
    }
    pieces.push(&text[from..]);

    pieces.retain(|piece| !piece.is_empty());
    pieces
}

fn join_trimmed(window: &VecDeque<&str>) -> Option<String> {
    let joined: String = window.iter().copied().collect();
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        let chunker = Chunker::default();
        assert_eq!(chunker.split("  const App = () => null;\n"), vec!["const App = () => null;"]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(Chunker::default().split("").is_empty());
        assert!(Chunker::default().split(" \n\n \n").is_empty());
    }

    #[test]
    fn words_overlap_between_chunks() {
        let chunker = Chunker::new(10, 5).unwrap();
        assert_eq!(
            chunker.split("one two three four"),
            vec!["one two", "two three", "four"]
        );
    }

    #[test]
    fn next_chunk_opens_with_previous_tail() {
        // 39 characters per line, 40 with the newline that precedes it
        let lines: Vec<String> = (0..20).map(|i| format!("line {i:02} {}", "x".repeat(31))).collect();
        let text = lines.join("\n");

        let chunks = Chunker::default().split(&text);

        assert!(chunks.len() > 1);
        assert_eq!(chunks[0], lines[..7].join("\n"));
        assert!(chunks[1].starts_with(&lines[6]));
        for chunk in &chunks {
            assert!(chunk.chars().count() <= DEFAULT_CHUNK_SIZE);
        }
    }

    #[test]
    fn long_words_fall_back_to_characters() {
        let chunker = Chunker::new(4, 1).unwrap();
        assert_eq!(chunker.split("abcdefghij"), vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn separator_stays_with_following_piece() {
        assert_eq!(split_keeping_separator("a\nb\nc", "\n"), vec!["a", "\nb", "\nc"]);
        assert_eq!(split_keeping_separator("\nb", "\n"), vec!["\nb"]);
        assert_eq!(split_keeping_separator("añb", ""), vec!["a", "ñ", "b"]);
    }

    #[test]
    fn coarsest_separator_wins() {
        assert_eq!(pick_separator("a\n\nb\nc", SEPARATORS).0, "\n\n");
        assert_eq!(pick_separator("a b\nc", SEPARATORS), ("\n", &SEPARATORS[2..]));
        assert_eq!(pick_separator("abc", SEPARATORS), ("", &[][..]));
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        assert!(matches!(
            Chunker::new(50, 50),
            Err(GradeError::InvalidChunking { size: 50, overlap: 50 })
        ));
        assert!(Chunker::new(0, 0).is_err());
        assert_eq!(Chunker::new(300, 50).unwrap(), Chunker::default());
    }
}
