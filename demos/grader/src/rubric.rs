//! Keyword rubric scoring for code chunks.
//!
//! Each criterion looks for marker keywords in a chunk. A chunk earns the
//! criterion's points when the markers are present and otherwise collects
//! the criterion's feedback line. The points add up to [`MAX_SCORE`].

use serde::Serialize;

/// Best possible score for a chunk or a project
pub const MAX_SCORE: u32 = 100;

/// How a criterion's markers must appear in a chunk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Markers {
    /// At least one marker is present
    AnyOf(&'static [&'static str]),
    /// Every marker is present
    AllOf(&'static [&'static str]),
}

impl Markers {
    /// Whether `chunk` satisfies these markers
    #[must_use]
    pub fn found_in(&self, chunk: &str) -> bool {
        match self {
            Self::AnyOf(markers) => markers.iter().any(|m| chunk.contains(m)),
            Self::AllOf(markers) => markers.iter().all(|m| chunk.contains(m)),
        }
    }
}

/// One rubric line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// Rubric label
    pub name: &'static str,
    /// Points awarded when the markers are found
    pub points: u32,
    /// Keywords looked for
    pub markers: Markers,
    /// Feedback when the markers are missing
    pub missing: &'static str,
}

/// The todo-app rubric, in the order feedback is reported
pub const RUBRIC: [Criterion; 5] = [
    Criterion {
        name: "App component implemented",
        points: 25,
        markers: Markers::AnyOf(&["function App", "const App"]),
        missing: "Missing App component.",
    },
    Criterion {
        name: "Header/Footer implemented",
        points: 20,
        markers: Markers::AllOf(&["Header", "Footer"]),
        missing: "Header or Footer not used properly.",
    },
    Criterion {
        name: "TodoList functionality",
        points: 30,
        markers: Markers::AnyOf(&["TodoList"]),
        missing: "TodoList functionality missing.",
    },
    Criterion {
        name: "PropTypes and helpers",
        points: 15,
        markers: Markers::AnyOf(&["PropTypes", "formatMessage"]),
        missing: "PropTypes or helper functions missing.",
    },
    Criterion {
        name: "Code style / exports",
        points: 10,
        markers: Markers::AnyOf(&["export"]),
        missing: "Missing export statement.",
    },
];

/// Score and feedback for one chunk
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChunkScore {
    /// Points earned, out of [`MAX_SCORE`]
    pub score: u32,
    /// Feedback for every criterion that was missed, in rubric order
    pub feedback: Vec<&'static str>,
}

impl ChunkScore {
    /// Whether every criterion was met
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.feedback.is_empty()
    }
}

/// Scores `chunk` against [`RUBRIC`]
#[must_use]
pub fn evaluate_chunk(chunk: &str) -> ChunkScore {
    RUBRIC
        .iter()
        .fold(ChunkScore::default(), |mut result, criterion| {
            if criterion.markers.found_in(chunk) {
                result.score += criterion.points;
            } else {
                result.feedback.push(criterion.missing);
            }
            result
        })
}

/// Project score: the mean of the chunk scores, rounded down
///
/// `None` when there are no chunks to average.
#[must_use]
pub fn final_score(scores: &[u32]) -> Option<u32> {
    let count = u64::try_from(scores.len()).ok().filter(|&n| n > 0)?;
    let sum: u64 = scores.iter().copied().map(u64::from).sum();
    u32::try_from(sum / count).ok()
}
