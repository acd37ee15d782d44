//! Reports produced by the grader: chunk summary, similarity preview, and
//! the per-chunk feedback with the final project score.

use crate::error::GradeError;
use crate::retrieve::ReferenceIndex;
use crate::rubric::{self, MAX_SCORE};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Characters of a student chunk shown in the feedback report
pub const FEEDBACK_PREVIEW: usize = 500;

/// Characters of the closest reference chunk shown in the feedback report
pub const REFERENCE_PREVIEW: usize = 300;

/// Characters of each match shown in the similarity report
pub const MATCH_PREVIEW: usize = 500;

const RULE: &str = "==============================";

/// File and chunk counts for both code bases
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChunkSummary {
    /// Reference files loaded
    pub instructor_files: usize,
    /// Student files loaded
    pub student_files: usize,
    /// Reference chunks
    pub instructor_chunks: usize,
    /// Student chunks
    pub student_chunks: usize,
}

impl fmt::Display for ChunkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loaded {} instructor files.", self.instructor_files)?;
        writeln!(f, "Loaded {} student files.", self.student_files)?;
        writeln!(f, "Instructor chunks: {}", self.instructor_chunks)?;
        writeln!(f, "Student chunks: {}", self.student_chunks)
    }
}

/// Closest reference chunks for each of the first student chunks
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimilarityReport {
    /// One entry per previewed student chunk
    pub entries: Vec<SimilarityEntry>,
}

/// A student chunk and its nearest reference chunks
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimilarityEntry {
    /// Student chunk text
    pub chunk: String,
    /// Previews of the nearest reference chunks, closest first
    pub matches: Vec<String>,
}

impl SimilarityReport {
    /// Looks up the `per_chunk` nearest references for the first `limit` chunks
    #[must_use]
    pub fn build(student_chunks: &[String], references: &ReferenceIndex, limit: usize, per_chunk: usize) -> Self {
        let entries = student_chunks
            .iter()
            .take(limit)
            .map(|chunk| SimilarityEntry {
                chunk: chunk.clone(),
                matches: references
                    .nearest(chunk, per_chunk)
                    .into_iter()
                    .map(|m| preview(m.chunk, MATCH_PREVIEW))
                    .collect(),
            })
            .collect();
        Self { entries }
    }
}

impl fmt::Display for SimilarityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            writeln!(f, "{RULE}")?;
            writeln!(f, "🔎 Student Chunk #{}", index + 1)?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "{}\n", entry.chunk)?;
            writeln!(f, "📌 Closest Instructor Chunks:")?;
            for (rank, text) in entry.matches.iter().enumerate() {
                writeln!(f, "\n--- Match #{} ---", rank + 1)?;
                writeln!(f, "{text}")?;
            }
            writeln!(f, "\n")?;
        }
        Ok(())
    }
}

/// Rubric feedback for one student chunk
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChunkFeedback {
    /// Opening characters of the chunk
    pub preview: String,
    /// Rubric score for the chunk
    pub score: u32,
    /// Missed criteria, empty when every criterion was met
    pub feedback: Vec<&'static str>,
    /// Opening characters of the closest reference chunk, if any
    pub closest_reference: Option<String>,
}

/// Feedback for every student chunk plus the project score
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    /// Per-chunk feedback in chunk order
    pub chunks: Vec<ChunkFeedback>,
    /// Mean chunk score, `None` when there was nothing to grade
    pub final_score: Option<u32>,
}

impl GradeReport {
    /// Scores every student chunk and pairs it with its closest reference
    #[must_use]
    pub fn build(student_chunks: &[String], references: &ReferenceIndex) -> Self {
        let chunks: Vec<ChunkFeedback> = student_chunks
            .iter()
            .map(|chunk| {
                let scored = rubric::evaluate_chunk(chunk);
                ChunkFeedback {
                    preview: preview(chunk, FEEDBACK_PREVIEW),
                    score: scored.score,
                    feedback: scored.feedback,
                    closest_reference: references
                        .nearest(chunk, 1)
                        .first()
                        .map(|m| preview(m.chunk, REFERENCE_PREVIEW)),
                }
            })
            .collect();

        let scores: Vec<u32> = chunks.iter().map(|c| c.score).collect();
        let final_score = rubric::final_score(&scores);
        tracing::info!(chunks = chunks.len(), ?final_score, "Graded student code");

        Self { chunks, final_score }
    }
}

impl fmt::Display for GradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Student Project Feedback =====\n")?;

        for (index, chunk) in self.chunks.iter().enumerate() {
            writeln!(f, "{RULE}")?;
            writeln!(f, "🔎 Student Chunk #{}", index + 1)?;
            writeln!(f, "{RULE}")?;
            writeln!(f, "{}\n", chunk.preview)?;

            writeln!(f, "📌 Score for this chunk: {}", chunk.score)?;
            writeln!(f, "📌 Feedback:")?;
            if chunk.feedback.is_empty() {
                writeln!(f, "- Excellent work!")?;
            }
            for item in &chunk.feedback {
                writeln!(f, "- {item}")?;
            }

            writeln!(f, "\n📌 Closest Instructor Chunk (preview):")?;
            if let Some(reference) = &chunk.closest_reference {
                writeln!(f, "{reference}")?;
            }
            writeln!(f, "\n")?;
        }

        writeln!(f, "{RULE}")?;
        match self.final_score {
            Some(score) => writeln!(f, "🏆 Final Project Score: {score}/{MAX_SCORE}")?,
            None => writeln!(f, "🏆 Final Project Score: n/a (no student code)")?,
        }
        writeln!(f, "{RULE}")
    }
}

/// Writes a rendered report to `path`
///
/// # Errors
///
/// [`GradeError::Write`] if the file cannot be written.
pub fn write_report(path: &Path, report: &impl fmt::Display) -> Result<(), GradeError> {
    std::fs::write(path, report.to_string()).map_err(|source| GradeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Report written");
    Ok(())
}

/// The first `limit` characters of `text`
fn preview(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
