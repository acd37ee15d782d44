//! Rubric grader for student todo-app projects.
//!
//! Loads the JavaScript sources of an instructor reference and a student
//! project, splits both into overlapping chunks, and scores every student
//! chunk against a keyword rubric. Each scored chunk is shown next to the
//! most similar reference chunk, and the project score is the mean of the
//! chunk scores.
//!
//! - [`loader`]: source discovery with ignored directories and files
//! - [`chunker`]: recursive chunking with overlap
//! - [`rubric`]: criteria, chunk scoring, and the project score
//! - [`retrieve`]: nearest reference chunks
//! - [`report`]: summary, similarity, and feedback reports
//!
//! # Quick Start
//!
//! ```no_run
//! use code_grader::Grader;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), code_grader::GradeError> {
//! let grader = Grader::load(Path::new("./instructor_code"), Path::new("./student_code"))?;
//! let report = grader.grade();
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod chunker;
pub mod error;
pub mod loader;
pub mod report;
pub mod retrieve;
pub mod rubric;

use std::path::Path;

pub use chunker::Chunker;
pub use error::GradeError;
pub use loader::CodeBase;
pub use report::{ChunkSummary, GradeReport, SimilarityReport, write_report};
pub use retrieve::ReferenceIndex;
pub use rubric::{ChunkScore, RUBRIC, evaluate_chunk, final_score};

/// Both code bases, chunked and ready to compare
#[derive(Clone, Debug)]
pub struct Grader {
    instructor: CodeBase,
    student: CodeBase,
    student_chunks: Vec<String>,
    references: ReferenceIndex,
}

impl Grader {
    /// Loads both code bases with the default chunk settings
    ///
    /// # Errors
    ///
    /// [`GradeError::MissingDirectory`] if either root is missing.
    pub fn load(instructor_root: &Path, student_root: &Path) -> Result<Self, GradeError> {
        Self::load_with(instructor_root, student_root, Chunker::default())
    }

    /// Loads both code bases and chunks them with `chunker`
    ///
    /// # Errors
    ///
    /// [`GradeError::MissingDirectory`] if either root is missing.
    pub fn load_with(instructor_root: &Path, student_root: &Path, chunker: Chunker) -> Result<Self, GradeError> {
        let instructor = CodeBase::load(instructor_root)?;
        let student = CodeBase::load(student_root)?;
        Ok(Self::new(instructor, student, chunker))
    }

    /// Chunks already loaded code bases
    #[must_use]
    pub fn new(instructor: CodeBase, student: CodeBase, chunker: Chunker) -> Self {
        if instructor.is_empty() {
            tracing::warn!("No instructor code found, reports will have no reference chunks");
        }

        let references = ReferenceIndex::new(chunker.split(&instructor.joined()));
        let student_chunks = chunker.split(&student.joined());
        tracing::debug!(
            instructor_chunks = references.len(),
            student_chunks = student_chunks.len(),
            size = chunker.size(),
            overlap = chunker.overlap(),
            "Chunked code"
        );

        Self {
            instructor,
            student,
            student_chunks,
            references,
        }
    }

    /// Student chunks in order
    #[must_use]
    pub fn student_chunks(&self) -> &[String] {
        &self.student_chunks
    }

    /// File and chunk counts
    #[must_use]
    pub fn summary(&self) -> ChunkSummary {
        ChunkSummary {
            instructor_files: self.instructor.len(),
            student_files: self.student.len(),
            instructor_chunks: self.references.len(),
            student_chunks: self.student_chunks.len(),
        }
    }

    /// Nearest references for the first `limit` student chunks
    #[must_use]
    pub fn compare(&self, limit: usize, per_chunk: usize) -> SimilarityReport {
        SimilarityReport::build(&self.student_chunks, &self.references, limit, per_chunk)
    }

    /// Rubric feedback for every student chunk
    #[must_use]
    pub fn grade(&self) -> GradeReport {
        GradeReport::build(&self.student_chunks, &self.references)
    }
}
