//! Error types for the grader.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading code or writing reports
///
/// Individual files that cannot be read are skipped with a warning, not
/// reported here.
#[derive(Error, Debug)]
pub enum GradeError {
    /// The code root does not exist or is not a directory
    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Chunk settings that cannot make progress
    #[error("chunk overlap {overlap} must be smaller than chunk size {size}")]
    InvalidChunking {
        /// Maximum chunk length in characters
        size: usize,
        /// Characters carried over between chunks
        overlap: usize,
    },

    /// A report could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
