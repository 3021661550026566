use std::path::PathBuf;

use kg_core::KgError;

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;

/// Errors raised while reading room files, plans, or writing exports.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// A file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file is not valid JSON or does not match the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well formed but is not a room file.
    #[error("invalid room format: {0}")]
    InvalidFormat(String),

    /// The world graph rejected an operation.
    #[error(transparent)]
    World(#[from] KgError),

    /// A planned room could not be read or placed.
    #[error("room #{index} ({}): {source}", .file.display())]
    Plan {
        /// Position of the room in the plan.
        index: usize,
        /// Room file named by the plan.
        file: PathBuf,
        /// What went wrong.
        source: Box<IoError>,
    },
}
