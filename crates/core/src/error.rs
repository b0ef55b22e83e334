use std::path::PathBuf;

use thiserror::Error;

use crate::model::FileKind;

/// Errors raised while loading files and computing entropy.
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The input path does not name a regular file.
    #[error("Input file not found at {0}")]
    NotFound(PathBuf),
    /// Reading the input failed part way.
    #[error("Failed to read input {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Offset, length or window does not fit the buffer. Never clamped.
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    /// An internal guarantee failed, such as an aggregate yielding more than
    /// one window. Indicates a bug rather than bad input.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
    /// No resolver handles this kind; callers fall back to whole-file analysis.
    #[error("No region resolver registered for {0}")]
    UnsupportedRegionAnalysis(FileKind),
    /// A resolver could not parse the structure it claims to handle.
    #[error("Region resolver '{resolver}' failed: {message}")]
    Resolver { resolver: &'static str, message: String },
}

impl EntropyError {
    /// True when region analysis is simply unavailable for the file kind.
    ///
    /// Callers fall back to whole-file analysis in that case.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, EntropyError::UnsupportedRegionAnalysis(_))
    }
}
