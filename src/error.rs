use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for detection operations
pub type Result<T> = std::result::Result<T, DetectError>;

/// Error kinds for the detection pipeline.
///
/// Reference and configuration failures are fatal for a whole batch;
/// candidate-level failures are recoverable and skip one item.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Blank template could not be loaded or decoded
    #[error("failed to load reference image {path}: {source}")]
    ReferenceLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A filled sheet could not be loaded or decoded
    #[error("failed to load candidate image {path}: {source}")]
    CandidateLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Configuration parameter outside its valid range
    #[error("invalid configuration: {parameter} = {value}")]
    InvalidConfig {
        parameter: &'static str,
        value: String,
    },

    /// Two images that must match in size do not
    #[error("image dimensions differ: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Re-encoding a normalized image failed
    #[error("failed to encode image: {0}")]
    ImageEncode(#[source] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetectError {
    /// Whether the batch may skip the current candidate and continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DetectError::CandidateLoad { .. }
                | DetectError::ImageEncode(_)
                | DetectError::Json(_)
                | DetectError::Io(_)
        )
    }
}
