use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cocoprep operations.
#[derive(Debug, Error)]
pub enum CocoprepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read annotation file {path}: {source}")]
    AnnotationRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    AnnotationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    AnnotationWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Index {index} out of range for dataset of {len} image(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("Invalid balance parameters: {message}")]
    InvalidBalanceParams { message: String },
}

impl CocoprepError {
    /// Returns true if the annotation document could not be loaded.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            CocoprepError::AnnotationRead { .. } | CocoprepError::AnnotationParse { .. }
        )
    }
}
