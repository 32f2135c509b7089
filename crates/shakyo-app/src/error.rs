//! Application errors.

use shakyo_core::canvas::CanvasError;
use shakyo_core::storage::StorageError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Script step {index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: CanvasError,
    },
}

pub type AppResult<T> = Result<T, AppError>;
