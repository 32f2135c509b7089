//! Document storage backends and the persistence adapter.

mod memory;
mod persistence;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;
pub use persistence::{LoadedDocument, NotePersistence};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::document::NoteDocument;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
///
/// Operations are synchronous: browser local storage and the file system
/// both answer within the calling event.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Insert or replace the document stored under `document.id`.
    fn save(&self, document: &NoteDocument) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, id: &str) -> StorageResult<NoteDocument>;

    /// Delete a document. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all document IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;

    /// Remember the group the note list should open on next.
    /// Stores without a note list ignore it.
    fn select_group(&self, _group_id: &str) -> StorageResult<()> {
        Ok(())
    }
}

/// Trait for document storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Insert or replace the document stored under `document.id`.
    fn save(&self, document: &NoteDocument) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, id: &str) -> StorageResult<NoteDocument>;

    /// Delete a document. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all document IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;

    /// Remember the group the note list should open on next.
    /// Stores without a note list ignore it.
    fn select_group(&self, _group_id: &str) -> StorageResult<()> {
        Ok(())
    }
}
