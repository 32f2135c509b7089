//! Load and save a session's strokes and title through a document store.

use super::{Storage, StorageError, StorageResult};
use crate::config::CanvasConfig;
use crate::document::NoteDocument;
use crate::stroke::StrokeSet;
use std::sync::Arc;

/// What a session starts from when editing a stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub title: String,
    pub strokes: StrokeSet,
    /// Group the record is filed under, if it was found.
    pub group_id: Option<String>,
}

/// Bridges a drawing session and a [`Storage`] backend.
///
/// Loading never fails: unknown ids and unreadable records yield an empty
/// document with the configured default title.
pub struct NotePersistence<S: Storage> {
    storage: Arc<S>,
    default_title: String,
    default_group_id: String,
}

impl<S: Storage> NotePersistence<S> {
    pub fn new(storage: Arc<S>, config: &CanvasConfig) -> Self {
        Self {
            storage,
            default_title: config.default_title.clone(),
            default_group_id: config.default_group_id.clone(),
        }
    }

    /// The underlying store.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// An empty document with the default title.
    pub fn empty_document(&self) -> LoadedDocument {
        LoadedDocument {
            title: self.default_title.clone(),
            strokes: StrokeSet::new(),
            group_id: None,
        }
    }

    /// Load the title and strokes stored under `id`.
    pub fn load_document(&self, id: &str) -> LoadedDocument {
        match self.storage.load(id) {
            Ok(document) => {
                let strokes = document.stroke_set();
                log::info!("Loaded document {} ({} strokes)", id, strokes.len());
                LoadedDocument {
                    title: document.title,
                    strokes,
                    group_id: Some(document.group_id),
                }
            }
            Err(StorageError::NotFound(_)) => {
                log::warn!("Document {} not found, starting empty", id);
                self.empty_document()
            }
            Err(e) => {
                log::warn!("Failed to load document {}: {}, starting empty", id, e);
                self.empty_document()
            }
        }
    }

    /// Save `strokes` and `title`, returning the id the record is stored under.
    ///
    /// With `id`, an existing record is updated in place and keeps its
    /// creation time and group; a missing one is created under that id.
    /// Without `id`, a new record is created in `group_id` or the default group.
    pub fn save_document(
        &self,
        id: Option<&str>,
        title: &str,
        strokes: &StrokeSet,
        group_id: Option<&str>,
    ) -> StorageResult<String> {
        let group = group_id.unwrap_or(&self.default_group_id);
        let document = match id {
            Some(id) => match self.storage.load(id) {
                Ok(mut existing) => {
                    existing.update(title, strokes);
                    existing
                }
                Err(StorageError::NotFound(_)) => NoteDocument::with_id(id, title, group, strokes),
                Err(e) => {
                    log::warn!("Replacing unreadable document {}: {}", id, e);
                    NoteDocument::with_id(id, title, group, strokes)
                }
            },
            None => NoteDocument::new(title, group, strokes),
        };

        self.storage.save(&document)?;
        log::info!(
            "Saved document {} ({} strokes)",
            document.id,
            document.stroke_count
        );
        Ok(document.id)
    }
}
