//! Browser local-storage backend for WASM.
//!
//! All documents live in one JSON array under the `documents` key, the
//! layout the note list in the page reads and writes.

use super::{Storage, StorageError, StorageResult};
use crate::document::NoteDocument;
use serde_json::Value;

/// Key of the document array in `window.localStorage`.
pub const DOCUMENTS_KEY: &str = "documents";

/// Key the note list reads to reopen on a group.
pub const SELECTED_GROUP_KEY: &str = "selectedGroupId";

/// Document store backed by `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
    key: String,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))?;

        Ok(Self {
            storage,
            key: DOCUMENTS_KEY.to_string(),
        })
    }

    /// Raw entries of the document array. A missing key is an empty array.
    fn read_entries(&self) -> StorageResult<Vec<Value>> {
        let raw = self
            .storage
            .get_item(&self.key)
            .map_err(|e| StorageError::Other(format!("Failed to read {}: {:?}", self.key, e)))?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StorageError::Serialization(format!("Corrupt {}: {}", self.key, e))),
            None => Ok(Vec::new()),
        }
    }

    fn write_entries(&self, entries: &[Value]) -> StorageResult<()> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage
            .set_item(&self.key, &json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", self.key, e)))
    }

    /// Documents that parse; corrupt entries are logged and skipped.
    fn documents(&self) -> StorageResult<Vec<NoteDocument>> {
        let documents = self
            .read_entries()?
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<NoteDocument>(entry) {
                Ok(document) => Some(document),
                Err(e) => {
                    log::warn!("Skipping corrupt document entry: {}", e);
                    None
                }
            })
            .collect();
        Ok(documents)
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

impl Storage for LocalStorage {
    fn save(&self, document: &NoteDocument) -> StorageResult<()> {
        // Other entries are written back as read, parseable or not.
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            log::warn!("Resetting unreadable document list: {}", e);
            Vec::new()
        });
        let value = serde_json::to_value(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        match entries
            .iter_mut()
            .find(|entry| entry_id(entry) == Some(document.id.as_str()))
        {
            Some(slot) => *slot = value,
            None => entries.push(value),
        }
        self.write_entries(&entries)
    }

    fn load(&self, id: &str) -> StorageResult<NoteDocument> {
        let entry = self
            .read_entries()?
            .into_iter()
            .find(|entry| entry_id(entry) == Some(id))
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        serde_json::from_value(entry)
            .map_err(|e| StorageError::Serialization(format!("Corrupt document {}: {}", id, e)))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|entry| entry_id(entry) != Some(id));
        if entries.len() != before {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.documents()?.into_iter().map(|d| d.id).collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self
            .read_entries()?
            .iter()
            .any(|entry| entry_id(entry) == Some(id)))
    }

    fn select_group(&self, group_id: &str) -> StorageResult<()> {
        self.storage
            .set_item(SELECTED_GROUP_KEY, group_id)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", SELECTED_GROUP_KEY, e)))
    }
}
