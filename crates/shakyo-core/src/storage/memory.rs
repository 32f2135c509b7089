//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::document::NoteDocument;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, NoteDocument>>,
    selected_group: RwLock<Option<String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group last passed to [`Storage::select_group`].
    pub fn selected_group(&self) -> Option<String> {
        self.selected_group.read().ok().and_then(|group| group.clone())
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, document: &NoteDocument) -> StorageResult<()> {
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.insert(document.id.clone(), document.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<NoteDocument> {
        let docs = self.documents.read().map_err(lock_error)?;
        docs.get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut docs = self.documents.write().map_err(lock_error)?;
        docs.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self.documents.read().map_err(lock_error)?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let docs = self.documents.read().map_err(lock_error)?;
        Ok(docs.contains_key(id))
    }

    fn select_group(&self, group_id: &str) -> StorageResult<()> {
        *self.selected_group.write().map_err(lock_error)? = Some(group_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::StrokeSet;

    fn doc(id: &str) -> NoteDocument {
        NoteDocument::with_id(id, "Test", "1-2", &StrokeSet::new())
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let doc = doc("test");

        storage.save(&doc).unwrap();
        let loaded = storage.load("test").unwrap();

        assert_eq!(doc, loaded);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.load("nonexistent");

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();

        assert!(!storage.exists("test").unwrap());
        storage.save(&doc("test")).unwrap();
        assert!(storage.exists("test").unwrap());
    }

    #[test]
    fn test_delete() {
        let storage = MemoryStorage::new();

        storage.save(&doc("test")).unwrap();
        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
        storage.delete("test").unwrap();
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();

        storage.save(&doc("doc1")).unwrap();
        storage.save(&doc("doc2")).unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }

    #[test]
    fn test_select_group() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.selected_group(), None);

        storage.select_group("2-1").unwrap();
        storage.select_group("4-2").unwrap();
        assert_eq!(storage.selected_group().as_deref(), Some("4-2"));
    }
}
