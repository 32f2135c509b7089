//! File-based storage implementation for native platforms.

use super::{Storage, StorageError, StorageResult};
use crate::document::NoteDocument;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each document as a JSON file in a specified directory.
pub struct FileStorage {
    /// Base directory for document storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/shakyo/documents/`
    /// On Windows: `%LOCALAPPDATA%\shakyo\documents\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("shakyo").join("documents"))
    }

    /// Get the file path for a document ID.
    fn document_path(&self, id: &str) -> PathBuf {
        // Sanitize ID to be safe for filenames
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, document: &NoteDocument) -> StorageResult<()> {
        let path = self.document_path(&document.id);
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        fs::write(&path, json).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    fn load(&self, id: &str) -> StorageResult<NoteDocument> {
        let path = self.document_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let json = fs::read_to_string(&path).map_err(|e| {
            StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        NoteDocument::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.document_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let ids = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.document_path(id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::stroke::{Stroke, StrokeSet};
    use kurbo::Point;
    use tempfile::tempdir;

    fn doc(id: &str) -> NoteDocument {
        NoteDocument::with_id(id, "Test Document", "1-2", &StrokeSet::new())
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let stroke = Stroke::begin(Point::new(3.0, 4.0), HexColor::BLUE, 6.0, false)
            .with_point(Point::new(5.0, 6.0));
        let doc = NoteDocument::with_id(
            "test-doc",
            "Test Document",
            "1-1",
            &StrokeSet::from_strokes(vec![stroke]),
        );

        storage.save(&doc).unwrap();
        let loaded = storage.load("test-doc").unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let result = storage.load("broken");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_list() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save(&doc("doc1")).unwrap();
        storage.save(&doc("doc2")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let list = storage.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&"doc1".to_string()));
        assert!(list.contains(&"doc2".to_string()));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        storage.save(&doc("test")).unwrap();
        assert!(storage.exists("test").unwrap());

        storage.delete("test").unwrap();
        assert!(!storage.exists("test").unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        // ID with special characters should be sanitized
        let doc = doc("test/doc:with*special");
        storage.save(&doc).unwrap();

        // Should still be loadable with the same ID
        let loaded = storage.load("test/doc:with*special").unwrap();
        assert_eq!(loaded.id, doc.id);
    }
}
