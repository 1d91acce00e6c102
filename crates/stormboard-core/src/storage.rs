//! Document persistence backends.
//!
//! The document's `elements`/`connections`/`metadata` shape is the stable
//! serialization contract; format versioning and migration are out of scope.

use crate::document::{Document, DocumentError};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid document: {0}")]
    Invalid(#[from] DocumentError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
///
/// The engine is synchronous end to end, so storage is too; an async host
/// wraps calls at its own boundary.
pub trait Storage {
    /// Save a document.
    fn save(&self, id: &str, document: &Document) -> StorageResult<()>;

    /// Load a document.
    fn load(&self, id: &str) -> StorageResult<Document>;

    /// Delete a document.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all document IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a document exists.
    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.list()?.iter().any(|existing| existing == id))
    }
}

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &Document) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        docs.insert(id.to_string(), document.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Document> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        docs.get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut docs = self
            .documents
            .write()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        docs.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        Ok(docs.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let docs = self
            .documents
            .read()
            .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
        Ok(docs.contains_key(id))
    }
}

/// File-based storage, one JSON file per document under a base directory.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileStorage {
    base_path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the directory
    /// if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the platform's default data directory.
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("could not determine home directory".to_string()))?;
        Self::new(base.join("stormboard").join("documents"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn document_path(&self, id: &str) -> PathBuf {
        // Sanitize the id so it is safe as a filename.
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{safe_id}.json"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Storage for FileStorage {
    fn save(&self, id: &str, document: &Document) -> StorageResult<()> {
        let path = self.document_path(id);
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("failed to write {}: {e}", path.display())))
    }

    fn load(&self, id: &str) -> StorageResult<Document> {
        let path = self.document_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("failed to read {}: {e}", path.display())))?;
        let document = Document::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("failed to parse {}: {e}", path.display()))
        })?;
        document.validate()?;
        log::debug!("loaded document '{}' from {}", id, path.display());
        Ok(document)
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.document_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }
        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("failed to read directory: {e}")))?;
        let mut ids = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.document_path(id).exists())
    }
}
