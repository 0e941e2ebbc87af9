//! Merge-write document store over a local directory tree

use crate::model::{Entity, Identity};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// File-backed store keyed by entity identity
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open a store rooted at the given directory. The directory does not
    /// need to exist yet; year/kind subdirectories are created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an entity under its identity.
    ///
    /// With `merge` set and a document already stored at that identity, the
    /// existing document is loaded and the incoming entity is folded into it
    /// variant-specifically; otherwise the incoming entity is written as-is
    /// (first write, or an explicit replace from a repair pass).
    ///
    /// A stored document that no longer deserializes is logged and discarded,
    /// and the incoming entity becomes the new canonical state.
    ///
    /// Returns the final (merged or replacing) entity so the caller can hand
    /// it to the index synchronizer.
    pub fn persist(&self, entity: Entity, merge: bool) -> StoreResult<Entity> {
        let identity = entity.identity();
        let path = identity.store_path(&self.root);

        let entity = if merge && path.exists() {
            match read_document(&path) {
                Ok(existing) => existing.merge(entity),
                Err(err) => {
                    warn!(identity = %identity, error = %err, "stored document unreadable, replacing with incoming update");
                    entity
                }
            }
        } else {
            entity
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &entity)?;
        Ok(entity)
    }

    /// Load the entity stored under an identity, or `None` if absent.
    pub fn load(&self, identity: &Identity) -> StoreResult<Option<Entity>> {
        self.load_at(&identity.store_path(&self.root))
    }

    /// Load the entity stored at an explicit path, or `None` if absent.
    pub fn load_at(&self, path: &Path) -> StoreResult<Option<Entity>> {
        if !path.exists() {
            return Ok(None);
        }
        read_document(path).map(Some)
    }

    /// Remove the document stored under an identity. Returns whether a
    /// document existed to remove.
    pub fn delete(&self, identity: &Identity) -> StoreResult<bool> {
        let path = identity.store_path(&self.root);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

fn read_document(path: &Path) -> StoreResult<Entity> {
    let file = fs::File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
