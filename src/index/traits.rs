//! Search index seam definitions

use crate::model::EntityKind;
use thiserror::Error;

/// Errors that can occur during index submission
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Index rejected submission: {0}")]
    Rejected(String),
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// One entity prepared for submission, in the two serialized
/// representations the engine consumes.
#[derive(Debug, Clone)]
pub struct IndexDocument {
    /// Index key, unique across the store: `<id>-<year>` under the kind.
    pub key: String,
    pub kind: EntityKind,
    pub year: i32,
    /// Markup representation
    pub markup: String,
    /// Structured-document representation
    pub structured: serde_json::Value,
}

/// The external full-text search engine
pub trait SearchIndex {
    fn submit(&self, documents: &[IndexDocument]) -> IndexResult<()>;
}
