//! Document store abstraction.
//!
//! A store holds named collections of JSON documents keyed by [`RecordId`].
//! Each operation touches exactly one document (or scans one collection), so
//! per-document atomicity is all a backend has to provide.

use crate::domain::record::{IdError, RecordId, ID_FIELD};
use crate::domain::schema::Document;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database connection unavailable")]
    Unavailable,

    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("stored identifier is corrupt: {0}")]
    CorruptId(#[from] IdError),

    #[error("stored document is not an object (id {0})")]
    CorruptDocument(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A document as read back from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: RecordId,
    pub body: Document,
}

impl StoredDocument {
    /// Wire shape: the body with the identifier under `_id`.
    pub fn to_json(&self) -> JsonValue {
        let mut obj = self.body.clone();
        obj.insert(ID_FIELD.to_string(), JsonValue::from(self.id.to_hex()));
        JsonValue::Object(obj)
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Host the store is connected to, for logging.
    fn host(&self) -> String;

    /// Round-trips to the backend.
    async fn ping(&self) -> StoreResult<()>;

    /// Creates the collection if it does not exist yet.
    async fn ensure_collection(&self, collection: &str) -> StoreResult<()>;

    /// Inserts a document and returns its newly assigned identifier.
    async fn insert_one(&self, collection: &str, body: Document) -> StoreResult<RecordId>;

    /// Every document in natural (insertion) order.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    async fn find_by_id(&self, collection: &str, id: &RecordId)
        -> StoreResult<Option<StoredDocument>>;

    /// Merges `patch` into the stored body. Returns false if no document matched.
    async fn update_one(&self, collection: &str, id: &RecordId, patch: Document)
        -> StoreResult<bool>;

    /// Returns false if no document matched.
    async fn delete_one(&self, collection: &str, id: &RecordId) -> StoreResult<bool>;
}
