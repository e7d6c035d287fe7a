//! Schema-bound collection over a document store.

use crate::domain::model::ResourceModel;
use crate::domain::record::RecordId;
use crate::domain::schema::{validate_create, validate_update, ValidationError};
use crate::storage::{DocumentStore, StoreError, StoredDocument};
use serde_json::Value as JsonValue;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Owns every persisted record of one resource.
///
/// `store` is `None` when the startup connection failed; every operation then
/// reports [`StoreError::Unavailable`].
#[derive(Clone)]
pub struct ResourceRepository {
    model: Arc<dyn ResourceModel>,
    store: Option<Arc<dyn DocumentStore>>,
}

impl ResourceRepository {
    pub fn new(model: Arc<dyn ResourceModel>, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { model, store }
    }

    pub fn model(&self) -> &Arc<dyn ResourceModel> {
        &self.model
    }

    fn store(&self) -> Result<&Arc<dyn DocumentStore>, StoreError> {
        self.store.as_ref().ok_or(StoreError::Unavailable)
    }

    fn collection(&self) -> &str {
        self.model.collection()
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store()?.ping().await
    }

    /// Validates `payload` against the schema and inserts it.
    pub async fn create(&self, payload: &JsonValue) -> Result<RecordId, RepositoryError> {
        let store = self.store()?;
        let doc = validate_create(self.model.as_ref(), payload)?;
        Ok(store.insert_one(self.collection(), doc).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<StoredDocument>, StoreError> {
        self.store()?.find_all(self.collection()).await
    }

    pub async fn find_by_id(&self, id: &RecordId) -> Result<Option<StoredDocument>, StoreError> {
        self.store()?.find_by_id(self.collection(), id).await
    }

    /// Merges the validated fields of `payload` into the record.
    ///
    /// Returns false if the record does not exist.
    pub async fn update(&self, id: &RecordId, payload: &JsonValue) -> Result<bool, RepositoryError> {
        let store = self.store()?;
        let patch = validate_update(self.model.as_ref(), payload)?;
        if patch.is_empty() {
            return Ok(store.find_by_id(self.collection(), id).await?.is_some());
        }
        Ok(store.update_one(self.collection(), id, patch).await?)
    }

    /// Returns false if the record does not exist.
    pub async fn delete(&self, id: &RecordId) -> Result<bool, StoreError> {
        self.store()?.delete_one(self.collection(), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BookModel;
    use crate::storage::InMemoryDocumentStore;
    use serde_json::json;

    fn repo() -> ResourceRepository {
        ResourceRepository::new(
            Arc::new(BookModel),
            Some(Arc::new(InMemoryDocumentStore::new())),
        )
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_store() {
        let repo = repo();
        let err = repo.create(&json!({ "title": "Only title" })).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Validation(_)));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_patch_still_reports_existence() {
        let repo = repo();
        let id = repo
            .create(&json!({ "title": "Dune", "author": "Herbert" }))
            .await
            .unwrap();
        assert!(repo.update(&id, &json!({ "unknown": 1 })).await.unwrap());
        assert!(!repo.update(&RecordId::generate(), &json!({})).await.unwrap());
    }

    #[tokio::test]
    async fn missing_store_is_a_storage_error() {
        let repo = ResourceRepository::new(Arc::new(BookModel), None);
        assert!(matches!(repo.find_all().await, Err(StoreError::Unavailable)));
        assert!(matches!(
            repo.create(&json!({ "title": "A", "author": "B" })).await,
            Err(RepositoryError::Store(StoreError::Unavailable))
        ));
    }
}
