//! Process-local document store.

use super::{DocumentStore, StoreResult, StoredDocument};
use crate::domain::record::RecordId;
use crate::domain::schema::Document;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Collections kept in insertion order behind a single lock.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn host(&self) -> String {
        "memory".to_string()
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn ensure_collection(&self, collection: &str) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default();
        Ok(())
    }

    async fn insert_one(&self, collection: &str, body: Document) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, body });
        Ok(id)
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> StoreResult<Option<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| &d.id == id))
            .cloned())
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &RecordId,
        patch: Document,
    ) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| &d.id == id))
        else {
            return Ok(false);
        };
        for (k, v) in patch {
            doc.body.insert(k, v);
        }
        Ok(true)
    }

    async fn delete_one(&self, collection: &str, id: &RecordId) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| &d.id != id);
        Ok(docs.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(v: serde_json::Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn keeps_insertion_order_per_collection() {
        let store = InMemoryDocumentStore::new();
        let a = store.insert_one("books", body(json!({"title": "A"}))).await.unwrap();
        let b = store.insert_one("books", body(json!({"title": "B"}))).await.unwrap();
        store.insert_one("customers", body(json!({"email": "x"}))).await.unwrap();

        let ids: Vec<_> = store.find_all("books").await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(store.find_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_top_level_keys() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .insert_one("books", body(json!({"title": "A", "author": "Z"})))
            .await
            .unwrap();

        assert!(store.update_one("books", &id, body(json!({"title": "B"}))).await.unwrap());
        let doc = store.find_by_id("books", &id).await.unwrap().unwrap();
        assert_eq!(doc.body, body(json!({"title": "B", "author": "Z"})));
        assert_eq!(doc.to_json()["_id"], json!(id.to_hex()));
    }

    #[tokio::test]
    async fn missing_ids_report_no_match() {
        let store = InMemoryDocumentStore::new();
        let ghost = RecordId::generate();
        assert!(store.find_by_id("books", &ghost).await.unwrap().is_none());
        assert!(!store.update_one("books", &ghost, Document::new()).await.unwrap());
        assert!(!store.delete_one("books", &ghost).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_exactly_once() {
        let store = InMemoryDocumentStore::new();
        let id = store.insert_one("books", body(json!({"title": "A"}))).await.unwrap();
        assert!(store.delete_one("books", &id).await.unwrap());
        assert!(!store.delete_one("books", &id).await.unwrap());
    }
}
