//! Persistence adapter: one connection attempt per resource at startup.
//!
//! A failed attempt is logged and the service keeps running without a store;
//! requests then fail individually with a storage error. There is no retry
//! and no reconnect.

use crate::domain::model::ResourceModel;
use crate::infra::config;
use crate::storage::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore, StoreError};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("unsupported database URL scheme in {0:?} (expected postgres:// or memory://)")]
    UnsupportedScheme(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Opens the store named by `url` for `model` and prepares its collection.
pub async fn open_store(
    url: &str,
    database: &str,
    max_connections: u32,
    model: &dyn ResourceModel,
) -> Result<Arc<dyn DocumentStore>, ConnectError> {
    let store: Arc<dyn DocumentStore> = if url.starts_with("memory:") {
        Arc::new(InMemoryDocumentStore::new())
    } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Arc::new(PostgresDocumentStore::connect(url, database, max_connections).await?)
    } else {
        return Err(ConnectError::UnsupportedScheme(url.to_string()));
    };
    store.ensure_collection(model.collection()).await?;
    Ok(store)
}

/// Connects using the environment configuration, logging the result.
///
/// Returns `None` when the connection could not be established.
pub async fn connect(model: &dyn ResourceModel) -> Option<Arc<dyn DocumentStore>> {
    let url = config::database_url();
    let database = config::database_name(model);
    let max_connections = match config::max_connections() {
        Ok(n) => n,
        Err(e) => {
            error!("Invalid database configuration: {:#}", e);
            return None;
        }
    };

    match open_store(&url, &database, max_connections, model).await {
        Ok(store) => {
            info!(
                resource = model.resource_name(),
                database = %database,
                "Connected to document store at {}",
                store.host()
            );
            Some(store)
        }
        Err(e) => {
            error!(
                resource = model.resource_name(),
                database = %database,
                "Document store connection failed: {}",
                e
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::BookModel;

    #[tokio::test]
    async fn memory_scheme_opens_an_empty_store() {
        let store = open_store("memory://", "books_db", 1, &BookModel).await.unwrap();
        assert_eq!(store.host(), "memory");
        assert!(store.find_all("books").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let err = open_store("mysql://localhost", "books_db", 1, &BookModel)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ConnectError::UnsupportedScheme(_)));
    }
}
