//! Document store implementation using PostgreSQL.
//!
//! Each collection is a table of `(id, seq, doc)`: `doc` holds the JSONB body
//! and `seq` preserves insertion order for full scans.

use super::{DocumentStore, StoreError, StoreResult, StoredDocument};
use crate::domain::record::RecordId;
use crate::domain::schema::Document;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::str::FromStr;

/// A document store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
    host: String,
}

impl PostgresDocumentStore {
    /// Connects to `database` on the server addressed by `url`.
    ///
    /// The database named in `url` (if any) is replaced by `database`, so one
    /// server URL can back every resource.
    pub async fn connect(url: &str, database: &str, max_connections: u32) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(url)?.database(database);
        let host = format!("{}:{}", options.get_host(), options.get_port());
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(Self { pool, host })
    }
}

/// Collection names are interpolated into SQL, so only plain identifiers pass.
pub fn validate_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn table(collection: &str) -> StoreResult<&str> {
    if validate_ident(collection) {
        Ok(collection)
    } else {
        Err(StoreError::InvalidCollection(collection.to_string()))
    }
}

fn decode_row(row: &PgRow) -> StoreResult<StoredDocument> {
    let id: String = row.try_get("id")?;
    let doc: JsonValue = row.try_get("doc")?;
    match doc {
        JsonValue::Object(body) => Ok(StoredDocument {
            id: id.parse()?,
            body,
        }),
        _ => Err(StoreError::CorruptDocument(id)),
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn host(&self) -> String {
        self.host.clone()
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_collection(&self, collection: &str) -> StoreResult<()> {
        let table = table(collection)?;
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                seq BIGSERIAL NOT NULL,
                doc JSONB NOT NULL
            )",
            table
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_one(&self, collection: &str, body: Document) -> StoreResult<RecordId> {
        let table = table(collection)?;
        let id = RecordId::generate();
        sqlx::query(&format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", table))
            .bind(id.to_hex())
            .bind(JsonValue::Object(body))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let table = table(collection)?;
        let rows = sqlx::query(&format!("SELECT id, doc FROM {} ORDER BY seq", table))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(decode_row).collect()
    }

    async fn find_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> StoreResult<Option<StoredDocument>> {
        let table = table(collection)?;
        let row = sqlx::query(&format!("SELECT id, doc FROM {} WHERE id = $1", table))
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_row).transpose()
    }

    async fn update_one(
        &self,
        collection: &str,
        id: &RecordId,
        patch: Document,
    ) -> StoreResult<bool> {
        let table = table(collection)?;
        // `||` replaces top-level keys present in the patch and keeps the rest.
        let result = sqlx::query(&format!("UPDATE {} SET doc = doc || $2 WHERE id = $1", table))
            .bind(id.to_hex())
            .bind(JsonValue::Object(patch))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, collection: &str, id: &RecordId) -> StoreResult<bool> {
        let table = table(collection)?;
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
            .bind(id.to_hex())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_identifiers_are_tables() {
        assert!(validate_ident("books"));
        assert!(validate_ident("_customers2"));
        assert!(!validate_ident("2books"));
        assert!(!validate_ident("books; DROP TABLE x"));
        assert!(!validate_ident(""));
    }
}
