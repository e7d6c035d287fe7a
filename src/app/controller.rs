//! Resource controller: the five CRUD operations.
//!
//! Each operation takes request-shaped input (raw identifier text, loose JSON)
//! and returns an [`Outcome`]. Errors from validation and storage are folded
//! into the outcome here and never propagate further.

use crate::app::repository::{RepositoryError, ResourceRepository};
use crate::domain::model::ResourceModel;
use crate::domain::outcome::Outcome;
use crate::domain::record::RecordId;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless between requests; cheap to clone.
#[derive(Clone)]
pub struct ResourceController {
    repo: ResourceRepository,
}

fn failure<T>(e: RepositoryError) -> Outcome<T> {
    match e {
        RepositoryError::Validation(v) => Outcome::ValidationError(v.to_string()),
        RepositoryError::Store(s) => Outcome::StorageError(s.to_string()),
    }
}

impl ResourceController {
    pub fn new(repo: ResourceRepository) -> Self {
        Self { repo }
    }

    pub fn model(&self) -> &Arc<dyn ResourceModel> {
        self.repo.model()
    }

    pub fn repository(&self) -> &ResourceRepository {
        &self.repo
    }

    /// A malformed identifier cannot name a stored record.
    fn parse_id(&self, raw: &str) -> Option<RecordId> {
        match raw.parse() {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(resource = self.model().resource_name(), id = raw, "Unparseable id: {}", e);
                None
            }
        }
    }

    pub async fn create(&self, payload: &JsonValue) -> Outcome<RecordId> {
        match self.repo.create(payload).await {
            Ok(id) => {
                debug!(resource = self.model().resource_name(), %id, "Record created");
                Outcome::Ok(id)
            }
            Err(e) => {
                warn!(resource = self.model().resource_name(), "Create failed: {}", e);
                failure(e)
            }
        }
    }

    pub async fn get_all(&self) -> Outcome<Vec<JsonValue>> {
        match self.repo.find_all().await {
            Ok(docs) => Outcome::Ok(docs.iter().map(|d| d.to_json()).collect()),
            Err(e) => {
                warn!(resource = self.model().resource_name(), "List failed: {}", e);
                Outcome::StorageError(e.to_string())
            }
        }
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Outcome<JsonValue> {
        let Some(id) = self.parse_id(raw_id) else {
            return Outcome::NotFound;
        };
        match self.repo.find_by_id(&id).await {
            Ok(Some(doc)) => Outcome::Ok(doc.to_json()),
            Ok(None) => Outcome::NotFound,
            Err(e) => {
                warn!(resource = self.model().resource_name(), %id, "Lookup failed: {}", e);
                Outcome::StorageError(e.to_string())
            }
        }
    }

    /// Partial merge: fields absent from `payload` keep their stored values.
    pub async fn update(&self, raw_id: &str, payload: &JsonValue) -> Outcome<()> {
        let Some(id) = self.parse_id(raw_id) else {
            return Outcome::NotFound;
        };
        match self.repo.find_by_id(&id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Outcome::NotFound,
            Err(e) => {
                warn!(resource = self.model().resource_name(), %id, "Lookup failed: {}", e);
                return Outcome::StorageError(e.to_string());
            }
        }
        match self.repo.update(&id, payload).await {
            Ok(true) => Outcome::Ok(()),
            // Removed between the lookup and the write.
            Ok(false) => Outcome::NotFound,
            Err(e) => {
                warn!(resource = self.model().resource_name(), %id, "Update failed: {}", e);
                failure(e)
            }
        }
    }

    pub async fn remove(&self, raw_id: &str) -> Outcome<()> {
        let Some(id) = self.parse_id(raw_id) else {
            return Outcome::NotFound;
        };
        match self.repo.find_by_id(&id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Outcome::NotFound,
            Err(e) => {
                warn!(resource = self.model().resource_name(), %id, "Lookup failed: {}", e);
                return Outcome::StorageError(e.to_string());
            }
        }
        match self.repo.delete(&id).await {
            Ok(true) => Outcome::Ok(()),
            Ok(false) => Outcome::NotFound,
            Err(e) => {
                warn!(resource = self.model().resource_name(), %id, "Delete failed: {}", e);
                Outcome::StorageError(e.to_string())
            }
        }
    }
}
