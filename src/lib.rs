pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::controller::ResourceController;
pub use app::repository::ResourceRepository;
pub use domain::model::{resource_by_name, BookModel, CustomerModel, ResourceModel};
pub use domain::outcome::Outcome;
pub use domain::record::RecordId;
pub use storage::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};
