//! Domain model definitions for CRUD resources.

use std::sync::Arc;

pub mod books;
pub mod customers;

pub use books::BookModel;
pub use customers::CustomerModel;

/// Scalar type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Number => "Number",
        }
    }
}

/// One declared attribute of a resource schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Column header shown by the page client.
    pub label: &'static str,
    /// Appended to the rendered cell value (e.g. " pages").
    pub suffix: Option<&'static str>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            label,
            suffix: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            label,
            suffix: None,
        }
    }

    pub const fn with_suffix(self, suffix: &'static str) -> Self {
        Self {
            suffix: Some(suffix),
            ..self
        }
    }
}

/// Contract every CRUD resource fulfils.
///
/// The repository, controller, router and page client are all written against
/// this trait, so a resource is nothing more than its naming and its schema.
pub trait ResourceModel: Send + Sync {
    /// Path segment the HTTP surface is mounted under (e.g. `books`).
    fn resource_name(&self) -> &str;

    /// Human-facing model name used in validation messages (e.g. `Book`).
    fn model_name(&self) -> &str;

    /// Singular noun used in controller messages (e.g. `book`).
    fn singular(&self) -> &str;

    /// Fixed name of the database this resource lives in.
    fn default_database(&self) -> &str;

    /// Port the service listens on unless configured otherwise.
    fn default_port(&self) -> u16;

    /// Collection (table) holding the documents.
    fn collection(&self) -> &str {
        self.resource_name()
    }

    /// Declared fields in display order.
    fn fields(&self) -> &[FieldSpec];

    fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    fn created_message(&self) -> String {
        format!("New {} created successfully", self.singular())
    }

    fn not_found_message(&self) -> String {
        format!("No {} found", self.singular())
    }

    fn not_found_by_id_message(&self) -> String {
        format!("No {} found with that id", self.singular())
    }

    fn updated_message(&self) -> String {
        "Updated successfully".to_string()
    }

    fn deleted_message(&self) -> String {
        "Deleted successfully".to_string()
    }
}

/// Resolves a resource by its path segment.
pub fn resource_by_name(name: &str) -> Option<Arc<dyn ResourceModel>> {
    match name.trim().to_lowercase().as_str() {
        "books" | "book" => Some(Arc::new(BookModel)),
        "customers" | "customer" => Some(Arc::new(CustomerModel)),
        _ => None,
    }
}
