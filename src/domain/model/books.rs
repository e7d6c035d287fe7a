use super::{FieldKind, FieldSpec, ResourceModel};

const BOOK_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("title", FieldKind::String, "Title"),
    FieldSpec::required("author", FieldKind::String, "Author"),
    FieldSpec::optional("numberPages", FieldKind::Number, "Pages").with_suffix(" pages"),
    FieldSpec::optional("publisher", FieldKind::String, "Publisher"),
];

/// Implementation of ResourceModel for the Books resource.
pub struct BookModel;

impl ResourceModel for BookModel {
    fn resource_name(&self) -> &str {
        "books"
    }

    fn model_name(&self) -> &str {
        "Book"
    }

    fn singular(&self) -> &str {
        "book"
    }

    fn default_database(&self) -> &str {
        "books_db"
    }

    fn default_port(&self) -> u16 {
        8000
    }

    fn fields(&self) -> &[FieldSpec] {
        BOOK_FIELDS
    }
}
