//! View state of the page: mode, form inputs and rendered rows.

use crate::client::render::RenderedRow;
use crate::domain::model::{FieldKind, ResourceModel};
use crate::domain::schema::parse_number;
use crate::transport::http::types::RecordDocument;
use serde_json::Value as JsonValue;

/// Whether submitting the form inserts or updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(String),
}

/// Raw text inputs, one per declared field, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: Vec<(&'static str, String)>,
}

impl FormState {
    pub fn empty(model: &dyn ResourceModel) -> Self {
        Self {
            values: model
                .fields()
                .iter()
                .map(|f| (f.name, String::new()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, v)| v.as_str())
    }

    /// Returns false if `field` is not part of the form.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for (_, v) in &mut self.values {
            v.clear();
        }
    }

    /// Copies a record into the inputs; absent or null fields become empty.
    pub fn fill_from(&mut self, record: &RecordDocument) {
        for (name, slot) in &mut self.values {
            *slot = match record.fields.get(*name) {
                None | Some(JsonValue::Null) => String::new(),
                Some(JsonValue::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
        }
    }

    /// Request body for create/update.
    ///
    /// Empty inputs are omitted, except required text fields which are sent
    /// as-is so the server reports them. Number inputs that do not parse are
    /// sent as text for the same reason.
    pub fn to_payload(&self, model: &dyn ResourceModel) -> JsonValue {
        let mut out = serde_json::Map::new();
        for (name, raw) in &self.values {
            let Some(spec) = model.field(name) else {
                continue;
            };
            let value = match spec.kind {
                FieldKind::String if raw.is_empty() && !spec.required => continue,
                FieldKind::String => JsonValue::from(raw.as_str()),
                FieldKind::Number if raw.trim().is_empty() => continue,
                FieldKind::Number => {
                    parse_number(raw.trim()).unwrap_or_else(|| JsonValue::from(raw.as_str()))
                }
            };
            out.insert(name.to_string(), value);
        }
        JsonValue::Object(out)
    }
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub mode: Mode,
    pub form: FormState,
    pub rows: Vec<RenderedRow>,
    submit_create: String,
}

impl ViewState {
    pub fn new(model: &dyn ResourceModel) -> Self {
        Self {
            mode: Mode::Create,
            form: FormState::empty(model),
            rows: Vec::new(),
            submit_create: format!("Save {}", model.singular()),
        }
    }

    /// Loads `record` into the form and switches to edit mode.
    pub fn begin_edit(&mut self, record: &RecordDocument) {
        self.form.fill_from(record);
        self.mode = Mode::Edit(record.id.clone());
    }

    /// Back to create mode with an empty form.
    pub fn reset(&mut self) {
        self.form.clear();
        self.mode = Mode::Create;
    }

    pub fn submit_label(&self) -> &str {
        match self.mode {
            Mode::Create => self.submit_create.as_str(),
            Mode::Edit(_) => "Save changes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookModel, CustomerModel};
    use serde_json::json;

    fn record(v: JsonValue) -> RecordDocument {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn begin_edit_and_reset_switch_modes() {
        let mut view = ViewState::new(&BookModel);
        assert_eq!(view.mode, Mode::Create);
        assert_eq!(view.submit_label(), "Save book");

        view.begin_edit(&record(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "title": "Dune",
            "author": "Herbert",
            "numberPages": 412
        })));
        assert_eq!(view.mode, Mode::Edit("65a1f0c2e4b0a1b2c3d4e5f6".to_string()));
        assert_eq!(view.form.get("numberPages"), Some("412"));
        assert_eq!(view.form.get("publisher"), Some(""));
        assert_eq!(view.submit_label(), "Save changes");

        view.reset();
        assert_eq!(view.mode, Mode::Create);
        assert_eq!(view.form, FormState::empty(&BookModel));
    }

    #[test]
    fn payload_omits_empty_optional_inputs() {
        let mut form = FormState::empty(&BookModel);
        form.set("title", "Dune");
        form.set("author", "");
        form.set("numberPages", " 412 ");
        assert_eq!(
            form.to_payload(&BookModel),
            json!({ "title": "Dune", "author": "", "numberPages": 412 })
        );
    }

    #[test]
    fn unparsable_numbers_are_sent_raw() {
        let mut form = FormState::empty(&BookModel);
        form.set("numberPages", "many");
        assert_eq!(form.to_payload(&BookModel)["numberPages"], json!("many"));
    }

    #[test]
    fn unknown_fields_are_refused() {
        let mut form = FormState::empty(&CustomerModel);
        assert!(form.set("email", "ada@example.com"));
        assert!(!form.set("title", "Dune"));
        assert_eq!(form.get("title"), None);
    }
}
