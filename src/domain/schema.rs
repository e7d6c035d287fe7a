//! Schema enforcement for resource documents.
//!
//! Payloads arrive as loose JSON. Declared fields are cast to their schema
//! type, undeclared fields are dropped, and every failure is collected so a
//! single message can describe all of them.

use crate::domain::model::{FieldKind, FieldSpec, ResourceModel};
use serde_json::Value as JsonValue;
use std::fmt;

/// A stored document body (identifier excluded).
pub type Document = serde_json::Map<String, JsonValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{model} validation failed: {}", join_errors(.errors))]
pub struct ValidationError {
    pub model: String,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(model: &str, field: &str, reason: impl Into<String>) -> Self {
        Self {
            model: model.to_string(),
            errors: vec![FieldError {
                field: field.to_string(),
                reason: reason.into(),
            }],
        }
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn json_type_name(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "Array",
        JsonValue::Object(_) => "Object",
    }
}

fn cast_error(spec: &FieldSpec, v: &JsonValue) -> String {
    format!(
        "Cast to {} failed for value {} (type {}) at path \"{}\"",
        spec.kind.as_str(),
        v,
        json_type_name(v),
        spec.name
    )
}

fn required_error(spec: &FieldSpec) -> String {
    format!("Path `{}` is required.", spec.name)
}

/// Casts one value to the declared type. `Ok(None)` means "no value".
pub fn cast_field(spec: &FieldSpec, v: &JsonValue) -> Result<Option<JsonValue>, String> {
    match (spec.kind, v) {
        (_, JsonValue::Null) => Ok(None),
        (FieldKind::String, JsonValue::String(s)) => Ok(Some(JsonValue::from(s.as_str()))),
        (FieldKind::String, JsonValue::Number(n)) => Ok(Some(JsonValue::from(n.to_string()))),
        (FieldKind::String, JsonValue::Bool(b)) => Ok(Some(JsonValue::from(b.to_string()))),
        (FieldKind::Number, JsonValue::Number(n)) => Ok(Some(JsonValue::Number(n.clone()))),
        (FieldKind::Number, JsonValue::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            parse_number(trimmed)
                .map(Some)
                .ok_or_else(|| cast_error(spec, v))
        }
        _ => Err(cast_error(spec, v)),
    }
}

/// Parses a numeric literal, keeping integral values as integers.
pub fn parse_number(s: &str) -> Option<JsonValue> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(JsonValue::from(i));
    }
    let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
    serde_json::Number::from_f64(f).map(JsonValue::Number)
}

fn is_blank(v: &Option<JsonValue>) -> bool {
    match v {
        None => true,
        Some(JsonValue::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn as_object<'a>(
    model: &dyn ResourceModel,
    payload: &'a JsonValue,
) -> Result<&'a Document, ValidationError> {
    payload.as_object().ok_or_else(|| {
        ValidationError::single(
            model.model_name(),
            "body",
            format!("expected an object, got {}", json_type_name(payload)),
        )
    })
}

/// Builds the document to insert: every required field present and typed.
pub fn validate_create(
    model: &dyn ResourceModel,
    payload: &JsonValue,
) -> Result<Document, ValidationError> {
    let obj = as_object(model, payload)?;
    let mut errors = Vec::new();
    let mut out = Document::new();

    for spec in model.fields() {
        let cast = match obj.get(spec.name) {
            Some(v) => cast_field(spec, v),
            None => Ok(None),
        };
        match cast {
            Ok(value) if spec.required && is_blank(&value) => errors.push(FieldError {
                field: spec.name.to_string(),
                reason: required_error(spec),
            }),
            Ok(Some(value)) => {
                out.insert(spec.name.to_string(), value);
            }
            Ok(None) => {}
            Err(reason) => errors.push(FieldError {
                field: spec.name.to_string(),
                reason,
            }),
        }
    }

    if errors.is_empty() {
        Ok(out)
    } else {
        Err(ValidationError {
            model: model.model_name().to_string(),
            errors,
        })
    }
}

/// Builds a merge patch: only supplied declared fields, each typed.
///
/// An optional field supplied as `null` is kept as `null` so the merge clears
/// it. Required fields can never be cleared.
pub fn validate_update(
    model: &dyn ResourceModel,
    payload: &JsonValue,
) -> Result<Document, ValidationError> {
    let obj = as_object(model, payload)?;
    let mut errors = Vec::new();
    let mut patch = Document::new();

    for spec in model.fields() {
        let Some(raw) = obj.get(spec.name) else {
            continue;
        };
        match cast_field(spec, raw) {
            Ok(value) if spec.required && is_blank(&value) => errors.push(FieldError {
                field: spec.name.to_string(),
                reason: required_error(spec),
            }),
            Ok(value) => {
                patch.insert(spec.name.to_string(), value.unwrap_or(JsonValue::Null));
            }
            Err(reason) => errors.push(FieldError {
                field: spec.name.to_string(),
                reason,
            }),
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationError {
            model: model.model_name().to_string(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookModel, CustomerModel};
    use serde_json::json;

    #[test]
    fn create_keeps_declared_fields_and_drops_unknown() {
        let doc = validate_create(
            &BookModel,
            &json!({
                "title": "Dune",
                "author": "Herbert",
                "numberPages": 412,
                "publisher": "Chilton",
                "isbn": "0441013597",
                "_id": "ignored"
            }),
        )
        .unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(doc["numberPages"], json!(412));
        assert!(doc.get("isbn").is_none());
        assert!(doc.get("_id").is_none());
    }

    #[test]
    fn create_reports_every_missing_required_field() {
        let err = validate_create(&CustomerModel, &json!({ "firstName": "" })).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["firstName", "lastName", "email"]);
        assert!(err
            .to_string()
            .starts_with("Customer validation failed: firstName: Path `firstName` is required."));
    }

    #[test]
    fn numeric_strings_are_cast() {
        let doc = validate_create(
            &BookModel,
            &json!({ "title": "T", "author": "A", "numberPages": " 120 " }),
        )
        .unwrap();
        assert_eq!(doc["numberPages"], json!(120));
    }

    #[test]
    fn bad_number_is_a_cast_error() {
        let err = validate_create(
            &BookModel,
            &json!({ "title": "T", "author": "A", "numberPages": "many" }),
        )
        .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(
            err.errors[0].reason,
            "Cast to Number failed for value \"many\" (type string) at path \"numberPages\""
        );
    }

    #[test]
    fn strings_accept_scalars_but_not_objects() {
        let doc = validate_create(&BookModel, &json!({ "title": 1984, "author": "Orwell" })).unwrap();
        assert_eq!(doc["title"], json!("1984"));

        let err =
            validate_create(&BookModel, &json!({ "title": {"x": 1}, "author": "A" })).unwrap_err();
        assert_eq!(err.errors[0].field, "title");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = validate_create(&BookModel, &json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "Book validation failed: body: expected an object, got Array");
    }

    #[test]
    fn update_patch_only_contains_supplied_fields() {
        let patch = validate_update(&BookModel, &json!({ "title": "X", "unknown": 1 })).unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch["title"], json!("X"));
    }

    #[test]
    fn update_can_clear_optional_but_not_required() {
        let patch = validate_update(&BookModel, &json!({ "publisher": null })).unwrap();
        assert_eq!(patch["publisher"], JsonValue::Null);

        let err = validate_update(&BookModel, &json!({ "author": null })).unwrap_err();
        assert_eq!(err.errors[0].reason, "Path `author` is required.");
    }

    #[test]
    fn parse_number_prefers_integers() {
        assert_eq!(parse_number("7"), Some(json!(7)));
        assert_eq!(parse_number("7.5"), Some(json!(7.5)));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("seven"), None);
    }
}
