use crate::app::controller::ResourceController;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub controller: ResourceController,
}

impl AppState {
    pub fn new(controller: ResourceController) -> Self {
        Self { controller }
    }
}

/// Envelope for every non-record reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// A stored record: the identifier plus the resource's declared fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, JsonValue>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn message(status: StatusCode, text: impl Into<String>) -> Response {
    (
        status,
        Json(MessageResponse {
            message: text.into(),
        }),
    )
        .into_response()
}

pub fn json_400(err: JsonRejection) -> Response {
    message(
        StatusCode::BAD_REQUEST,
        format!("Invalid JSON body: {}", err.body_text()),
    )
}
