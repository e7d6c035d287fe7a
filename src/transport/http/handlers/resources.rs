//! CRUD handlers shared by every resource.
//!
//! Status mapping is coarse: mutations answer 201/200 on success,
//! 200 with a message when the record is missing, and 400 for any validation
//! or storage failure. Reads answer 200 unless storage fails (400).

use crate::domain::outcome::Outcome;
use crate::transport::http::types::{json_400, message, AppState, MessageResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as JsonValue;

fn failure<T>(outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::ValidationError(m) | Outcome::StorageError(m) => {
            message(StatusCode::BAD_REQUEST, m)
        }
        // Callers handle Ok and NotFound themselves.
        Outcome::Ok(_) | Outcome::NotFound => {
            message(StatusCode::BAD_REQUEST, "Unexpected outcome")
        }
    }
}

#[utoipa::path(
    post,
    path = "/{resource}/create",
    params(
        ("resource" = String, Path, description = "Resource collection (books or customers)")
    ),
    request_body(content = Object, description = "Field values of the new record"),
    responses(
        (status = 201, description = "Record created", body = MessageResponse),
        (status = 400, description = "Validation or storage failure", body = MessageResponse)
    )
)]
pub async fn create_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e),
    };
    let controller = &state.controller;
    match controller.create(&payload).await {
        Outcome::Ok(_) => message(StatusCode::CREATED, controller.model().created_message()),
        other => failure(other),
    }
}

#[utoipa::path(
    get,
    path = "/{resource}/getAll",
    params(
        ("resource" = String, Path, description = "Resource collection (books or customers)")
    ),
    responses(
        (status = 200, description = "Every record in storage order", body = [Object]),
        (status = 400, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn get_all_handler(State(state): State<AppState>) -> Response {
    match state.controller.get_all().await {
        Outcome::Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Outcome::NotFound => (StatusCode::OK, Json(Vec::<JsonValue>::new())).into_response(),
        other => failure(other),
    }
}

#[utoipa::path(
    get,
    path = "/{resource}/get/{id}",
    params(
        ("resource" = String, Path, description = "Resource collection (books or customers)"),
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "The record, or a not-found message", body = Object),
        (status = 400, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn get_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let controller = &state.controller;
    match controller.get_by_id(&id).await {
        Outcome::Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Outcome::NotFound => message(StatusCode::OK, controller.model().not_found_message()),
        other => failure(other),
    }
}

#[utoipa::path(
    put,
    path = "/{resource}/update/{id}",
    params(
        ("resource" = String, Path, description = "Resource collection (books or customers)"),
        ("id" = String, Path, description = "Record identifier")
    ),
    request_body(content = Object, description = "Fields to merge into the record"),
    responses(
        (status = 200, description = "Updated, or a not-found message", body = MessageResponse),
        (status = 400, description = "Validation or storage failure", body = MessageResponse)
    )
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> Response {
    let Json(payload) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e),
    };
    let controller = &state.controller;
    match controller.update(&id, &payload).await {
        Outcome::Ok(()) => message(StatusCode::OK, controller.model().updated_message()),
        Outcome::NotFound => message(StatusCode::OK, controller.model().not_found_by_id_message()),
        other => failure(other),
    }
}

#[utoipa::path(
    delete,
    path = "/{resource}/delete/{id}",
    params(
        ("resource" = String, Path, description = "Resource collection (books or customers)"),
        ("id" = String, Path, description = "Record identifier")
    ),
    responses(
        (status = 200, description = "Deleted, or a not-found message", body = MessageResponse),
        (status = 400, description = "Storage failure", body = MessageResponse)
    )
)]
pub async fn delete_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let controller = &state.controller;
    match controller.remove(&id).await {
        Outcome::Ok(()) => message(StatusCode::OK, controller.model().deleted_message()),
        Outcome::NotFound => message(StatusCode::OK, controller.model().not_found_by_id_message()),
        other => failure(other),
    }
}
