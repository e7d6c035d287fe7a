use crate::transport::http::handlers::{health, resources};
use crate::transport::http::types::{AppState, HealthResponse, MessageResponse};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        resources::create_handler,
        resources::get_all_handler,
        resources::get_by_id_handler,
        resources::update_handler,
        resources::delete_handler
    ),
    components(schemas(MessageResponse, HealthResponse))
)]
pub struct ApiDoc;

/// Routes for one resource, mounted under `/<resource>`.
pub fn create_router(app_state: AppState) -> Router {
    let prefix = format!("/{}", app_state.controller.model().resource_name());
    let resource_routes = Router::new()
        .route("/getAll", get(resources::get_all_handler))
        .route("/get/:id", get(resources::get_by_id_handler))
        .route("/create", post(resources::create_handler))
        .route("/update/:id", put(resources::update_handler))
        .route("/delete/:id", delete(resources::delete_handler));

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .nest(&prefix, resource_routes)
        .with_state(app_state)
}

/// The full service: routes plus Swagger UI, CORS and request tracing.
pub fn create_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
