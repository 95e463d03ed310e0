//! Route configuration and setup

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router. The body-size ceiling is enforced both at
/// the transport layer and on the multipart extractor.
pub fn build_router(state: Arc<AppState>) -> Router {
    let max_body = state.config.max_upload_size_bytes;

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/convert", get(handlers::pages::convert_page))
        .route("/edit", get(handlers::pages::edit_page))
        .route("/preview", get(handlers::pages::preview_page))
        .route("/api/convert", post(handlers::convert::convert_presentation))
        .route("/api/openapi.json", get(openapi_json))
        .with_state(state)
        .merge(Into::<Router>::into(
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"),
        ))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
}
