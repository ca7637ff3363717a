// src/lib.rs

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppState;

/// Builds the full application router. Exposed so integration tests can
/// drive the app without a listener.
pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            put(handlers::clients::update_client).delete(handlers::clients::delete_client),
        )
        .route(
            "/webhook",
            get(handlers::webhook::webhook_status).post(handlers::webhook::receive_lead),
        )
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/dashboard/trend", get(handlers::dashboard::get_monthly_trend))
        .route(
            "/dashboard/status-breakdown",
            get(handlers::dashboard::get_status_breakdown),
        )
        // Unknown /api paths must answer JSON, never the SPA shell.
        .fallback(api_not_found)
        .with_state(app_state);

    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    // Compiled frontend bundle; unknown paths fall back to index.html so
    // client-side routing works on deep links.
    let static_site = ServeDir::new("dist").not_found_service(ServeFile::new("dist/index.html"));

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .fallback_service(static_site)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "API route not found" })),
    )
}
