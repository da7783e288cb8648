//! Route definitions

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::{handlers, state::AppState};

async fn handle_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found; use POST /predict or the form at /" })),
    )
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::form_page).post(handlers::form_submit))
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .fallback(handle_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
