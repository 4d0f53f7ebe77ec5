pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::state::AppState;
use crate::tailoring::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tailor", post(handlers::handle_tailor))
        .route("/api/v1/tailor/analysis", post(handlers::handle_analysis))
        .route("/api/v1/tailor/download", post(handlers::handle_download))
        .with_state(state)
}
