use axum::routing::post;
use axum::{Router, routing::get};

use super::handlers;
use super::handlers::probes::{healthz, livez, welcome};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/jobs", get(handlers::jobs::legacy_search))
        .route("/jobs/search", get(handlers::jobs::search))
        .route("/generate", post(handlers::chat::generate))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state)
}
