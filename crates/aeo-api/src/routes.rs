//! Router assembly: one route per inbound endpoint, wrapped in
//! `tower-http`'s tracing and CORS layers.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/audit/page", post(handlers::audit_page))
        .route("/audit/domain", post(handlers::audit_domain))
        .route("/audit/domain/progress/:job_id", get(handlers::domain_progress))
        .route("/audit/domain/result/:job_id", get(handlers::domain_result))
        .route("/audit/pdf", post(handlers::audit_pdf))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
