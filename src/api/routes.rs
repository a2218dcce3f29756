use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::{plans, profile, progress, AppState};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", post(profile::submit_profile))
        .route("/plans/:kind/overview", get(plans::plan_overview))
        .route("/plans/:kind/mode", post(plans::switch_mode))
        .route("/plans/:kind/generate", post(plans::generate_plan))
        .route("/plans/:kind/export", get(plans::export_plan))
        .route("/progress", get(progress::progress_report))
}
