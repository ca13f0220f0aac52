use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/layout", get(handlers::get_layout))
        .route("/api/recalculate", post(handlers::recalculate))
        .route("/api/reset", post(handlers::reset))
        .route("/api/contrast", get(handlers::contrast))
        .with_state(state)
}
