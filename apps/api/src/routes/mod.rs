pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/interviews", post(handlers::handle_create))
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get).delete(handlers::handle_delete),
        )
        .route(
            "/api/v1/interviews/:id/resume",
            post(handlers::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/interviews/:id/answer",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/interviews/:id/advance",
            post(handlers::handle_advance),
        )
        .route(
            "/api/v1/interviews/:id/summary",
            get(handlers::handle_summary),
        )
        .route(
            "/api/v1/interviews/:id/restart",
            post(handlers::handle_restart),
        )
        .with_state(state)
}
