use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/flow/start", post(handlers::start_flow))
        .route("/flow/advance", post(handlers::advance_flow))
        .route("/appointments", post(handlers::create_appointment))
        .with_state(state)
}
