use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn suggestion_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::create_suggestion))
        .with_state(state)
}
