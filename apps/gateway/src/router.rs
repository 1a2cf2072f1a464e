use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::booking_routes;
use catalog_cell::router::catalog_routes;
use shared_config::AppConfig;
use suggestion_cell::router::suggestion_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "CarePort booking gateway is running!" }))
        .nest("/catalog", catalog_routes(state.clone()))
        .nest("/booking", booking_routes(state.clone()))
        .nest("/suggestions", suggestion_routes(state))
}
