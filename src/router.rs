use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::AppState;

/// Build the application router with all routes
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::healthcheck))
        // Azimuth reconciliation routes
        .route("/api/networks/:network/azimuth/add-link", post(handlers::azimuth::add_link))
        .route("/api/networks/:network/azimuth/delete-link", post(handlers::azimuth::delete_link))
        .route("/api/networks/:network/azimuth/move-site", post(handlers::azimuth::move_site))
        // Before delSite: the site's links must still be in the topology
        .route("/api/networks/:network/azimuth/delete-site", post(handlers::azimuth::delete_site))
        // Estimation routes
        .route("/api/networks/:network/link-bearings", post(handlers::topology::link_bearings))
        .route("/api/networks/:network/nodes/:node/azimuth", get(handlers::topology::node_azimuth))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
