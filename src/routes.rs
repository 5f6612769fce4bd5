//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check: database reachability
//! - `POST /api/upload`      - Shipment batch upsert
//! - `GET  /api/exceptions`  - Exceptions joined to shipments
//!
//! # Middleware
//!
//! - **Body limit** - `AppState::max_body_bytes` on the `/api` routes
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_routes = api::routes::routes().layer(DefaultBodyLimit::max(state.max_body_bytes));

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
