//! API route configuration.

use crate::api::handlers::{exceptions_handler, upload_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shipment ingestion and exception query routes.
///
/// # Endpoints
///
/// - `POST /upload`     - Upsert a batch of shipments
/// - `GET  /exceptions` - List exceptions joined to shipments
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_handler))
        .route("/exceptions", get(exceptions_handler))
}
