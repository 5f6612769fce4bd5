//! Handler for the shipment upload endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
};

use crate::api::dto::upload::{UploadResponse, parse_batch};
use crate::error::AppError;
use crate::state::AppState;

/// Upserts a batch of shipments keyed by `shipment_ref`.
///
/// # Endpoint
///
/// `POST /api/upload`
///
/// # Request Body
///
/// ```json
/// [
///   {
///     "shipment_ref": "SH-1001",
///     "origin": "Rotterdam",
///     "destination": "Hamburg",
///     "carrier": "DHL",                      // optional
///     "planned_departure": "2026-01-01",     // optional
///     "planned_arrival": "2026-01-05",       // optional
///     "actual_arrival": "2026-01-06",        // optional
///     "status": "DELIVERED",                 // optional
///     "source_file": "week01.xlsx"           // optional
///   }
/// ]
/// ```
///
/// # Response
///
/// Always `200 OK`.
///
/// ```json
/// {
///   "success": true,
///   "inserted": 1,
///   "updated": 0,
///   "failed": 0,
///   "items": [{ "index": 0, "shipment_ref": "SH-1001", "status": "inserted" }]
/// }
/// ```
///
/// On a bad body or an unreachable store:
///
/// ```json
/// { "success": false, "error": "Invalid JSON" }
/// ```
///
/// The body is read raw so that malformed JSON, and a body over the
/// configured size limit, get the envelope above instead of an extractor
/// rejection.
pub async fn upload_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let body = body?;
    let records = parse_batch(&body)?;

    let report = state.ingest_service.ingest(records).await?;

    Ok(Json(UploadResponse::from(report)))
}
