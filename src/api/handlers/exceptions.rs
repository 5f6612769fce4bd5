//! Handler for the exception listing endpoint.

use axum::{Json, extract::State};

use crate::api::dto::exceptions::ExceptionItem;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every exception joined to its shipment.
///
/// # Endpoint
///
/// `GET /api/exceptions`
///
/// # Response
///
/// Always `200 OK`. On success the body is a bare array (possibly empty):
///
/// ```json
/// [
///   {
///     "shipment_ref": "SH-1001",
///     "rule_code": "ARRIVAL_LATE",
///     "rule_description": "Actual arrival after planned arrival",
///     "severity": "HIGH",
///     "exception_value": "2026-01-06"
///   }
/// ]
/// ```
///
/// When the store is unreachable the body is an object instead:
///
/// ```json
/// { "success": false, "error": "pool timed out while waiting for an open connection" }
/// ```
pub async fn exceptions_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExceptionItem>>, AppError> {
    let records = state.exception_service.list_exceptions().await?;

    Ok(Json(records.into_iter().map(ExceptionItem::from).collect()))
}
