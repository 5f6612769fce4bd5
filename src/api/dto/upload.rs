//! DTOs for the shipment upload endpoint.

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{IngestReport, RowOutcome, RowResult};
use crate::error::AppError;
use crate::utils::json::is_falsy;

/// Parses a raw upload body into batch elements.
///
/// # Errors
///
/// Returns [`AppError::InvalidJson`] if the body is not JSON, is an empty or
/// falsy JSON value (`[]`, `null`, `0`, `""`, ...), or is not an array.
pub fn parse_batch(body: &[u8]) -> Result<Vec<Value>, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidJson)?;

    if is_falsy(&value) {
        return Err(AppError::InvalidJson);
    }

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(AppError::InvalidJson),
    }
}

/// Successful upload response.
///
/// `success` and `inserted` keep the legacy shape; `inserted` counts every row
/// written, whether it created a shipment or overwrote one.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
    pub items: Vec<UploadResultItem>,
}

/// Per-element result, in input order.
#[derive(Debug, Serialize)]
pub struct UploadResultItem {
    pub index: usize,
    pub shipment_ref: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RowResult> for UploadResultItem {
    fn from(row: RowResult) -> Self {
        let (status, error) = match row.outcome {
            RowOutcome::Written(outcome) => (outcome.as_str(), None),
            RowOutcome::Failed(message) => ("failed", Some(message)),
        };

        Self {
            index: row.index,
            shipment_ref: row.shipment_ref,
            status,
            error,
        }
    }
}

impl From<IngestReport> for UploadResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            success: true,
            inserted: report.written(),
            updated: report.updated(),
            failed: report.failed(),
            items: report.rows.into_iter().map(UploadResultItem::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UpsertOutcome;
    use serde_json::json;

    #[test]
    fn test_parse_batch_array() {
        let items = parse_batch(br#"[{"shipment_ref": "A1"}, {"shipment_ref": "A2"}]"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_parse_batch_rejects_garbage() {
        assert!(matches!(parse_batch(b"not json"), Err(AppError::InvalidJson)));
        assert!(matches!(parse_batch(b""), Err(AppError::InvalidJson)));
    }

    #[test]
    fn test_parse_batch_rejects_falsy_values() {
        let bodies: [&[u8]; 6] = [b"[]", b"null", b"false", b"0", b"\"\"", b"{}"];
        for body in bodies {
            assert!(matches!(parse_batch(body), Err(AppError::InvalidJson)));
        }
    }

    #[test]
    fn test_parse_batch_rejects_non_array() {
        assert!(matches!(
            parse_batch(br#"{"shipment_ref": "A1"}"#),
            Err(AppError::InvalidJson)
        ));
        assert!(matches!(parse_batch(b"42"), Err(AppError::InvalidJson)));
    }

    #[test]
    fn test_response_serialization() {
        let report = IngestReport {
            rows: vec![
                RowResult {
                    index: 0,
                    shipment_ref: Some("A1".to_string()),
                    outcome: RowOutcome::Written(UpsertOutcome::Inserted),
                },
                RowResult {
                    index: 1,
                    shipment_ref: None,
                    outcome: RowOutcome::Failed("missing field `origin`".to_string()),
                },
            ],
        };

        let body = serde_json::to_value(UploadResponse::from(report)).unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(body["inserted"], 1);
        assert_eq!(body["failed"], 1);
        assert_eq!(
            body["items"][0],
            json!({"index": 0, "shipment_ref": "A1", "status": "inserted"})
        );
        assert_eq!(body["items"][1]["status"], "failed");
        assert_eq!(body["items"][1]["shipment_ref"], json!(null));
        assert!(body["items"][1]["error"].is_string());
    }
}
