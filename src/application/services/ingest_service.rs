//! Shipment batch ingestion service.

use std::sync::Arc;

use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{IngestReport, NewShipment, RowOutcome, RowResult};
use crate::domain::repositories::ShipmentRepository;
use crate::error::AppError;
use crate::utils::json::str_field;

/// Service that maps loosely-typed batch elements to shipments and upserts them.
///
/// A bad element never fails the batch: it is recorded as a failed row and
/// the remaining elements are still written.
pub struct IngestService<R: ShipmentRepository> {
    repository: Arc<R>,
}

impl<R: ShipmentRepository> IngestService<R> {
    /// Creates a new ingest service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Ingests a batch of shipment records.
    ///
    /// # Processing
    ///
    /// 1. Every element is mapped to a [`NewShipment`]; elements that are not
    ///    objects, lack `shipment_ref`/`origin`/`destination`, or carry an
    ///    unparseable timestamp become failed rows
    /// 2. The remaining shipments are upserted in input order over one
    ///    connection; per-row store errors become failed rows
    ///
    /// A connection is acquired even when no element is writable, so an
    /// unreachable store is always reported.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if the store is unreachable. No rows
    /// are written in that case.
    pub async fn ingest(&self, records: Vec<Value>) -> Result<IngestReport, AppError> {
        let parsed: Vec<(Option<String>, Result<NewShipment, AppError>)> = records
            .into_iter()
            .map(|value| (str_field(&value, "shipment_ref"), parse_shipment(value)))
            .collect();

        let writable: Vec<NewShipment> = parsed
            .iter()
            .filter_map(|(_, shipment)| shipment.as_ref().ok().cloned())
            .collect();

        let mut outcomes = self.repository.upsert_batch(writable).await?.into_iter();

        let rows = parsed
            .into_iter()
            .enumerate()
            .map(|(index, (shipment_ref, shipment))| {
                let outcome = match shipment {
                    Ok(_) => match outcomes.next() {
                        Some(Ok(written)) => RowOutcome::Written(written),
                        Some(Err(e)) => RowOutcome::Failed(e.to_string()),
                        None => RowOutcome::Failed("No result returned for row".to_string()),
                    },
                    Err(e) => {
                        tracing::warn!(index, error = %e, "Skipping malformed shipment record");
                        RowOutcome::Failed(e.to_string())
                    }
                };

                RowResult {
                    index,
                    shipment_ref,
                    outcome,
                }
            })
            .collect();

        let report = IngestReport { rows };

        tracing::info!(
            total = report.rows.len(),
            written = report.written(),
            updated = report.updated(),
            failed = report.failed(),
            "Shipment batch ingested"
        );

        Ok(report)
    }
}

/// Maps one batch element to a validated shipment.
fn parse_shipment(value: Value) -> Result<NewShipment, AppError> {
    if !value.is_object() {
        return Err(AppError::bad_request("Shipment record must be a JSON object"));
    }

    let shipment: NewShipment =
        serde_json::from_value(value).map_err(|e| AppError::bad_request(e.to_string()))?;
    shipment.validate()?;

    Ok(shipment)
}
