//! Exception query and loading service.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::entities::{ExceptionRecord, NewException, RawException};
use crate::domain::repositories::{ExceptionRepository, ShipmentRepository};
use crate::error::AppError;

/// Outcome of loading a prepared exception file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionLoadSummary {
    pub recorded: usize,
    /// Records whose `shipment_ref` matched no stored shipment.
    pub skipped: usize,
}

/// Service for reading exceptions joined to shipments and for loading
/// exceptions produced by the rule-evaluation process.
pub struct ExceptionService<E: ExceptionRepository, S: ShipmentRepository> {
    exception_repository: Arc<E>,
    shipment_repository: Arc<S>,
}

impl<E: ExceptionRepository, S: ShipmentRepository> ExceptionService<E, S> {
    /// Creates a new exception service.
    pub fn new(exception_repository: Arc<E>, shipment_repository: Arc<S>) -> Self {
        Self {
            exception_repository,
            shipment_repository,
        }
    }

    /// Lists all exceptions with their shipment reference.
    ///
    /// An empty table yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if the store is unreachable.
    /// Returns [`AppError::Database`] on query errors.
    pub async fn list_exceptions(&self) -> Result<Vec<ExceptionRecord>, AppError> {
        self.exception_repository.list_with_shipments().await
    }

    /// Loads exceptions keyed by `shipment_ref`.
    ///
    /// # Rules
    ///
    /// - Records whose shipment is unknown are skipped
    /// - Every matched record must carry `rule_code` and `severity`; one that
    ///   does not aborts the load before anything is written
    /// - Missing `rule_description` is stored as an empty string
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a matched record missing required fields.
    /// Returns [`AppError::Connection`] or [`AppError::Database`] on store errors;
    /// records written before the failure stay written.
    pub async fn load_exceptions(
        &self,
        records: Vec<RawException>,
    ) -> Result<ExceptionLoadSummary, AppError> {
        let refs: BTreeSet<String> = records
            .iter()
            .filter_map(|r| r.shipment_ref.clone())
            .collect();

        let ids = self
            .shipment_repository
            .find_ids_by_refs(refs.into_iter().collect())
            .await?;

        let mut summary = ExceptionLoadSummary::default();
        let mut pending: Vec<NewException> = Vec::with_capacity(records.len());

        for record in records {
            let shipment_id = record
                .shipment_ref
                .as_ref()
                .and_then(|shipment_ref| ids.get(shipment_ref))
                .copied();

            match shipment_id {
                Some(id) => pending.push(record.into_new(id)?),
                None => {
                    tracing::warn!(
                        shipment_ref = record.shipment_ref.as_deref().unwrap_or("<none>"),
                        "Skipping exception for unknown shipment"
                    );
                    summary.skipped += 1;
                }
            }
        }

        for new_exception in pending {
            self.exception_repository.create(new_exception).await?;
            summary.recorded += 1;
        }

        tracing::info!(
            recorded = summary.recorded,
            skipped = summary.skipped,
            "Exceptions loaded"
        );

        Ok(summary)
    }
}
