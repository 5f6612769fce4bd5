//! Repository trait for shipment storage.

use crate::domain::entities::{NewShipment, Shipment, UpsertOutcome};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Repository interface for the `shipments` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShipmentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_shipment.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShipmentRepository: Send + Sync {
    /// Upserts every shipment, in order, over a single scoped connection.
    ///
    /// Rows are written one statement at a time with no surrounding
    /// transaction, so a failure part-way leaves earlier rows applied.
    /// The returned vector has one entry per input shipment. An empty input
    /// still acquires a connection, so an unreachable store is reported.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if no connection could be acquired;
    /// nothing is written in that case. Per-row failures are reported inside
    /// the vector instead.
    async fn upsert_batch(
        &self,
        shipments: Vec<NewShipment>,
    ) -> Result<Vec<Result<UpsertOutcome, AppError>>, AppError>;

    /// Finds a shipment by its business reference.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] or [`AppError::Database`] on store errors.
    async fn find_by_ref(&self, shipment_ref: &str) -> Result<Option<Shipment>, AppError>;

    /// Resolves shipment references to database ids. Unknown references are
    /// absent from the map.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] or [`AppError::Database`] on store errors.
    async fn find_ids_by_refs(&self, refs: Vec<String>) -> Result<HashMap<String, i64>, AppError>;

    /// Counts stored shipments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] or [`AppError::Database`] on store errors.
    async fn count(&self) -> Result<i64, AppError>;
}
