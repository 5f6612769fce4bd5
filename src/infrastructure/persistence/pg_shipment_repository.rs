//! PostgreSQL implementation of shipment repository.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::domain::entities::{NewShipment, Shipment, UpsertOutcome};
use crate::domain::repositories::ShipmentRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::ConnectionProvider;

/// Full-replace upsert keyed by `shipment_ref`.
///
/// `xmax = 0` only holds for a freshly inserted tuple, which tells an insert
/// apart from an overwrite without a second round trip.
const UPSERT_SHIPMENT: &str = r#"
    INSERT INTO shipments (shipment_ref, origin, destination, carrier, planned_departure,
                           planned_arrival, actual_arrival, status, source_file)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    ON CONFLICT (shipment_ref) DO UPDATE SET
        origin            = EXCLUDED.origin,
        destination       = EXCLUDED.destination,
        carrier           = EXCLUDED.carrier,
        planned_departure = EXCLUDED.planned_departure,
        planned_arrival   = EXCLUDED.planned_arrival,
        actual_arrival    = EXCLUDED.actual_arrival,
        status            = EXCLUDED.status,
        source_file       = EXCLUDED.source_file
    RETURNING (xmax = 0) AS inserted
"#;

#[derive(sqlx::FromRow)]
struct ShipmentRow {
    id: i64,
    shipment_ref: String,
    origin: Option<String>,
    destination: Option<String>,
    carrier: Option<String>,
    planned_departure: Option<NaiveDateTime>,
    planned_arrival: Option<NaiveDateTime>,
    actual_arrival: Option<NaiveDateTime>,
    status: Option<String>,
    source_file: Option<String>,
}

impl From<ShipmentRow> for Shipment {
    fn from(r: ShipmentRow) -> Self {
        Shipment {
            id: r.id,
            shipment_ref: r.shipment_ref,
            origin: r.origin,
            destination: r.destination,
            carrier: r.carrier,
            planned_departure: r.planned_departure,
            planned_arrival: r.planned_arrival,
            actual_arrival: r.actual_arrival,
            status: r.status,
            source_file: r.source_file,
        }
    }
}

/// PostgreSQL repository for shipments.
///
/// Every call acquires its own scoped connection from the provider and returns
/// it to the pool when the call ends.
pub struct PgShipmentRepository {
    connections: ConnectionProvider,
}

impl PgShipmentRepository {
    /// Creates a new repository on top of a connection provider.
    pub fn new(connections: ConnectionProvider) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl ShipmentRepository for PgShipmentRepository {
    async fn upsert_batch(
        &self,
        shipments: Vec<NewShipment>,
    ) -> Result<Vec<Result<UpsertOutcome, AppError>>, AppError> {
        let mut conn = self.connections.acquire().await?;
        let mut results = Vec::with_capacity(shipments.len());

        for shipment in &shipments {
            let outcome = sqlx::query_scalar::<_, bool>(UPSERT_SHIPMENT)
                .bind(&shipment.shipment_ref)
                .bind(&shipment.origin)
                .bind(&shipment.destination)
                .bind(&shipment.carrier)
                .bind(shipment.planned_departure)
                .bind(shipment.planned_arrival)
                .bind(shipment.actual_arrival)
                .bind(&shipment.status)
                .bind(&shipment.source_file)
                .fetch_one(&mut *conn)
                .await
                .map(|inserted| {
                    if inserted {
                        UpsertOutcome::Inserted
                    } else {
                        UpsertOutcome::Updated
                    }
                })
                .map_err(AppError::from);

            if let Err(e) = &outcome {
                tracing::warn!(
                    shipment_ref = %shipment.shipment_ref,
                    error = %e,
                    "Shipment upsert failed"
                );
            }

            results.push(outcome);
        }

        Ok(results)
    }

    async fn find_by_ref(&self, shipment_ref: &str) -> Result<Option<Shipment>, AppError> {
        let mut conn = self.connections.acquire().await?;

        let row = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT id, shipment_ref, origin, destination, carrier, planned_departure,
                   planned_arrival, actual_arrival, status, source_file
            FROM shipments
            WHERE shipment_ref = $1
            "#,
        )
        .bind(shipment_ref)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(Shipment::from))
    }

    async fn find_ids_by_refs(&self, refs: Vec<String>) -> Result<HashMap<String, i64>, AppError> {
        if refs.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.connections.acquire().await?;

        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT shipment_ref, id FROM shipments WHERE shipment_ref = ANY($1)",
        )
        .bind(refs)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let mut conn = self.connections.acquire().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shipments")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
