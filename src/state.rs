//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ExceptionService, IngestService};
use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::infrastructure::persistence::{
    ConnectionProvider, PgExceptionRepository, PgShipmentRepository,
};

/// Services and the connection provider, cloned cheaply per request.
///
/// Nothing here holds per-request data; each request acquires its own
/// connection through the provider.
#[derive(Clone)]
pub struct AppState {
    pub ingest_service: Arc<IngestService<PgShipmentRepository>>,
    pub exception_service: Arc<ExceptionService<PgExceptionRepository, PgShipmentRepository>>,
    pub connections: ConnectionProvider,
    /// Body limit applied to the `/api` routes.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Wires repositories and services on top of a connection provider.
    pub fn new(connections: ConnectionProvider) -> Self {
        let shipment_repository = Arc::new(PgShipmentRepository::new(connections.clone()));
        let exception_repository = Arc::new(PgExceptionRepository::new(connections.clone()));

        Self {
            ingest_service: Arc::new(IngestService::new(shipment_repository.clone())),
            exception_service: Arc::new(ExceptionService::new(
                exception_repository,
                shipment_repository,
            )),
            connections,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Overrides the upload body limit.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
