//! Application layer services.
//!
//! Services consume repository traits and give HTTP handlers and the admin
//! CLI one shared implementation of each operation.
//!
//! # Available Services
//!
//! - [`services::ingest_service::IngestService`] - Shipment batch upsert with per-row results
//! - [`services::exception_service::ExceptionService`] - Exception listing and loading

pub mod services;
