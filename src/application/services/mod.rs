//! Business logic services for the application layer.

pub mod exception_service;
pub mod ingest_service;

pub use exception_service::{ExceptionLoadSummary, ExceptionService};
pub use ingest_service::IngestService;
