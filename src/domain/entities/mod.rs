//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`Shipment`] - A tracked shipment, keyed by `shipment_ref`
//! - [`ExceptionRecord`] - A rule violation joined to its shipment
//! - [`IngestReport`] - Per-row results of an ingest batch
//!
//! # Design Pattern
//!
//! Separate structs are used for writes:
//! - `NewShipment`, `NewException` - For creating or overwriting records
//! - `RawException` - Exception as produced upstream, keyed by reference

pub mod exception;
pub mod ingest_report;
pub mod shipment;

pub use exception::{ExceptionRecord, NewException, RawException};
pub use ingest_report::{IngestReport, RowOutcome, RowResult};
pub use shipment::{NewShipment, Shipment, UpsertOutcome};
