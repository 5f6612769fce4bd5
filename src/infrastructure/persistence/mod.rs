//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Components
//!
//! - [`ConnectionProvider`] - Pool-backed source of scoped connections
//! - [`PgShipmentRepository`] - Shipment upsert and lookup
//! - [`PgExceptionRepository`] - Exception join queries and inserts

pub mod connection;
pub mod pg_exception_repository;
pub mod pg_shipment_repository;

pub use connection::ConnectionProvider;
pub use pg_exception_repository::PgExceptionRepository;
pub use pg_shipment_repository::PgShipmentRepository;
