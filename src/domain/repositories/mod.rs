//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by concrete
//! repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShipmentRepository`] - Shipment upsert and lookup
//! - [`ExceptionRepository`] - Exception listing and loading
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod exception_repository;
pub mod shipment_repository;

pub use exception_repository::ExceptionRepository;
pub use shipment_repository::ShipmentRepository;

#[cfg(test)]
pub use exception_repository::MockExceptionRepository;
#[cfg(test)]
pub use shipment_repository::MockShipmentRepository;
