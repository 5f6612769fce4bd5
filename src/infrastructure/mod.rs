//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`import`] - Spreadsheet import for the operator CLI
//! - [`persistence`] - PostgreSQL connection handling and repositories

pub mod import;
pub mod persistence;
