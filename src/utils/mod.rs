//! Utility functions shared across layers.
//!
//! - [`timestamp`] - Lenient timestamp parsing for shipment date fields
//! - [`json`] - Small helpers for loosely-typed JSON payloads

pub mod json;
pub mod timestamp;
