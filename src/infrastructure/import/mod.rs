//! File importers used by the operator CLI.
//!
//! - [`excel`] - First-sheet `.xlsx`/`.xls` reader producing batch records

pub mod excel;

pub use excel::{ImportError, is_spreadsheet, read_shipment_rows};
