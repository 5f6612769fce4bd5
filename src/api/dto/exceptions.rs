//! DTOs for the exception listing endpoint.

use serde::Serialize;

use crate::domain::entities::ExceptionRecord;

/// One exception joined to its shipment.
///
/// The endpoint returns a bare array of these on success, without a
/// `success` flag.
#[derive(Debug, Serialize)]
pub struct ExceptionItem {
    pub shipment_ref: String,
    pub rule_code: String,
    pub rule_description: Option<String>,
    pub severity: String,
    pub exception_value: Option<String>,
}

impl From<ExceptionRecord> for ExceptionItem {
    fn from(r: ExceptionRecord) -> Self {
        Self {
            shipment_ref: r.shipment_ref,
            rule_code: r.rule_code,
            rule_description: r.rule_description,
            severity: r.severity,
            exception_value: r.exception_value,
        }
    }
}
