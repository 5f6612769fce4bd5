//! Domain entities for rule-violation exceptions.
//!
//! Exceptions are produced by an external rule-evaluation process. The service
//! only reads them back joined to their shipment; the operator CLI can load a
//! prepared exception file.

use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::utils::json::value_to_text;

/// A flattened exception joined to its owning shipment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionRecord {
    pub shipment_ref: String,
    pub rule_code: String,
    pub rule_description: Option<String>,
    pub severity: String,
    pub exception_value: Option<String>,
}

/// Input data for inserting an exception against a known shipment id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewException {
    pub shipment_id: i64,
    pub rule_code: String,
    pub rule_description: String,
    pub severity: String,
    pub exception_value: Option<String>,
}

/// An exception as written by the rule-evaluation process, keyed by
/// `shipment_ref` rather than by database id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawException {
    #[serde(default)]
    pub shipment_ref: Option<String>,
    #[serde(default)]
    pub rule_code: Option<String>,
    #[serde(default)]
    pub rule_description: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub exception_value: Option<Value>,
}

impl RawException {
    /// Resolves the record against a shipment id.
    ///
    /// `rule_description` defaults to an empty string and a numeric
    /// `exception_value` is stored as text.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `rule_code` or `severity` is missing or empty.
    pub fn into_new(self, shipment_id: i64) -> Result<NewException, AppError> {
        self.check_required()?;

        Ok(NewException {
            shipment_id,
            rule_code: self.rule_code.unwrap_or_default(),
            rule_description: self.rule_description.unwrap_or_default(),
            severity: self.severity.unwrap_or_default(),
            exception_value: self.exception_value.and_then(value_to_text),
        })
    }

    /// Checks that the fields every stored exception needs are present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the offending record.
    pub fn check_required(&self) -> Result<(), AppError> {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());

        if present(&self.rule_code) && present(&self.severity) {
            return Ok(());
        }

        Err(AppError::bad_request(format!(
            "Missing rule_code or severity in exception for shipment {}",
            self.shipment_ref.as_deref().unwrap_or("<none>")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawException {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_into_new_full_record() {
        let new = raw(json!({
            "shipment_ref": "TEST1",
            "rule_code": "ARRIVAL_LATE",
            "rule_description": "Late arrival",
            "severity": "HIGH",
            "exception_value": "2026-01-06"
        }))
        .into_new(7)
        .unwrap();

        assert_eq!(new.shipment_id, 7);
        assert_eq!(new.rule_code, "ARRIVAL_LATE");
        assert_eq!(new.severity, "HIGH");
        assert_eq!(new.exception_value.as_deref(), Some("2026-01-06"));
    }

    #[test]
    fn test_description_defaults_to_empty() {
        let new = raw(json!({
            "shipment_ref": "A1",
            "rule_code": "MISSING_CARRIER",
            "severity": "MEDIUM",
            "exception_value": null
        }))
        .into_new(1)
        .unwrap();

        assert_eq!(new.rule_description, "");
        assert!(new.exception_value.is_none());
    }

    #[test]
    fn test_numeric_exception_value_is_text() {
        let new = raw(json!({
            "shipment_ref": "A1",
            "rule_code": "DELAY_DAYS",
            "severity": "LOW",
            "exception_value": 3
        }))
        .into_new(1)
        .unwrap();

        assert_eq!(new.exception_value.as_deref(), Some("3"));
    }

    #[test]
    fn test_missing_severity_is_rejected() {
        let err = raw(json!({"shipment_ref": "A1", "rule_code": "X"}))
            .into_new(1)
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert!(err.to_string().contains("A1"));
    }

    #[test]
    fn test_empty_rule_code_is_rejected() {
        let record = raw(json!({"shipment_ref": "A1", "rule_code": "", "severity": "LOW"}));
        assert!(record.check_required().is_err());
    }
}
