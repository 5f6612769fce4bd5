//! Timestamp parsing for shipment date fields.
//!
//! Shipment feeds come from spreadsheets and ad-hoc exports, so dates arrive
//! in a handful of shapes. All of them are reduced to a naive timestamp in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Errors that can occur while parsing a timestamp field.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimestampError {
    #[error("Unrecognized timestamp format: '{0}'")]
    InvalidFormat(String),
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a timestamp string.
///
/// # Accepted Formats
///
/// 1. `YYYY-MM-DD` - interpreted as midnight
/// 2. `YYYY-MM-DD HH:MM:SS[.fff]`
/// 3. `YYYY-MM-DDTHH:MM:SS[.fff]`
/// 4. RFC 3339 with offset - converted to UTC
///
/// # Errors
///
/// Returns [`TimestampError::InvalidFormat`] when none of the formats match.
///
/// # Examples
///
/// ```ignore
/// let ts = parse_timestamp("2026-01-05").unwrap();
/// assert_eq!(ts.to_string(), "2026-01-05 00:00:00");
/// ```
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    for format in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(ts);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.naive_utc())
        .map_err(|_| TimestampError::InvalidFormat(input.to_string()))
}

/// Serde helper for optional timestamp fields.
///
/// `null`, a missing field and a blank string all become `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        let ts = parse_timestamp("2026-01-05").unwrap();
        assert_eq!(ts.to_string(), "2026-01-05 00:00:00");
    }

    #[test]
    fn test_parse_space_separated() {
        let ts = parse_timestamp("2026-01-05 13:45:10").unwrap();
        assert_eq!(ts.to_string(), "2026-01-05 13:45:10");
    }

    #[test]
    fn test_parse_iso_without_offset() {
        let ts = parse_timestamp("2026-01-05T08:00:00").unwrap();
        assert_eq!(ts.to_string(), "2026-01-05 08:00:00");
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        let ts = parse_timestamp("2026-01-05T10:00:00+02:00").unwrap();
        assert_eq!(ts.to_string(), "2026-01-05 08:00:00");
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        assert!(parse_timestamp("  2026-01-05 ").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            parse_timestamp("05/01/2026"),
            Err(TimestampError::InvalidFormat("05/01/2026".to_string()))
        );
        assert!(parse_timestamp("2026-02-30").is_err());
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "deserialize_optional")]
        at: Option<NaiveDateTime>,
    }

    #[test]
    fn test_deserialize_optional_variants() {
        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.at.is_none());

        let null: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(null.at.is_none());

        let blank: Holder = serde_json::from_str(r#"{"at": "  "}"#).unwrap();
        assert!(blank.at.is_none());

        let set: Holder = serde_json::from_str(r#"{"at": "2026-01-06"}"#).unwrap();
        assert!(set.at.is_some());

        let bad = serde_json::from_str::<Holder>(r#"{"at": "yesterday"}"#);
        assert!(bad.is_err());
    }
}
