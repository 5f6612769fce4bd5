//! Spreadsheet reader for shipment exports.
//!
//! Reads the first worksheet, takes the first row as headers and turns every
//! following non-blank row into a JSON object, ready for
//! [`IngestService::ingest`](crate::application::services::IngestService::ingest).
//!
//! Headers are normalized so that `" Shipment Ref "` becomes `shipment_ref`.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format '{0}' (expected .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Excel file contains no data")]
    Empty,
}

/// Returns true for file extensions handled by [`read_shipment_rows`].
pub fn is_spreadsheet(path: &Path) -> bool {
    matches!(extension(path).as_str(), "xlsx" | "xls")
}

/// Reads shipment records from the first worksheet of a spreadsheet.
///
/// # Errors
///
/// - [`ImportError::FileNotFound`] if the path does not exist
/// - [`ImportError::UnsupportedFormat`] for anything but `.xlsx`/`.xls`
/// - [`ImportError::Spreadsheet`] if the workbook cannot be parsed
/// - [`ImportError::Empty`] if there is no header row or no data row
pub fn read_shipment_rows(path: &Path) -> Result<Vec<Value>, ImportError> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    if !is_spreadsheet(path) {
        return Err(ImportError::UnsupportedFormat(extension(path)));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| ImportError::Spreadsheet(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::Empty)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::Spreadsheet(e.to_string()))?;

    records_from_rows(range.rows())
}

/// Normalizes a column header: trimmed, lowercased, spaces replaced by `_`.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn records_from_rows<'a, I>(mut rows: I) -> Result<Vec<Value>, ImportError>
where
    I: Iterator<Item = &'a [Data]>,
{
    let headers: Vec<String> = rows
        .next()
        .ok_or(ImportError::Empty)?
        .iter()
        .map(|cell| normalize_header(&cell.to_string()))
        .collect();

    let mut records = Vec::new();
    for row in rows {
        let mut record = Map::new();

        for (header, cell) in headers.iter().zip(row.iter()) {
            // headerless columns carry no field name
            if header.is_empty() {
                continue;
            }
            record.insert(header.clone(), cell_to_value(cell));
        }

        if record.values().all(Value::is_null) {
            continue;
        }

        records.push(Value::Object(record));
    }

    if records.is_empty() {
        return Err(ImportError::Empty);
    }

    Ok(records)
}

/// Converts a cell to the JSON value a spreadsheet export would produce.
///
/// Whole floats become integers (`1001.0` → `1001`), dates become
/// `YYYY-MM-DD HH:MM:SS`, blank and error cells become `null`.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Value::from(*f as i64)
            } else {
                Number::from_f64(*f).map_or(Value::Null, Value::Number)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ts| Value::String(ts.format("%Y-%m-%d %H:%M:%S").to_string()))
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Shipment Ref "), "shipment_ref");
        assert_eq!(normalize_header("Planned Arrival"), "planned_arrival");
        assert_eq!(normalize_header("ORIGIN"), "origin");
        assert_eq!(normalize_header("source_file"), "source_file");
        assert_eq!(normalize_header("Shipment  Ref"), "shipment__ref");
    }

    #[test]
    fn test_cell_to_value() {
        assert_eq!(cell_to_value(&Data::Empty), Value::Null);
        assert_eq!(cell_to_value(&text("  DHL ")), json!("DHL"));
        assert_eq!(cell_to_value(&text("   ")), Value::Null);
        assert_eq!(cell_to_value(&Data::Int(42)), json!(42));
        assert_eq!(cell_to_value(&Data::Float(1001.0)), json!(1001));
        assert_eq!(cell_to_value(&Data::Float(2.5)), json!(2.5));
        assert_eq!(cell_to_value(&Data::Bool(true)), json!(true));
        assert_eq!(
            cell_to_value(&Data::DateTimeIso("2026-01-05T08:00:00".to_string())),
            json!("2026-01-05T08:00:00")
        );
    }

    #[test]
    fn test_records_from_rows() {
        let sheet = vec![
            vec![text(" Shipment Ref "), text("Origin"), text("Destination"), text("")],
            vec![Data::Float(1001.0), text("Rotterdam"), text("Hamburg"), text("x")],
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            vec![text("SH-2"), text("Gdansk"), Data::Empty],
        ];

        let records = records_from_rows(sheet.iter().map(Vec::as_slice)).unwrap();

        assert_eq!(
            records,
            vec![
                json!({"shipment_ref": 1001, "origin": "Rotterdam", "destination": "Hamburg"}),
                json!({"shipment_ref": "SH-2", "origin": "Gdansk", "destination": null}),
            ]
        );
    }

    #[test]
    fn test_header_only_sheet_is_empty() {
        let sheet = vec![vec![text("shipment_ref"), text("origin")]];

        let err = records_from_rows(sheet.iter().map(Vec::as_slice)).unwrap_err();

        assert!(matches!(err, ImportError::Empty));
        assert_eq!(err.to_string(), "Excel file contains no data");
    }

    #[test]
    fn test_blank_sheet_is_empty() {
        let sheet: Vec<Vec<Data>> = Vec::new();

        let err = records_from_rows(sheet.iter().map(Vec::as_slice)).unwrap_err();

        assert!(matches!(err, ImportError::Empty));
    }

    #[test]
    fn test_missing_file() {
        let err = read_shipment_rows(&PathBuf::from("/nonexistent/shipments.xlsx")).unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet(Path::new("week01.xlsx")));
        assert!(is_spreadsheet(Path::new("WEEK01.XLS")));
        assert!(!is_spreadsheet(Path::new("shipments.json")));
        assert!(!is_spreadsheet(Path::new("shipments")));
    }
}
