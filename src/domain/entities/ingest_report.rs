//! Per-row results of an ingest batch.

use crate::domain::entities::UpsertOutcome;

/// What happened to one element of an ingest batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Written(UpsertOutcome),
    Failed(String),
}

/// Result for one element, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowResult {
    pub index: usize,
    /// The element's `shipment_ref` when it carried a string one.
    pub shipment_ref: Option<String>,
    pub outcome: RowOutcome,
}

/// Aggregate result of an ingest batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    pub rows: Vec<RowResult>,
}

impl IngestReport {
    /// Rows that reached the store, inserted or overwritten.
    pub fn written(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.outcome, RowOutcome::Written(_)))
            .count()
    }

    /// Rows that overwrote an existing shipment.
    pub fn updated(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.outcome == RowOutcome::Written(UpsertOutcome::Updated))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.rows.len() - self.written()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, outcome: RowOutcome) -> RowResult {
        RowResult {
            index,
            shipment_ref: Some(format!("SH-{index}")),
            outcome,
        }
    }

    #[test]
    fn test_counts() {
        let report = IngestReport {
            rows: vec![
                row(0, RowOutcome::Written(UpsertOutcome::Inserted)),
                row(1, RowOutcome::Written(UpsertOutcome::Updated)),
                row(2, RowOutcome::Failed("boom".to_string())),
            ],
        };

        assert_eq!(report.written(), 2);
        assert_eq!(report.updated(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_empty_report() {
        let report = IngestReport::default();
        assert_eq!(report.written(), 0);
        assert_eq!(report.failed(), 0);
    }
}
