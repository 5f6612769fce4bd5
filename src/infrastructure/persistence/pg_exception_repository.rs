//! PostgreSQL implementation of exception repository.

use async_trait::async_trait;

use crate::domain::entities::{ExceptionRecord, NewException};
use crate::domain::repositories::ExceptionRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::ConnectionProvider;

#[derive(sqlx::FromRow)]
struct ExceptionRow {
    shipment_ref: String,
    rule_code: String,
    rule_description: Option<String>,
    severity: String,
    exception_value: Option<String>,
}

impl From<ExceptionRow> for ExceptionRecord {
    fn from(r: ExceptionRow) -> Self {
        ExceptionRecord {
            shipment_ref: r.shipment_ref,
            rule_code: r.rule_code,
            rule_description: r.rule_description,
            severity: r.severity,
            exception_value: r.exception_value,
        }
    }
}

/// PostgreSQL repository for rule-violation exceptions.
pub struct PgExceptionRepository {
    connections: ConnectionProvider,
}

impl PgExceptionRepository {
    /// Creates a new repository on top of a connection provider.
    pub fn new(connections: ConnectionProvider) -> Self {
        Self { connections }
    }
}

#[async_trait]
impl ExceptionRepository for PgExceptionRepository {
    async fn list_with_shipments(&self) -> Result<Vec<ExceptionRecord>, AppError> {
        let mut conn = self.connections.acquire().await?;

        let rows = sqlx::query_as::<_, ExceptionRow>(
            r#"
            SELECT s.shipment_ref, e.rule_code, e.rule_description, e.severity, e.exception_value
            FROM exceptions e
            JOIN shipments s ON e.shipment_id = s.id
            ORDER BY e.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows.into_iter().map(ExceptionRecord::from).collect())
    }

    async fn create(&self, new_exception: NewException) -> Result<i64, AppError> {
        let mut conn = self.connections.acquire().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO exceptions (shipment_id, rule_code, rule_description, severity, exception_value)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(new_exception.shipment_id)
        .bind(&new_exception.rule_code)
        .bind(&new_exception.rule_description)
        .bind(&new_exception.severity)
        .bind(&new_exception.exception_value)
        .fetch_one(&mut *conn)
        .await?;

        Ok(id)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let mut conn = self.connections.acquire().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM exceptions")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}
