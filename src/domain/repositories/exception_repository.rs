//! Repository trait for rule-violation exceptions.

use crate::domain::entities::{ExceptionRecord, NewException};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the `exceptions` table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgExceptionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExceptionRepository: Send + Sync {
    /// Lists every exception joined to its shipment, oldest first.
    ///
    /// Exceptions whose shipment no longer exists are not returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] if the store is unreachable.
    /// Returns [`AppError::Database`] on query errors.
    async fn list_with_shipments(&self) -> Result<Vec<ExceptionRecord>, AppError>;

    /// Inserts an exception and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if the shipment id does not exist or the
    /// row is rejected.
    async fn create(&self, new_exception: NewException) -> Result<i64, AppError>;

    /// Counts stored exceptions.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Connection`] or [`AppError::Database`] on store errors.
    async fn count(&self) -> Result<i64, AppError>;
}
