//! HTTP request handlers for API endpoints.

pub mod exceptions;
pub mod health;
pub mod upload;

pub use exceptions::exceptions_handler;
pub use health::health_handler;
pub use upload::upload_handler;
