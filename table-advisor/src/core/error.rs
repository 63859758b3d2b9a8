//! Advisor error types

use crate::providers::ProviderError;
use shared::error::ErrorCode;
use thiserror::Error;

/// Errors surfaced by the advisor
///
/// Only configuration errors escape as `Err`; request-level errors are folded
/// into the `EngineResult` the caller receives.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Request outside the accepted bounds
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Free-table inventory could not be read
    #[error("Table inventory unavailable: {0}")]
    Inventory(#[from] ProviderError),
}

impl AdvisorError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AdvisorError::Config(_) => ErrorCode::ConfigError,
            AdvisorError::Validation(_) => ErrorCode::ValidationFailed,
            AdvisorError::Inventory(_) => ErrorCode::TableInventoryUnavailable,
        }
    }
}

/// Result type for advisor operations
pub type AdvisorResult<T> = Result<T, AdvisorError>;
