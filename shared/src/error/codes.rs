//! Unified error codes for the table advisor
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the reservation front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,

    // ==================== 7xxx: Table ====================
    /// Free-table inventory could not be read
    TableInventoryUnavailable = 7401,
    /// No table is free for the requested slot
    NoTablesAvailable = 7402,
    /// A candidate strategy failed or timed out
    StrategyFailed = 7403,
    /// Stored historical table configuration is malformed
    PatternMalformed = 7404,

    // ==================== 9xxx: System ====================
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",

            // Table
            ErrorCode::TableInventoryUnavailable => "Table inventory unavailable",
            ErrorCode::NoTablesAvailable => "No tables available for the requested time slot",
            ErrorCode::StrategyFailed => "Assignment strategy failed",
            ErrorCode::PatternMalformed => "Historical table configuration is malformed",

            // System
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),

            // Table
            7401 => Ok(ErrorCode::TableInventoryUnavailable),
            7402 => Ok(ErrorCode::NoTablesAvailable),
            7403 => Ok(ErrorCode::StrategyFailed),
            7404 => Ok(ErrorCode::PatternMalformed),

            // System
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::TableInventoryUnavailable.code(), 7401);
        assert_eq!(ErrorCode::NoTablesAvailable.code(), 7402);
        assert_eq!(ErrorCode::StrategyFailed.code(), 7403);
        assert_eq!(ErrorCode::PatternMalformed.code(), 7404);
        assert_eq!(ErrorCode::ConfigError.code(), 9005);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(2), Ok(ErrorCode::ValidationFailed));
        assert_eq!(
            ErrorCode::try_from(7401),
            Ok(ErrorCode::TableInventoryUnavailable)
        );
        assert_eq!(ErrorCode::try_from(9005), Ok(ErrorCode::ConfigError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(7201), Err(InvalidErrorCode(7201)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::NoTablesAvailable).unwrap();
        assert_eq!(json, "7402");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("7403").unwrap();
        assert_eq!(code, ErrorCode::StrategyFailed);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::TableInventoryUnavailable), "7401");
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ErrorCode::NoTablesAvailable.message(),
            "No tables available for the requested time slot"
        );
        assert_eq!(ErrorCode::ValidationFailed.message(), "Validation failed");
    }
}
