//! Unified error codes
//!
//! - [`ErrorCode`]: Standardized error codes carried in engine results
//! - [`ErrorCategory`]: Classification of errors by code range
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 7xxx: Table errors
//! - 9xxx: System errors

mod category;
mod codes;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
