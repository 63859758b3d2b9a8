//! Shared types for the table advisor
//!
//! Domain models exchanged between the assignment engine and the host
//! reservation service, plus the unified error codes.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ErrorCategory, ErrorCode, InvalidErrorCode};
pub use models::*;
pub use serde::{Deserialize, Serialize};
