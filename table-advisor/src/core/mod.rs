//! Core module - advisor configuration and error definitions
//!
//! # Module structure
//!
//! - [`AdvisorConfig`] - scoring, strategy and engine settings
//! - [`AdvisorError`] - advisor error

pub mod config;
pub mod error;

pub use config::{AdvisorConfig, EngineConfig, ScoringConfig, StrategyWeights, ZoneRevenueTiers};
pub use error::{AdvisorError, AdvisorResult};
