//! Performance log - per-recommendation records for offline tuning
//!
//! # Architecture
//!
//! ```text
//! AssignmentEngine ─spawn─► PerformanceLogSink::record_performance
//!                              │
//!                              ├─ PerformanceLogService → mpsc → PerformanceLogWorker
//!                              │                                   ├─ tracing (target "performance")
//!                              │                                   └─ PerformanceHistory
//!                              └─ PerformanceHistory (direct)
//! ```
//!
//! Writes are best-effort: the engine only warns when a sink fails.

pub mod history;
pub mod service;
pub mod worker;

use async_trait::async_trait;
use shared::models::PerformanceLogEntry;
use thiserror::Error;

pub use history::{PerformanceHistory, PerformanceReport, StrategyStats};
pub use service::PerformanceLogService;
pub use worker::PerformanceLogWorker;

/// Performance log errors
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Performance log channel is full")]
    ChannelFull,

    #[error("Performance log channel is closed")]
    ChannelClosed,

    #[error("Performance log sink failed: {0}")]
    Sink(String),
}

/// Write-only destination of performance log entries
#[async_trait]
pub trait PerformanceLogSink: Send + Sync {
    async fn record_performance(&self, entries: Vec<PerformanceLogEntry>) -> Result<(), LogError>;
}
