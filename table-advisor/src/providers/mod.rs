//! Collaborator providers
//!
//! The engine reads everything it knows about the floor through these
//! traits. Hosts inject their own implementations as `Arc<dyn _>`; the
//! in-memory ones in [`memory`] serve preloaded data and tests.

pub mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shared::models::{DiningTable, HistoricalPattern, Zone, ZoneUtilizationTarget};
use thiserror::Error;

pub use memory::{InMemoryInventory, InMemoryPatterns, InMemoryZoneUtilization};

/// Provider errors
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Backing store unreachable or refused the query
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Call exceeded its budget (milliseconds)
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Store returned data that could not be decoded
    #[error("Malformed provider data: {0}")]
    Malformed(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Tables free at a given date and time
#[async_trait]
pub trait TableInventoryProvider: Send + Sync {
    async fn list_free_tables(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ProviderResult<Vec<DiningTable>>;
}

/// Per-zone occupancy against its target
#[async_trait]
pub trait ZoneUtilizationProvider: Send + Sync {
    async fn list_zone_utilization(&self) -> ProviderResult<Vec<ZoneUtilizationTarget>>;
}

/// Past successful configurations
///
/// Contract: patterns for exactly `party_size` and `hour`, restricted to
/// `zone` when given, success rate ≥ 80, ordered by success rate
/// descending, at most 5.
#[async_trait]
pub trait HistoricalPatternProvider: Send + Sync {
    async fn find_successful_patterns(
        &self,
        party_size: u32,
        hour: u32,
        zone: Option<Zone>,
    ) -> ProviderResult<Vec<HistoricalPattern>>;
}
