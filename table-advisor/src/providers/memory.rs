//! In-memory providers

use super::{
    HistoricalPatternProvider, ProviderResult, TableInventoryProvider, ZoneUtilizationProvider,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use parking_lot::RwLock;
use shared::models::{DiningTable, HistoricalPattern, Zone, ZoneUtilizationTarget};
use std::collections::HashMap;

// =============================================================================
// Inventory
// =============================================================================

/// Free tables, either one list for every slot or overridden per slot
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    tables: RwLock<Vec<DiningTable>>,
    by_slot: RwLock<HashMap<(NaiveDate, NaiveTime), Vec<DiningTable>>>,
}

impl InMemoryInventory {
    pub fn new(tables: Vec<DiningTable>) -> Self {
        Self {
            tables: RwLock::new(tables),
            by_slot: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the list served for slots without an override
    pub fn set_tables(&self, tables: Vec<DiningTable>) {
        *self.tables.write() = tables;
    }

    /// Serve `tables` for this exact date and time
    pub fn set_slot(&self, date: NaiveDate, time: NaiveTime, tables: Vec<DiningTable>) {
        self.by_slot.write().insert((date, time), tables);
    }
}

#[async_trait]
impl TableInventoryProvider for InMemoryInventory {
    async fn list_free_tables(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> ProviderResult<Vec<DiningTable>> {
        if let Some(tables) = self.by_slot.read().get(&(date, time)) {
            return Ok(tables.clone());
        }
        Ok(self.tables.read().clone())
    }
}

// =============================================================================
// Zone utilization
// =============================================================================

#[derive(Debug, Default)]
pub struct InMemoryZoneUtilization {
    zones: RwLock<Vec<ZoneUtilizationTarget>>,
}

impl InMemoryZoneUtilization {
    pub fn new(zones: Vec<ZoneUtilizationTarget>) -> Self {
        Self {
            zones: RwLock::new(zones),
        }
    }

    /// Update the current occupancy of a zone, adding it with `target` if unknown
    pub fn record(&self, zone: Zone, target_percent: f64, current_percent: f64) {
        let mut zones = self.zones.write();
        match zones.iter_mut().find(|z| z.zone == zone) {
            Some(entry) => {
                entry.target_percent = target_percent;
                entry.current_percent = current_percent;
            }
            None => zones.push(ZoneUtilizationTarget::new(
                zone,
                target_percent,
                current_percent,
            )),
        }
    }
}

#[async_trait]
impl ZoneUtilizationProvider for InMemoryZoneUtilization {
    async fn list_zone_utilization(&self) -> ProviderResult<Vec<ZoneUtilizationTarget>> {
        Ok(self.zones.read().clone())
    }
}

// =============================================================================
// Historical patterns
// =============================================================================

/// Pattern store implementing the full query contract
#[derive(Debug)]
pub struct InMemoryPatterns {
    patterns: RwLock<Vec<HistoricalPattern>>,
    min_success_rate: f64,
    limit: usize,
}

impl InMemoryPatterns {
    pub const DEFAULT_MIN_SUCCESS_RATE: f64 = 80.0;
    pub const DEFAULT_LIMIT: usize = 5;

    pub fn new(patterns: Vec<HistoricalPattern>) -> Self {
        Self {
            patterns: RwLock::new(patterns),
            min_success_rate: Self::DEFAULT_MIN_SUCCESS_RATE,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_thresholds(mut self, min_success_rate: f64, limit: usize) -> Self {
        self.min_success_rate = min_success_rate;
        self.limit = limit;
        self
    }

    pub fn push(&self, pattern: HistoricalPattern) {
        self.patterns.write().push(pattern);
    }
}

impl Default for InMemoryPatterns {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl HistoricalPatternProvider for InMemoryPatterns {
    async fn find_successful_patterns(
        &self,
        party_size: u32,
        hour: u32,
        zone: Option<Zone>,
    ) -> ProviderResult<Vec<HistoricalPattern>> {
        let mut matches: Vec<HistoricalPattern> = self
            .patterns
            .read()
            .iter()
            .filter(|p| p.party_size == party_size && p.time_slot_hour == hour)
            .filter(|p| zone.is_none() || p.zone == zone)
            .filter(|p| p.success_rate_percent >= self.min_success_rate)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.success_rate_percent.total_cmp(&a.success_rate_percent));
        matches.truncate(self.limit);
        Ok(matches)
    }
}
