//! Bounded in-memory performance history

use super::{LogError, PerformanceLogSink};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{PerformanceLogEntry, StrategyKind};
use std::collections::{BTreeMap, VecDeque};

pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Entries considered by [`PerformanceHistory::recommend_strategy`]
const RECENT_WINDOW: usize = 100;
const MIN_RECENT_SAMPLES: usize = 10;
const MIN_STRATEGY_SAMPLES: usize = 3;
const MAX_ACCEPTABLE_AVG_MS: f64 = 200.0;

/// Aggregates of one strategy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyStats {
    pub requests: usize,
    pub avg_elapsed_ms: f64,
    pub p95_elapsed_ms: u64,
    pub avg_confidence: f64,
    pub avg_revenue_impact: Decimal,
    pub avg_utilization_improvement: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_entries: usize,
    pub strategies: BTreeMap<StrategyKind, StrategyStats>,
    pub total_revenue_impact: Decimal,
}

/// Keeps the most recent entries, oldest dropped first
#[derive(Debug)]
pub struct PerformanceHistory {
    entries: Mutex<VecDeque<PerformanceLogEntry>>,
    capacity: usize,
}

impl Default for PerformanceHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

fn percentile_95(mut values: Vec<u64>) -> u64 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let index = (values.len() * 95 / 100).min(values.len() - 1);
    values[index]
}

fn stats_for(entries: &[&PerformanceLogEntry]) -> StrategyStats {
    let count = entries.len();
    if count == 0 {
        return StrategyStats::default();
    }
    let n = count as f64;
    let revenue: Decimal = entries.iter().map(|e| e.revenue_impact).sum();
    StrategyStats {
        requests: count,
        avg_elapsed_ms: entries.iter().map(|e| e.elapsed_ms as f64).sum::<f64>() / n,
        p95_elapsed_ms: percentile_95(entries.iter().map(|e| e.elapsed_ms).collect()),
        avg_confidence: entries.iter().map(|e| e.confidence_score).sum::<f64>() / n,
        avg_revenue_impact: revenue / Decimal::from(count),
        avg_utilization_improvement: entries
            .iter()
            .map(|e| e.utilization_improvement_percent)
            .sum::<f64>()
            / n,
    }
}

impl PerformanceHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn push(&self, entry: PerformanceLogEntry) {
        let mut entries = self.entries.lock();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy of the retained entries, oldest first
    pub fn entries(&self) -> Vec<PerformanceLogEntry> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn report(&self) -> PerformanceReport {
        let entries = self.entries.lock();
        let mut strategies = BTreeMap::new();
        for kind in StrategyKind::ALL {
            let of_kind: Vec<&PerformanceLogEntry> =
                entries.iter().filter(|e| e.strategy == kind).collect();
            if !of_kind.is_empty() {
                strategies.insert(kind, stats_for(&of_kind));
            }
        }
        PerformanceReport {
            total_entries: entries.len(),
            strategies,
            total_revenue_impact: entries.iter().map(|e| e.revenue_impact).sum(),
        }
    }

    /// Strategy with the best average utilization gain over recent entries
    ///
    /// Only strategies with at least 3 recent samples averaging under 200 ms
    /// qualify. Falls back to optimal with fewer than 10 recent entries or no
    /// qualifying strategy.
    pub fn recommend_strategy(&self) -> StrategyKind {
        let entries = self.entries.lock();
        let skip = entries.len().saturating_sub(RECENT_WINDOW);
        let recent: Vec<&PerformanceLogEntry> = entries.iter().skip(skip).collect();
        if recent.len() < MIN_RECENT_SAMPLES {
            return StrategyKind::Optimal;
        }

        let mut best: Option<(StrategyKind, f64)> = None;
        for kind in StrategyKind::ALL {
            let of_kind: Vec<&PerformanceLogEntry> = recent
                .iter()
                .copied()
                .filter(|e| e.strategy == kind)
                .collect();
            let stats = stats_for(&of_kind);
            if stats.requests < MIN_STRATEGY_SAMPLES || stats.avg_elapsed_ms >= MAX_ACCEPTABLE_AVG_MS
            {
                continue;
            }
            if best.is_none_or(|(_, score)| stats.avg_utilization_improvement > score) {
                best = Some((kind, stats.avg_utilization_improvement));
            }
        }
        best.map(|(kind, _)| kind).unwrap_or(StrategyKind::Optimal)
    }
}

#[async_trait]
impl PerformanceLogSink for PerformanceHistory {
    async fn record_performance(&self, entries: Vec<PerformanceLogEntry>) -> Result<(), LogError> {
        for entry in entries {
            self.push(entry);
        }
        Ok(())
    }
}
