//! Performance log background worker
//!
//! Consumes entries from the mpsc channel, stops when the channel closes.

use super::history::PerformanceHistory;
use crate::utils::logger::PERFORMANCE_TARGET;
use shared::models::PerformanceLogEntry;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct PerformanceLogWorker {
    history: Arc<PerformanceHistory>,
}

impl PerformanceLogWorker {
    pub fn new(history: Arc<PerformanceHistory>) -> Self {
        Self { history }
    }

    /// Run the worker (returns when the channel closes)
    pub async fn run(self, mut rx: mpsc::Receiver<PerformanceLogEntry>) {
        tracing::info!("Performance log worker started");

        while let Some(entry) = rx.recv().await {
            tracing::info!(
                target: PERFORMANCE_TARGET,
                request_id = %entry.request_id,
                strategy = %entry.strategy,
                party_size = entry.party_size,
                tables = ?entry.table_ids,
                confidence = entry.confidence_score,
                elapsed_ms = entry.elapsed_ms,
                revenue_impact = %entry.revenue_impact,
                utilization_improvement = entry.utilization_improvement_percent,
                recorded_at = entry.recorded_at,
                "PERFORMANCE"
            );
            self.history.push(entry);
        }

        tracing::info!("Performance log channel closed, worker stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_log::{PerformanceLogService, PerformanceLogSink};
    use shared::models::StrategyKind;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_worker_drains_until_closed() {
        let history = Arc::new(PerformanceHistory::default());
        let (service, rx) = PerformanceLogService::new(16);
        let handle = tokio::spawn(PerformanceLogWorker::new(history.clone()).run(rx));

        let entries: Vec<PerformanceLogEntry> = StrategyKind::ALL
            .iter()
            .map(|kind| PerformanceLogEntry {
                request_id: Uuid::nil(),
                strategy: *kind,
                party_size: 4,
                table_ids: vec!["t1".into()],
                confidence_score: 47.5,
                elapsed_ms: 20,
                revenue_impact: rust_decimal::Decimal::from(180),
                utilization_improvement_percent: 3.5,
                recorded_at: 1,
            })
            .collect();
        service.record_performance(entries).await.unwrap();

        drop(service);
        handle.await.unwrap();
        assert_eq!(history.len(), 3);
    }
}
