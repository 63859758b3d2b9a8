//! Assignment engine - request orchestration
//!
//! ```text
//! Validate → FetchInventory ─┬─ empty ──► NoAvailability
//!                            └─ tables ─► join!(optimal, balanced, historical)
//!                                           → rank → spawn(log) → Recommended
//! ```
//!
//! Each strategy runs as its own spawned task under a timeout, so one
//! failing or blocking strategy only removes its own candidate. A task that
//! overruns its budget is aborted and its late result discarded. The
//! inventory fetch runs the same way and is the only step whose failure ends
//! the request.

pub mod availability;
pub mod ranking;

use crate::core::{AdvisorConfig, AdvisorError, AdvisorResult, EngineConfig};
use crate::perf_log::PerformanceLogSink;
use crate::providers::{
    HistoricalPatternProvider, ProviderError, TableInventoryProvider, ZoneUtilizationProvider,
};
use crate::scoring::ScoringModel;
use crate::strategies::{
    AssignmentStrategy, BalancedStrategy, HistoricalStrategy, OptimalStrategy, StrategyError,
    StrategyInput,
};
use shared::error::ErrorCode;
use shared::models::{
    AssignmentRequest, DiningTable, EngineOutcome, EngineResult, PerformanceLogEntry,
    Recommendation,
};
use shared::util::{dedup_by_key, now_millis};
use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinHandle};
use tracing::{Instrument, instrument};
use uuid::Uuid;

/// Collaborators injected into the engine
#[derive(Clone)]
pub struct EngineProviders {
    pub inventory: Arc<dyn TableInventoryProvider>,
    pub zones: Arc<dyn ZoneUtilizationProvider>,
    pub patterns: Arc<dyn HistoricalPatternProvider>,
    pub log_sink: Arc<dyn PerformanceLogSink>,
}

/// Smart table assignment engine
///
/// Stateless between calls; share it behind an `Arc` across request handlers.
pub struct AssignmentEngine {
    inventory: Arc<dyn TableInventoryProvider>,
    log_sink: Arc<dyn PerformanceLogSink>,
    /// Run order doubles as the tie-break order when ranking
    strategies: [Arc<dyn AssignmentStrategy>; 3],
    config: EngineConfig,
}

impl std::fmt::Debug for AssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

/// Why a spawned task produced no value
enum TaskFailure {
    TimedOut,
    Panicked(String),
    Cancelled,
}

impl From<JoinError> for TaskFailure {
    fn from(e: JoinError) -> Self {
        if e.is_panic() {
            TaskFailure::Panicked(panic_message(e.into_panic().as_ref()))
        } else {
            TaskFailure::Cancelled
        }
    }
}

/// Await a spawned task for at most `budget`, aborting it on expiry
async fn join_within<T>(mut handle: JoinHandle<T>, budget: Duration) -> Result<T, TaskFailure> {
    match tokio::time::timeout(budget, &mut handle).await {
        Ok(joined) => joined.map_err(TaskFailure::from),
        Err(_) => {
            handle.abort();
            Err(TaskFailure::TimedOut)
        }
    }
}

impl AssignmentEngine {
    pub fn new(providers: EngineProviders, config: AdvisorConfig) -> AdvisorResult<Self> {
        config.validate()?;

        let scoring = Arc::new(ScoringModel::new(config.scoring.clone()));
        let strategies: [Arc<dyn AssignmentStrategy>; 3] = [
            Arc::new(OptimalStrategy::new(scoring.clone(), config.weights.clone())),
            Arc::new(BalancedStrategy::new(
                scoring.clone(),
                config.weights.clone(),
                providers.zones,
            )),
            Arc::new(HistoricalStrategy::new(
                scoring,
                config.weights.clone(),
                providers.patterns,
            )),
        ];

        Ok(Self {
            inventory: providers.inventory,
            log_sink: providers.log_sink,
            strategies,
            config: config.engine,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Up to `max_recommendations` ranked table assignments for the request
    ///
    /// Never fails: every error is folded into the returned [`EngineResult`].
    pub async fn get_smart_assignments(&self, request: &AssignmentRequest) -> EngineResult {
        self.assign(Uuid::new_v4(), request).await
    }

    #[instrument(
        name = "smart_assignment",
        skip_all,
        fields(
            request_id = %request_id,
            party_size = request.party_size,
            date = %request.date,
            time = %request.time
        )
    )]
    async fn assign(&self, request_id: Uuid, request: &AssignmentRequest) -> EngineResult {
        let started = Instant::now();

        if let Err(e) = self.validate(request) {
            tracing::info!(
                code = %e.error_code(),
                category = e.error_code().category().name(),
                error = %e,
                "Rejected assignment request"
            );
            return EngineResult::failure(
                request_id,
                EngineOutcome::InvalidRequest,
                e.error_code(),
                e.to_string(),
                elapsed_ms(started),
            );
        }

        let tables = match self.fetch_inventory(request).await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::error!(
                    code = %e.error_code(),
                    category = e.error_code().category().name(),
                    error = %e,
                    "Table inventory fetch failed"
                );
                return EngineResult::failure(
                    request_id,
                    EngineOutcome::InventoryFailure,
                    e.error_code(),
                    e.to_string(),
                    elapsed_ms(started),
                );
            }
        };

        let peak_hour = self.config.is_peak_hour(request.hour());
        if tables.is_empty() {
            tracing::info!(code = %ErrorCode::NoTablesAvailable, "No free tables for requested slot");
            return EngineResult::no_availability(request_id, elapsed_ms(started), peak_hour);
        }

        let availability = availability::summarize(&tables, peak_hour);
        let snapshot = Arc::new(StrategyInput::new(request.clone(), tables));

        let [optimal, balanced, historical] = &self.strategies;
        let (optimal, balanced, historical) = tokio::join!(
            self.run_isolated(optimal.clone(), snapshot.clone()),
            self.run_isolated(balanced.clone(), snapshot.clone()),
            self.run_isolated(historical.clone(), snapshot),
        );

        let recommendations = ranking::rank(
            vec![optimal, balanced, historical],
            self.config.max_recommendations,
        );
        let elapsed = elapsed_ms(started);

        self.emit_performance_log(request_id, request.party_size, elapsed, &recommendations);

        if elapsed > self.config.slow_response_warn_ms {
            tracing::warn!(
                elapsed_ms = elapsed,
                threshold_ms = self.config.slow_response_warn_ms,
                "Slow assignment response"
            );
        } else {
            tracing::debug!(
                elapsed_ms = elapsed,
                recommendations = recommendations.len(),
                "Assignment completed"
            );
        }

        EngineResult::recommended(request_id, recommendations, elapsed, availability)
    }

    fn validate(&self, request: &AssignmentRequest) -> AdvisorResult<()> {
        if request.party_size == 0 || request.party_size > self.config.max_party_size {
            return Err(AdvisorError::Validation(format!(
                "party size must be between 1 and {}, got {}",
                self.config.max_party_size, request.party_size
            )));
        }
        Ok(())
    }

    /// Free tables for the slot, unique by id, zero-capacity rows dropped
    async fn fetch_inventory(&self, request: &AssignmentRequest) -> AdvisorResult<Vec<DiningTable>> {
        let inventory = self.inventory.clone();
        let (date, time) = (request.date, request.time);
        let handle = tokio::spawn(
            async move { inventory.list_free_tables(date, time).await }.in_current_span(),
        );

        let tables = match join_within(handle, self.config.inventory_timeout()).await {
            Ok(result) => result?,
            Err(TaskFailure::TimedOut) => {
                return Err(ProviderError::Timeout(self.config.inventory_timeout_ms).into());
            }
            Err(TaskFailure::Panicked(message)) => {
                return Err(ProviderError::Unavailable(format!(
                    "inventory provider panicked: {message}"
                ))
                .into());
            }
            Err(TaskFailure::Cancelled) => {
                return Err(
                    ProviderError::Unavailable("inventory fetch was cancelled".into()).into(),
                );
            }
        };

        let fetched = tables.len();
        let tables: Vec<DiningTable> = dedup_by_key(tables, |t| t.id.clone())
            .into_iter()
            .filter(|t| t.capacity > 0)
            .collect();
        if tables.len() != fetched {
            tracing::warn!(
                fetched,
                kept = tables.len(),
                "Dropped duplicate or zero-capacity tables from inventory"
            );
        }
        Ok(tables)
    }

    /// One strategy as its own task under the strategy budget
    ///
    /// Any failure becomes a zero-confidence empty candidate for that strategy.
    async fn run_isolated(
        &self,
        strategy: Arc<dyn AssignmentStrategy>,
        input: Arc<StrategyInput>,
    ) -> Recommendation {
        let kind = strategy.kind();
        let handle =
            tokio::spawn(async move { strategy.recommend(&input).await }.in_current_span());

        let result = match join_within(handle, self.config.strategy_timeout()).await {
            Ok(result) => result,
            Err(TaskFailure::TimedOut) => {
                Err(StrategyError::Timeout(self.config.strategy_timeout_ms))
            }
            Err(TaskFailure::Panicked(message)) => Err(StrategyError::Panicked(message)),
            Err(TaskFailure::Cancelled) => {
                Err(StrategyError::Internal("strategy task was cancelled".into()))
            }
        };

        match result {
            Ok(rec) => {
                tracing::debug!(
                    strategy = %kind,
                    confidence = rec.confidence_score,
                    tables = rec.table_ids.len(),
                    "Strategy produced candidate"
                );
                rec
            }
            Err(e) => {
                tracing::warn!(
                    strategy = %kind,
                    code = %ErrorCode::StrategyFailed,
                    error = %e,
                    "Strategy failed, excluding its candidate"
                );
                Recommendation::empty(kind, e.to_string())
            }
        }
    }

    /// Hand the surviving recommendations to the log sink without waiting
    fn emit_performance_log(
        &self,
        request_id: Uuid,
        party_size: u32,
        elapsed_ms: u64,
        recommendations: &[Recommendation],
    ) {
        if recommendations.is_empty() {
            return;
        }

        let recorded_at = now_millis();
        let entries: Vec<PerformanceLogEntry> = recommendations
            .iter()
            .map(|rec| {
                PerformanceLogEntry::from_recommendation(
                    request_id,
                    party_size,
                    elapsed_ms,
                    recorded_at,
                    rec,
                )
            })
            .collect();

        let sink = self.log_sink.clone();
        let budget = self.config.log_timeout();
        tokio::spawn(async move {
            let count = entries.len();
            match tokio::time::timeout(budget, sink.record_performance(entries)).await {
                Ok(Ok(())) => {
                    tracing::debug!(%request_id, entries = count, "Performance log written");
                }
                Ok(Err(e)) => {
                    tracing::warn!(%request_id, error = %e, "Failed to write performance log");
                }
                Err(_) => {
                    tracing::warn!(%request_id, "Performance log write timed out");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf_log::PerformanceHistory;
    use crate::providers::{InMemoryInventory, InMemoryPatterns, InMemoryZoneUtilization};
    use chrono::{NaiveDate, NaiveTime, Timelike};
    use shared::models::{StrategyKind, Zone};

    fn make_request(party_size: u32) -> AssignmentRequest {
        AssignmentRequest::new(
            party_size,
            NaiveDate::from_ymd_opt(2026, 9, 4).unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        )
    }

    fn make_engine(tables: Vec<DiningTable>) -> (AssignmentEngine, Arc<PerformanceHistory>) {
        let history = Arc::new(PerformanceHistory::default());
        let providers = EngineProviders {
            inventory: Arc::new(InMemoryInventory::new(tables)),
            zones: Arc::new(InMemoryZoneUtilization::default()),
            patterns: Arc::new(InMemoryPatterns::default()),
            log_sink: history.clone(),
        };
        let engine = AssignmentEngine::new(providers, AdvisorConfig::default()).unwrap();
        (engine, history)
    }

    #[tokio::test]
    async fn test_invalid_party_size_is_rejected() {
        let (engine, _) = make_engine(vec![DiningTable::new("t1", 4, Zone::MainDining)]);

        for party in [0, 21] {
            let result = engine.get_smart_assignments(&make_request(party)).await;
            assert!(!result.success);
            assert_eq!(result.outcome, EngineOutcome::InvalidRequest);
            assert_eq!(result.error_code, Some(ErrorCode::ValidationFailed));
            assert!(result.recommendations.is_empty());
        }
    }

    #[tokio::test]
    async fn test_duplicate_tables_are_collapsed() {
        let (engine, _) = make_engine(vec![
            DiningTable::new("t1", 4, Zone::MainDining),
            DiningTable::new("t1", 4, Zone::MainDining),
            DiningTable::new("t0", 0, Zone::Terrace),
        ]);
        let result = engine.get_smart_assignments(&make_request(4)).await;
        assert_eq!(result.availability.total_free_tables, 1);
        for rec in &result.recommendations {
            assert_eq!(rec.table_ids, vec!["t1"]);
        }
    }

    #[tokio::test]
    async fn test_peak_hour_flag() {
        let (engine, _) = make_engine(vec![DiningTable::new("t1", 4, Zone::MainDining)]);
        let result = engine.get_smart_assignments(&make_request(2)).await;
        assert!(result.availability.peak_hour);

        let lunch = make_request(2).with_time(NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        let result = engine.get_smart_assignments(&lunch).await;
        assert!(!result.availability.peak_hour);
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = AdvisorConfig::default();
        config.engine.max_recommendations = 0;
        let providers = EngineProviders {
            inventory: Arc::new(InMemoryInventory::default()),
            zones: Arc::new(InMemoryZoneUtilization::default()),
            patterns: Arc::new(InMemoryPatterns::default()),
            log_sink: Arc::new(PerformanceHistory::default()),
        };
        let err = AssignmentEngine::new(providers, config).unwrap_err();
        assert_eq!(err.error_code(), ErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn test_performance_log_receives_surviving_recommendations() {
        let (engine, history) = make_engine(vec![DiningTable::new("t1", 4, Zone::MainDining)]);
        let result = engine.get_smart_assignments(&make_request(4)).await;
        assert!(!result.recommendations.is_empty());

        // The log write runs on a spawned task
        for _ in 0..50 {
            if history.len() == result.recommendations.len() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(history.len(), result.recommendations.len());
        let report = history.report();
        assert!(report.strategies.contains_key(&StrategyKind::Historical));
    }

    #[test]
    fn test_panic_message_extraction() {
        let boxed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(boxed.as_ref()), "static message");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(boxed.as_ref()), "Unknown panic");
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_within_times_out_overrunning_task() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            1
        });
        let result = join_within(handle, Duration::from_millis(50)).await;
        assert!(matches!(result, Err(TaskFailure::TimedOut)));
    }

    #[tokio::test]
    async fn test_join_within_reports_panics() {
        let handle = tokio::spawn(async {
            if NaiveTime::MIN.hour() == 0 {
                panic!("scoring overflow");
            }
            1
        });
        let result = join_within(handle, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(TaskFailure::Panicked(ref m)) if m == "scoring overflow"));
    }

    #[tokio::test]
    async fn test_join_within_returns_value() {
        let handle = tokio::spawn(async { 7 });
        let result = join_within(handle, Duration::from_secs(1)).await;
        assert!(matches!(result, Ok(7)));
    }
}
