//! Table Advisor - smart table assignment engine
//!
//! # Architecture
//!
//! Given a reservation request, the engine reads the free-table inventory,
//! runs three independent candidate strategies concurrently and returns the
//! best few assignments ranked by confidence. It only advises: nothing is
//! reserved or locked here.
//!
//! ```text
//! providers ──► strategies (optimal │ balanced │ historical) ──► engine ──► caller
//!                                                                  │
//!                                                                  └─► performance log (fire-and-forget)
//! ```
//!
//! # Module layout
//!
//! ```text
//! table-advisor/src/
//! ├── core/          # configuration, errors
//! ├── utils/         # logger, time helpers
//! ├── providers/     # collaborator traits + in-memory implementations
//! ├── scoring/       # shared scoring model
//! ├── strategies/    # optimal, balanced, historical
//! ├── engine/        # orchestrator, ranking, availability summary
//! └── perf_log/      # performance log service, worker, history
//! ```

pub mod core;
pub mod engine;
pub mod perf_log;
pub mod providers;
pub mod scoring;
pub mod strategies;
pub mod utils;

// Re-export public types
pub use crate::core::{
    AdvisorConfig, AdvisorError, AdvisorResult, EngineConfig, ScoringConfig, StrategyWeights,
};
pub use engine::{AssignmentEngine, EngineProviders};
pub use perf_log::{
    LogError, PerformanceHistory, PerformanceLogService, PerformanceLogSink, PerformanceLogWorker,
    PerformanceReport, StrategyStats,
};
pub use providers::{
    HistoricalPatternProvider, InMemoryInventory, InMemoryPatterns, InMemoryZoneUtilization,
    ProviderError, ProviderResult, TableInventoryProvider, ZoneUtilizationProvider,
};
pub use scoring::ScoringModel;
pub use strategies::{AssignmentStrategy, StrategyError, StrategyInput};
pub use utils::{parse_date, parse_time};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
