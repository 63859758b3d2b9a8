//! Candidate assignment strategies
//!
//! Each strategy turns the same immutable [`StrategyInput`] into one
//! [`Recommendation`]. Strategies never see each other's results.
//!
//! | Strategy | Optimizes for |
//! |----------|---------------|
//! | [`OptimalStrategy`] | capacity efficiency |
//! | [`BalancedStrategy`] | zone load balancing |
//! | [`HistoricalStrategy`] | configurations that worked before |

pub mod balanced;
pub mod historical;
pub mod optimal;

use crate::providers::ProviderError;
use crate::scoring::ScoringModel;
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::models::{
    AssignmentRequest, DiningTable, Recommendation, StrategyKind, total_capacity,
};
use thiserror::Error;

pub use balanced::BalancedStrategy;
pub use historical::HistoricalStrategy;
pub use optimal::OptimalStrategy;

/// Per-request snapshot shared by all strategies
#[derive(Debug, Clone)]
pub struct StrategyInput {
    pub request: AssignmentRequest,
    /// Free tables, unique ids, inventory order
    pub tables: Vec<DiningTable>,
}

impl StrategyInput {
    pub fn new(request: AssignmentRequest, tables: Vec<DiningTable>) -> Self {
        Self { request, tables }
    }
}

/// Strategy failures, isolated to the strategy that raised them
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal strategy error: {0}")]
    Internal(String),

    #[error("Strategy timed out after {0}ms")]
    Timeout(u64),

    #[error("Strategy panicked: {0}")]
    Panicked(String),
}

pub type StrategyResult<T> = Result<T, StrategyError>;

/// One candidate generator
#[async_trait]
pub trait AssignmentStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    async fn recommend(&self, input: &StrategyInput) -> StrategyResult<Recommendation>;
}

/// Assemble a recommendation from a selection
///
/// Revenue is always the scoring model's estimate over the selection;
/// confidence and utilization are supplied by the strategy.
pub(crate) fn build_recommendation(
    kind: StrategyKind,
    scoring: &ScoringModel,
    selection: &[DiningTable],
    party_size: u32,
    confidence_score: f64,
    utilization_improvement_percent: f64,
    reasoning: String,
) -> Recommendation {
    let revenue_impact: Decimal = scoring.total_revenue(selection, party_size);
    Recommendation {
        strategy: kind,
        table_ids: selection.iter().map(|t| t.id.clone()).collect(),
        table_labels: selection.iter().map(|t| t.label.clone()).collect(),
        estimated_capacity: total_capacity(selection),
        confidence_score,
        revenue_impact,
        utilization_improvement_percent,
        reasoning,
    }
}

/// Smallest free table seating the whole party; first in inventory order on ties
pub(crate) fn smallest_sufficient_table(
    tables: &[DiningTable],
    party_size: u32,
) -> Option<&DiningTable> {
    tables
        .iter()
        .filter(|t| t.capacity >= party_size)
        .min_by_key(|t| t.capacity)
}
