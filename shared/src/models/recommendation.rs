//! Assignment recommendation Model

use super::zone::Zone;
use crate::error::ErrorCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Candidate generator that produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Capacity efficiency
    Optimal,
    /// Zone load balancing
    Balanced,
    /// Historical pattern matching
    Historical,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Optimal,
        StrategyKind::Balanced,
        StrategyKind::Historical,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Optimal => "optimal",
            StrategyKind::Balanced => "balanced",
            StrategyKind::Historical => "historical",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate table assignment (advisory only, nothing is reserved)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: StrategyKind,
    /// Ordered, no duplicates
    pub table_ids: Vec<String>,
    pub table_labels: Vec<String>,
    /// Seats across the chosen tables
    pub estimated_capacity: u32,
    /// 0-100
    pub confidence_score: f64,
    pub revenue_impact: Decimal,
    /// 0-20
    pub utilization_improvement_percent: f64,
    pub reasoning: String,
}

impl Recommendation {
    /// Zero-confidence placeholder for a strategy that produced nothing
    pub fn empty(strategy: StrategyKind, reasoning: impl Into<String>) -> Self {
        Self {
            strategy,
            table_ids: Vec::new(),
            table_labels: Vec::new(),
            estimated_capacity: 0,
            confidence_score: 0.0,
            revenue_impact: Decimal::ZERO,
            utilization_improvement_percent: 0.0,
            reasoning: reasoning.into(),
        }
    }

    /// Whether the recommendation may be shown to the caller
    pub fn is_actionable(&self) -> bool {
        self.confidence_score > 0.0 && !self.table_ids.is_empty()
    }
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineOutcome {
    Recommended,
    NoAvailability,
    InventoryFailure,
    InvalidRequest,
}

/// Free-table overview for the requested slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    pub total_free_tables: usize,
    pub peak_hour: bool,
    pub zone_availability: BTreeMap<Zone, usize>,
}

/// Response of one assignment request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineResult {
    pub request_id: Uuid,
    pub recommendations: Vec<Recommendation>,
    pub elapsed_ms: u64,
    pub success: bool,
    pub outcome: EngineOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    pub availability: AvailabilitySummary,
}

impl EngineResult {
    pub fn recommended(
        request_id: Uuid,
        recommendations: Vec<Recommendation>,
        elapsed_ms: u64,
        availability: AvailabilitySummary,
    ) -> Self {
        Self {
            request_id,
            recommendations,
            elapsed_ms,
            success: true,
            outcome: EngineOutcome::Recommended,
            error: None,
            error_code: None,
            availability,
        }
    }

    /// Zero free tables: a successful, empty answer
    pub fn no_availability(request_id: Uuid, elapsed_ms: u64, peak_hour: bool) -> Self {
        Self {
            request_id,
            recommendations: Vec::new(),
            elapsed_ms,
            success: true,
            outcome: EngineOutcome::NoAvailability,
            error: None,
            error_code: None,
            availability: AvailabilitySummary {
                peak_hour,
                ..Default::default()
            },
        }
    }

    pub fn failure(
        request_id: Uuid,
        outcome: EngineOutcome,
        code: ErrorCode,
        message: impl Into<String>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            request_id,
            recommendations: Vec::new(),
            elapsed_ms,
            success: false,
            outcome,
            error: Some(message.into()),
            error_code: Some(code),
            availability: AvailabilitySummary::default(),
        }
    }
}

/// One record per surviving recommendation, used for offline tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLogEntry {
    pub request_id: Uuid,
    pub strategy: StrategyKind,
    pub party_size: u32,
    pub table_ids: Vec<String>,
    pub confidence_score: f64,
    pub elapsed_ms: u64,
    pub revenue_impact: Decimal,
    pub utilization_improvement_percent: f64,
    /// Unix millis
    pub recorded_at: i64,
}

impl PerformanceLogEntry {
    pub fn from_recommendation(
        request_id: Uuid,
        party_size: u32,
        elapsed_ms: u64,
        recorded_at: i64,
        rec: &Recommendation,
    ) -> Self {
        Self {
            request_id,
            strategy: rec.strategy,
            party_size,
            table_ids: rec.table_ids.clone(),
            confidence_score: rec.confidence_score,
            elapsed_ms,
            revenue_impact: rec.revenue_impact,
            utilization_improvement_percent: rec.utilization_improvement_percent,
            recorded_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_recommendation_is_not_actionable() {
        let rec = Recommendation::empty(StrategyKind::Balanced, "nothing");
        assert!(!rec.is_actionable());
        assert_eq!(rec.confidence_score, 0.0);
    }

    #[test]
    fn test_strategy_kind_serde() {
        let json = serde_json::to_string(&StrategyKind::Historical).unwrap();
        assert_eq!(json, "\"historical\"");
        let kind: StrategyKind = serde_json::from_str("\"optimal\"").unwrap();
        assert_eq!(kind, StrategyKind::Optimal);
    }

    #[test]
    fn test_failure_result_carries_code() {
        let result = EngineResult::failure(
            Uuid::nil(),
            EngineOutcome::InventoryFailure,
            ErrorCode::TableInventoryUnavailable,
            "boom",
            12,
        );
        assert!(!result.success);
        assert!(result.recommendations.is_empty());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"error_code\":7401"));
        assert!(json.contains("\"outcome\":\"inventory_failure\""));
    }

    #[test]
    fn test_no_availability_is_successful() {
        let result = EngineResult::no_availability(Uuid::nil(), 3, true);
        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.outcome, EngineOutcome::NoAvailability);
        assert!(result.availability.peak_hour);
    }
}
