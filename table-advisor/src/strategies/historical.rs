//! Historical pattern matching strategy

use super::{
    AssignmentStrategy, StrategyInput, StrategyResult, build_recommendation,
    smallest_sufficient_table,
};
use crate::core::StrategyWeights;
use crate::providers::HistoricalPatternProvider;
use crate::scoring::ScoringModel;
use async_trait::async_trait;
use shared::error::ErrorCode;
use shared::models::{
    AssignmentRequest, DiningTable, HistoricalPattern, PatternError, Recommendation, StrategyKind,
    TableSlot,
};
use std::sync::Arc;

/// Reuses the table configuration of the most successful similar reservation
pub struct HistoricalStrategy {
    scoring: Arc<ScoringModel>,
    weights: StrategyWeights,
    patterns: Arc<dyn HistoricalPatternProvider>,
}

/// Why a pattern could not be laid onto the free tables
#[derive(Debug)]
enum MatchFailure {
    Pattern(PatternError),
    Unmatched(TableSlot),
}

impl HistoricalStrategy {
    pub fn new(
        scoring: Arc<ScoringModel>,
        weights: StrategyWeights,
        patterns: Arc<dyn HistoricalPatternProvider>,
    ) -> Self {
        Self {
            scoring,
            weights,
            patterns,
        }
    }

    /// Usable patterns, best first
    ///
    /// The provider contract is re-applied here so a lax provider cannot
    /// leak weak patterns into the result.
    async fn load_patterns(&self, request: &AssignmentRequest) -> Vec<HistoricalPattern> {
        let mut patterns = match self
            .patterns
            .find_successful_patterns(request.party_size, request.hour(), request.preferred_zone)
            .await
        {
            Ok(patterns) => patterns,
            Err(e) => {
                tracing::warn!(error = %e, "Historical patterns unavailable, using capacity match");
                Vec::new()
            }
        };
        patterns.retain(|p| p.success_rate_percent >= self.weights.min_pattern_success_rate);
        patterns.sort_by(|a, b| b.success_rate_percent.total_cmp(&a.success_rate_percent));
        patterns.truncate(self.weights.pattern_limit);
        patterns
    }

    /// Match every slot to a distinct free table of equal capacity and zone
    fn match_configuration(
        pattern: &HistoricalPattern,
        tables: &[DiningTable],
    ) -> Result<Vec<DiningTable>, MatchFailure> {
        let slots = pattern
            .table_configuration
            .slots()
            .map_err(MatchFailure::Pattern)?;

        let mut used = vec![false; tables.len()];
        let mut selection = Vec::with_capacity(slots.len());
        for slot in slots {
            let found = tables.iter().zip(&used).position(|(t, taken)| {
                !taken && t.capacity == slot.capacity && t.zone == slot.zone
            });
            match found {
                Some(i) => {
                    used[i] = true;
                    selection.push(tables[i].clone());
                }
                None => return Err(MatchFailure::Unmatched(slot)),
            }
        }
        Ok(selection)
    }

    fn capacity_match(input: &StrategyInput) -> Vec<DiningTable> {
        smallest_sufficient_table(&input.tables, input.request.party_size)
            .cloned()
            .into_iter()
            .collect()
    }

    fn fallback(&self, input: &StrategyInput) -> Recommendation {
        let selection = Self::capacity_match(input);
        build_recommendation(
            StrategyKind::Historical,
            &self.scoring,
            &selection,
            input.request.party_size,
            self.weights.fallback_confidence,
            self.weights.fallback_utilization_improvement,
            "Limited historical data available. Using basic capacity matching.".to_string(),
        )
    }
}

#[async_trait]
impl AssignmentStrategy for HistoricalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Historical
    }

    async fn recommend(&self, input: &StrategyInput) -> StrategyResult<Recommendation> {
        let patterns = self.load_patterns(&input.request).await;
        let Some(best) = patterns.first() else {
            return Ok(self.fallback(input));
        };

        let selection = match Self::match_configuration(best, &input.tables) {
            Ok(selection) => selection,
            Err(MatchFailure::Pattern(e)) => {
                tracing::debug!(
                    code = %ErrorCode::PatternMalformed,
                    error = %e,
                    "Unusable pattern configuration, using capacity match"
                );
                Self::capacity_match(input)
            }
            Err(MatchFailure::Unmatched(slot)) => {
                tracing::debug!(
                    capacity = slot.capacity,
                    zone = %slot.zone,
                    "Pattern slot has no free table, using capacity match"
                );
                Self::capacity_match(input)
            }
        };

        let confidence = (best.success_rate_percent + self.weights.pattern_confidence_bonus)
            .min(self.weights.pattern_confidence_ceiling)
            .clamp(0.0, 100.0);
        let reasoning = format!(
            "Based on historical pattern with {}% success rate. Similar reservations generated €{} average revenue.",
            best.success_rate_percent.round(),
            best.average_revenue.round()
        );

        Ok(build_recommendation(
            StrategyKind::Historical,
            &self.scoring,
            &selection,
            input.request.party_size,
            confidence,
            self.scoring.utilization_improvement(&selection),
            reasoning,
        ))
    }
}
