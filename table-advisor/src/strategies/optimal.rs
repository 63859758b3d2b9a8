//! Capacity-efficiency strategy

use super::{AssignmentStrategy, StrategyInput, StrategyResult, build_recommendation};
use crate::core::StrategyWeights;
use crate::scoring::ScoringModel;
use async_trait::async_trait;
use shared::models::{
    AssignmentRequest, DiningTable, Recommendation, StrategyKind, Zone, total_capacity,
};
use std::sync::Arc;

/// Picks the tables that seat the party with the least waste
pub struct OptimalStrategy {
    scoring: Arc<ScoringModel>,
    weights: StrategyWeights,
}

impl OptimalStrategy {
    pub fn new(scoring: Arc<ScoringModel>, weights: StrategyWeights) -> Self {
        Self { scoring, weights }
    }

    /// Per-table fit score
    ///
    /// Each table is scored against the whole party on its own.
    fn table_score(&self, table: &DiningTable, request: &AssignmentRequest) -> f64 {
        let efficiency = f64::from(request.party_size) / f64::from(table.capacity);
        let waste = if efficiency > 1.0 {
            0.0
        } else {
            1.0 - (1.0 - efficiency).abs()
        };
        let vip = if request.vip && table.zone == Zone::PrivateRoom {
            self.weights.vip_private_room_bonus
        } else {
            0.0
        };
        let utilization = if table.current_utilization_percent.unwrap_or(0.0)
            < self.weights.low_utilization_threshold_percent
        {
            self.weights.low_utilization_bonus
        } else {
            0.0
        };
        waste + vip + utilization
    }

    fn select(&self, input: &StrategyInput) -> Vec<DiningTable> {
        let party = input.request.party_size;
        if input.tables.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<(f64, &DiningTable)> = input
            .tables
            .iter()
            .map(|t| (self.table_score(t, &input.request), t))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut selected: Vec<DiningTable> = Vec::new();
        let mut remaining = i64::from(party);
        for (_, table) in ranked {
            if remaining <= 0 {
                break;
            }
            if selected.is_empty() || i64::from(table.capacity) >= remaining {
                remaining -= i64::from(table.capacity);
                selected.push(table.clone());
            }
        }

        if total_capacity(&selected) >= party {
            return selected;
        }

        // Still short: largest tables first, typical-guests-per-table count
        let count = party
            .div_ceil(self.weights.persons_per_table.max(1))
            .clamp(1, input.tables.len() as u32) as usize;
        let mut by_capacity = input.tables.clone();
        by_capacity.sort_by(|a, b| b.capacity.cmp(&a.capacity));
        by_capacity.truncate(count);
        by_capacity
    }
}

#[async_trait]
impl AssignmentStrategy for OptimalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Optimal
    }

    async fn recommend(&self, input: &StrategyInput) -> StrategyResult<Recommendation> {
        let party = input.request.party_size;
        let selection = self.select(input);
        let confidence = self
            .scoring
            .confidence_score(&selection, party, StrategyKind::Optimal);
        let utilization = self.scoring.utilization_improvement(&selection);
        let reasoning = format!(
            "Optimal capacity utilization with {}% efficiency. Selected {} table(s) with minimal waste.",
            confidence.round(),
            selection.len()
        );

        Ok(build_recommendation(
            StrategyKind::Optimal,
            &self.scoring,
            &selection,
            party,
            confidence,
            utilization,
            reasoning,
        ))
    }
}
