//! Zone load-balancing strategy

use super::{AssignmentStrategy, StrategyInput, StrategyResult, build_recommendation};
use crate::core::StrategyWeights;
use crate::providers::ZoneUtilizationProvider;
use crate::scoring::ScoringModel;
use async_trait::async_trait;
use shared::models::{
    AssignmentRequest, DiningTable, Recommendation, StrategyKind, Zone, ZoneUtilizationTarget,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Spreads parties over the zones furthest below their occupancy target
pub struct BalancedStrategy {
    scoring: Arc<ScoringModel>,
    weights: StrategyWeights,
    zones: Arc<dyn ZoneUtilizationProvider>,
}

impl BalancedStrategy {
    pub fn new(
        scoring: Arc<ScoringModel>,
        weights: StrategyWeights,
        zones: Arc<dyn ZoneUtilizationProvider>,
    ) -> Self {
        Self {
            scoring,
            weights,
            zones,
        }
    }

    /// Zone utilization, empty when the provider fails
    async fn load_zones(&self) -> Vec<ZoneUtilizationTarget> {
        match self.zones.list_zone_utilization().await {
            Ok(zones) => zones,
            Err(e) => {
                tracing::warn!(error = %e, "Zone utilization unavailable, skipping balancing");
                Vec::new()
            }
        }
    }

    fn balance_score(&self, zone: Zone, utilization: &[ZoneUtilizationTarget]) -> f64 {
        let (target, current) = utilization
            .iter()
            .find(|z| z.zone == zone)
            .map(|z| (z.target_percent, z.current_percent))
            .unwrap_or((self.weights.default_zone_target_percent, 0.0));
        if target <= 0.0 {
            return 0.0;
        }
        ((target - current) / target).max(0.0)
    }

    fn table_score(
        &self,
        table: &DiningTable,
        request: &AssignmentRequest,
        utilization: &[ZoneUtilizationTarget],
    ) -> f64 {
        let balance = self.balance_score(table.zone, utilization);
        let preference = if request.preferred_zone == Some(table.zone) {
            self.weights.preferred_zone_bonus
        } else {
            0.0
        };
        let capacity = (f64::from(request.party_size) / f64::from(table.capacity)).min(1.0);
        balance + preference + capacity
    }

    fn select(
        &self,
        input: &StrategyInput,
        utilization: &[ZoneUtilizationTarget],
    ) -> Vec<DiningTable> {
        // Best table per zone, zones in first-seen order
        let mut representatives: Vec<(f64, &DiningTable)> = Vec::new();
        for table in &input.tables {
            let score = self.table_score(table, &input.request, utilization);
            match representatives.iter_mut().find(|(_, t)| t.zone == table.zone) {
                Some(entry) if score > entry.0 => *entry = (score, table),
                Some(_) => {}
                None => representatives.push((score, table)),
            }
        }
        representatives.sort_by(|a, b| b.0.total_cmp(&a.0));

        let mut selected = Vec::new();
        let mut remaining = i64::from(input.request.party_size);
        for (_, table) in representatives {
            if remaining <= 0 {
                break;
            }
            if table.capacity > 0 {
                remaining -= i64::from(table.capacity);
                selected.push(table.clone());
            }
        }
        selected
    }
}

#[async_trait]
impl AssignmentStrategy for BalancedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Balanced
    }

    async fn recommend(&self, input: &StrategyInput) -> StrategyResult<Recommendation> {
        let party = input.request.party_size;
        let utilization = self.load_zones().await;
        let selection = self.select(input, &utilization);

        let zones_used: BTreeSet<Zone> = selection.iter().map(|t| t.zone).collect();
        let confidence = self
            .scoring
            .confidence_score(&selection, party, StrategyKind::Balanced);
        let reasoning = format!(
            "Balanced zone distribution optimizing restaurant flow. Selected tables across {} zones.",
            zones_used.len()
        );

        Ok(build_recommendation(
            StrategyKind::Balanced,
            &self.scoring,
            &selection,
            party,
            confidence,
            self.scoring.utilization_improvement(&selection),
            reasoning,
        ))
    }
}
