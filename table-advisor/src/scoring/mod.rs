//! Scoring model shared by every strategy
//!
//! Pure functions over a table selection; no I/O, no state.

use crate::core::ScoringConfig;
use rust_decimal::Decimal;
use shared::models::{DiningTable, StrategyKind, total_capacity};

#[derive(Debug, Clone, Default)]
pub struct ScoringModel {
    config: ScoringConfig,
}

impl ScoringModel {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Projected revenue of seating the party at one table
    ///
    /// `min(party, capacity) × per-person rate of the table's zone`
    pub fn revenue_impact(&self, table: &DiningTable, party_size: u32) -> Decimal {
        let seated = party_size.min(table.capacity);
        Decimal::from(seated) * self.config.revenue_tiers.rate_for(table.zone)
    }

    pub fn total_revenue(&self, tables: &[DiningTable], party_size: u32) -> Decimal {
        tables
            .iter()
            .map(|t| self.revenue_impact(t, party_size))
            .sum()
    }

    /// Confidence (0-100) that the selection suits the party
    pub fn confidence_score(
        &self,
        tables: &[DiningTable],
        party_size: u32,
        kind: StrategyKind,
    ) -> f64 {
        if tables.is_empty() || party_size == 0 {
            return 0.0;
        }

        let total = f64::from(total_capacity(tables));
        let party = f64::from(party_size);

        let capacity_score = (total / party * self.config.capacity_weight).min(100.0);
        let waste_score = if total <= party {
            100.0
        } else {
            (100.0 - (total - party) / party * self.config.waste_penalty).max(0.0)
        };
        let bonus = match kind {
            StrategyKind::Optimal => self.config.optimal_bonus,
            StrategyKind::Balanced => self.config.balanced_bonus,
            StrategyKind::Historical => self.config.historical_bonus,
        };

        let combined = (capacity_score + waste_score + bonus).min(self.config.confidence_ceiling);
        (combined / 2.0).clamp(0.0, 100.0)
    }

    /// Estimated utilization gain, percent
    pub fn utilization_improvement(&self, tables: &[DiningTable]) -> f64 {
        (tables.len() as f64 * self.config.utilization_per_table).min(self.config.utilization_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Zone;

    fn model() -> ScoringModel {
        ScoringModel::default()
    }

    #[test]
    fn test_revenue_uses_seated_guests() {
        let table = DiningTable::new("t", 4, Zone::PrivateRoom);
        assert_eq!(model().revenue_impact(&table, 2), Decimal::from(130));
        assert_eq!(model().revenue_impact(&table, 6), Decimal::from(260));
    }

    #[test]
    fn test_revenue_non_decreasing_in_seated_guests() {
        let table = DiningTable::new("t", 8, Zone::Terrace);
        let revenues: Vec<Decimal> = (1..=10).map(|p| model().revenue_impact(&table, p)).collect();
        assert!(revenues.windows(2).all(|w| w[0] <= w[1]));
        assert!(revenues.iter().all(|r| !r.is_sign_negative()));
    }

    #[test]
    fn test_total_revenue_sums_tables() {
        let tables = vec![
            DiningTable::new("a", 2, Zone::MainDining),
            DiningTable::new("b", 2, Zone::WindowSeats),
        ];
        // min(4,2)*45 + min(4,2)*55
        assert_eq!(model().total_revenue(&tables, 4), Decimal::from(200));
    }

    #[test]
    fn test_confidence_exact_fit() {
        let tables = vec![DiningTable::new("a", 4, Zone::MainDining)];
        // min(95, 50 + 100 + 15) / 2
        assert_eq!(
            model().confidence_score(&tables, 4, StrategyKind::Historical),
            47.5
        );
    }

    #[test]
    fn test_confidence_oversized_table() {
        let tables = vec![DiningTable::new("a", 8, Zone::MainDining)];
        // capacity 100, waste 100 - 1*30 = 70, bonus 10 => min(95, 180) / 2
        assert_eq!(
            model().confidence_score(&tables, 4, StrategyKind::Optimal),
            47.5
        );
    }

    #[test]
    fn test_confidence_short_capacity() {
        let tables = vec![DiningTable::new("a", 2, Zone::MainDining)];
        // capacity 25, waste 100, bonus 5 => 130 capped at 95 => 47.5
        let score = model().confidence_score(&tables, 4, StrategyKind::Balanced);
        assert_eq!(score, 47.5);

        let tiny = vec![DiningTable::new("a", 1, Zone::MainDining)];
        // capacity 2.5, waste 100, bonus 5 => 107.5 capped at 95
        assert_eq!(model().confidence_score(&tiny, 20, StrategyKind::Balanced), 47.5);
    }

    #[test]
    fn test_confidence_of_empty_selection_is_zero() {
        assert_eq!(model().confidence_score(&[], 4, StrategyKind::Optimal), 0.0);
    }

    #[test]
    fn test_utilization_improvement_is_capped() {
        let one = vec![DiningTable::new("a", 2, Zone::MainDining)];
        assert_eq!(model().utilization_improvement(&one), 3.5);

        let many: Vec<DiningTable> = (0..10)
            .map(|i| DiningTable::new(format!("t{i}"), 2, Zone::MainDining))
            .collect();
        assert_eq!(model().utilization_improvement(&many), 20.0);
    }
}
