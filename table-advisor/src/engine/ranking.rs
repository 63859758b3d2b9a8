//! Result ranking

use shared::models::Recommendation;

/// Drop empty or zero-confidence candidates, order by confidence, keep the best `limit`
///
/// The sort is stable: equal confidences keep the order the candidates were
/// produced in.
pub fn rank(candidates: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = candidates
        .into_iter()
        .filter(Recommendation::is_actionable)
        .collect();
    ranked.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StrategyKind;

    fn make_rec(kind: StrategyKind, confidence: f64, ids: &[&str]) -> Recommendation {
        let mut rec = Recommendation::empty(kind, "test");
        rec.confidence_score = confidence;
        rec.table_ids = ids.iter().map(|s| s.to_string()).collect();
        rec
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let ranked = rank(
            vec![
                make_rec(StrategyKind::Optimal, 47.5, &["a"]),
                make_rec(StrategyKind::Balanced, 0.0, &["b"]),
                make_rec(StrategyKind::Historical, 95.0, &["c"]),
            ],
            3,
        );
        let kinds: Vec<StrategyKind> = ranked.iter().map(|r| r.strategy).collect();
        assert_eq!(kinds, vec![StrategyKind::Historical, StrategyKind::Optimal]);
    }

    #[test]
    fn test_rank_drops_empty_selection() {
        let ranked = rank(vec![make_rec(StrategyKind::Historical, 30.0, &[])], 3);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_ties_keep_strategy_order() {
        let ranked = rank(
            vec![
                make_rec(StrategyKind::Optimal, 47.5, &["a"]),
                make_rec(StrategyKind::Balanced, 47.5, &["a"]),
                make_rec(StrategyKind::Historical, 47.5, &["a"]),
            ],
            2,
        );
        let kinds: Vec<StrategyKind> = ranked.iter().map(|r| r.strategy).collect();
        assert_eq!(kinds, vec![StrategyKind::Optimal, StrategyKind::Balanced]);
    }
}
