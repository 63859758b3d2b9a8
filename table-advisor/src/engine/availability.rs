//! Free-table overview returned alongside the recommendations

use shared::models::{AvailabilitySummary, DiningTable};
use std::collections::BTreeMap;

pub fn summarize(tables: &[DiningTable], peak_hour: bool) -> AvailabilitySummary {
    let mut zone_availability = BTreeMap::new();
    for table in tables {
        *zone_availability.entry(table.zone).or_insert(0) += 1;
    }
    AvailabilitySummary {
        total_free_tables: tables.len(),
        peak_hour,
        zone_availability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Zone;

    #[test]
    fn test_summarize_counts_per_zone() {
        let tables = vec![
            DiningTable::new("a", 2, Zone::Terrace),
            DiningTable::new("b", 4, Zone::Terrace),
            DiningTable::new("c", 4, Zone::MainDining),
        ];
        let summary = summarize(&tables, true);
        assert_eq!(summary.total_free_tables, 3);
        assert!(summary.peak_hour);
        assert_eq!(summary.zone_availability.get(&Zone::Terrace), Some(&2));
        assert_eq!(summary.zone_availability.get(&Zone::MainDining), Some(&1));
        assert_eq!(summary.zone_availability.get(&Zone::PrivateRoom), None);
    }
}
