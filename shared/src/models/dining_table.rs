//! Dining Table Model

use super::zone::Zone;
use serde::{Deserialize, Serialize};

/// Free dining table as reported by the inventory (桌台)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    /// Table number shown to staff
    pub label: String,
    pub capacity: u32,
    #[serde(default)]
    pub zone: Zone,
    /// Occupancy of this table over the current service, percent
    #[serde(default)]
    pub current_utilization_percent: Option<f64>,
}

impl DiningTable {
    pub fn new(id: impl Into<String>, capacity: u32, zone: Zone) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            capacity,
            zone,
            current_utilization_percent: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_utilization(mut self, percent: f64) -> Self {
        self.current_utilization_percent = Some(percent);
        self
    }
}

/// Total seats of a selection, saturating at `u32::MAX`
pub fn total_capacity(tables: &[DiningTable]) -> u32 {
    tables
        .iter()
        .fold(0u32, |total, t| total.saturating_add(t.capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_zone_defaults_to_main_dining() {
        let json = r#"{"id":"t1","label":"1","capacity":4}"#;
        let table: DiningTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.zone, Zone::MainDining);
        assert_eq!(table.current_utilization_percent, None);
    }

    #[test]
    fn test_total_capacity() {
        let tables = vec![
            DiningTable::new("a", 4, Zone::Terrace),
            DiningTable::new("b", 2, Zone::MainDining),
        ];
        assert_eq!(total_capacity(&tables), 6);
        assert_eq!(total_capacity(&[]), 0);
    }

    #[test]
    fn test_total_capacity_saturates() {
        let tables = vec![
            DiningTable::new("a", u32::MAX, Zone::MainDining),
            DiningTable::new("b", 4, Zone::Terrace),
        ];
        assert_eq!(total_capacity(&tables), u32::MAX);
        assert_eq!(total_capacity(&tables[1..]), 4);
    }
}
