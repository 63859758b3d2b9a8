//! Historical reservation pattern Model

use super::zone::Zone;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One table of a recorded configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSlot {
    pub capacity: u32,
    #[serde(alias = "zone_name")]
    pub zone: Zone,
}

/// Table configuration of a pattern
///
/// The pattern store keeps configurations as serialized JSON text. Rows that
/// were already decoded upstream arrive as `Slots`; anything else stays
/// `Serialized` until [`TableConfiguration::slots`] validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableConfiguration {
    Slots(Vec<TableSlot>),
    Serialized(String),
}

/// Configuration could not be turned into table slots
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Malformed table configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Table configuration is empty")]
    Empty,
}

impl TableConfiguration {
    /// Validated slot list
    pub fn slots(&self) -> Result<Vec<TableSlot>, PatternError> {
        let slots = match self {
            TableConfiguration::Slots(slots) => slots.clone(),
            TableConfiguration::Serialized(raw) => serde_json::from_str(raw)?,
        };
        if slots.is_empty() {
            return Err(PatternError::Empty);
        }
        Ok(slots)
    }
}

impl Default for TableConfiguration {
    fn default() -> Self {
        TableConfiguration::Slots(Vec::new())
    }
}

/// Past reservation configuration with its observed outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPattern {
    pub party_size: u32,
    /// Hour bucket (0-23)
    pub time_slot_hour: u32,
    #[serde(default)]
    pub zone: Option<Zone>,
    #[serde(default)]
    pub table_configuration: TableConfiguration,
    /// Percent of reservations with this configuration that went well
    pub success_rate_percent: f64,
    pub average_revenue: Decimal,
}
