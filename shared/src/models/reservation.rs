//! Reservation request Model

use super::zone::Zone;
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Table assignment request for one reservation (预订分桌请求)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    pub party_size: u32,
    /// Reservation date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Reservation time (HH:MM)
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
    #[serde(default)]
    pub preferred_zone: Option<Zone>,
    /// Informational only, never used for scoring
    #[serde(default)]
    pub special_requirements: Vec<String>,
    #[serde(default)]
    pub vip: bool,
}

impl AssignmentRequest {
    pub fn new(party_size: u32, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            party_size,
            date,
            time,
            preferred_zone: None,
            special_requirements: Vec::new(),
            vip: false,
        }
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = time;
        self
    }

    pub fn with_preferred_zone(mut self, zone: Zone) -> Self {
        self.preferred_zone = Some(zone);
        self
    }

    pub fn with_vip(mut self, vip: bool) -> Self {
        self.vip = vip;
        self
    }

    pub fn with_special_requirements(mut self, requirements: Vec<String>) -> Self {
        self.special_requirements = requirements;
        self
    }

    /// Hour bucket of the requested time (0-23)
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

/// `HH:MM` on the wire, `HH:MM:SS` also accepted
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| serde::de::Error::custom(format!("Invalid time format: {}", raw)))
    }
}
