//! Zone Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Seating zone (包厢、靠窗、露台、大厅)
///
/// Closed set: every zone carries its own revenue tier and utilization
/// target. Declaration order is the revenue tier order, highest first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    PrivateRoom,
    WindowSeats,
    Terrace,
    /// Tables without an explicit zone are seated in the main dining room
    #[default]
    MainDining,
}

impl Zone {
    pub const ALL: [Zone; 4] = [
        Zone::PrivateRoom,
        Zone::WindowSeats,
        Zone::Terrace,
        Zone::MainDining,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Zone::PrivateRoom => "private_room",
            Zone::WindowSeats => "window_seats",
            Zone::Terrace => "terrace",
            Zone::MainDining => "main_dining",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occupancy target of one zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneUtilizationTarget {
    pub zone: Zone,
    /// Desired occupancy, percent
    pub target_percent: f64,
    /// Occupancy right now, percent
    pub current_percent: f64,
}

impl ZoneUtilizationTarget {
    pub fn new(zone: Zone, target_percent: f64, current_percent: f64) -> Self {
        Self {
            zone,
            target_percent,
            current_percent,
        }
    }
}
