use crate::core::error::{AdvisorError, AdvisorResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Zone;
use std::time::Duration;

/// Per-person revenue tier of every zone (EUR)
///
/// Tiers are ordered: private room ≥ window seats ≥ terrace ≥ main dining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneRevenueTiers {
    pub private_room: Decimal,
    pub window_seats: Decimal,
    pub terrace: Decimal,
    pub main_dining: Decimal,
}

impl ZoneRevenueTiers {
    pub fn rate_for(&self, zone: Zone) -> Decimal {
        match zone {
            Zone::PrivateRoom => self.private_room,
            Zone::WindowSeats => self.window_seats,
            Zone::Terrace => self.terrace,
            Zone::MainDining => self.main_dining,
        }
    }
}

impl Default for ZoneRevenueTiers {
    fn default() -> Self {
        Self {
            private_room: Decimal::from(65),
            window_seats: Decimal::from(55),
            terrace: Decimal::from(50),
            main_dining: Decimal::from(45),
        }
    }
}

/// Constants of the shared scoring model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub revenue_tiers: ZoneRevenueTiers,
    /// Upper bound of `capacity + waste + bonus` before halving
    pub confidence_ceiling: f64,
    /// Weight of the seats-per-guest ratio in the capacity score
    pub capacity_weight: f64,
    /// Penalty per unit of relative over-capacity in the waste score
    pub waste_penalty: f64,
    pub optimal_bonus: f64,
    pub balanced_bonus: f64,
    pub historical_bonus: f64,
    /// Estimated utilization gain per assigned table, percent
    pub utilization_per_table: f64,
    pub utilization_cap: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            revenue_tiers: ZoneRevenueTiers::default(),
            confidence_ceiling: 95.0,
            capacity_weight: 50.0,
            waste_penalty: 30.0,
            optimal_bonus: 10.0,
            balanced_bonus: 5.0,
            historical_bonus: 15.0,
            utilization_per_table: 3.5,
            utilization_cap: 20.0,
        }
    }
}

/// Bonus weights and heuristics of the three strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyWeights {
    /// Optimal: VIP guest offered a private room
    pub vip_private_room_bonus: f64,
    /// Optimal: table below the utilization threshold
    pub low_utilization_bonus: f64,
    pub low_utilization_threshold_percent: f64,
    /// Optimal fallback divisor: typical guests per table
    pub persons_per_table: u32,
    /// Balanced: table in the requested zone
    pub preferred_zone_bonus: f64,
    /// Balanced: target assumed for zones without utilization data
    pub default_zone_target_percent: f64,
    /// Historical: minimum success rate of a usable pattern
    pub min_pattern_success_rate: f64,
    pub pattern_limit: usize,
    pub pattern_confidence_bonus: f64,
    pub pattern_confidence_ceiling: f64,
    /// Historical: confidence when no pattern is known
    pub fallback_confidence: f64,
    pub fallback_utilization_improvement: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            vip_private_room_bonus: 0.2,
            low_utilization_bonus: 0.1,
            low_utilization_threshold_percent: 70.0,
            persons_per_table: 4,
            preferred_zone_bonus: 0.3,
            default_zone_target_percent: 75.0,
            min_pattern_success_rate: 80.0,
            pattern_limit: 5,
            pattern_confidence_bonus: 10.0,
            pattern_confidence_ceiling: 95.0,
            fallback_confidence: 30.0,
            fallback_utilization_improvement: 5.0,
        }
    }
}

/// Orchestrator budgets and limits
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ADVISOR_STRATEGY_TIMEOUT_MS | 150 | per-strategy budget |
/// | ADVISOR_INVENTORY_TIMEOUT_MS | 100 | inventory fetch budget |
/// | ADVISOR_LOG_TIMEOUT_MS | 1000 | performance log write budget |
/// | ADVISOR_MAX_RECOMMENDATIONS | 3 | result cap |
/// | ADVISOR_MAX_PARTY_SIZE | 20 | largest accepted party |
/// | ADVISOR_SLOW_RESPONSE_WARN_MS | 250 | slow request warning |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub strategy_timeout_ms: u64,
    pub inventory_timeout_ms: u64,
    pub log_timeout_ms: u64,
    pub max_recommendations: usize,
    pub max_party_size: u32,
    /// Peak service window, inclusive hours
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,
    pub slow_response_warn_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy_timeout_ms: 150,
            inventory_timeout_ms: 100,
            log_timeout_ms: 1000,
            max_recommendations: 3,
            max_party_size: 20,
            peak_start_hour: 19,
            peak_end_hour: 22,
            slow_response_warn_ms: 250,
        }
    }
}

impl EngineConfig {
    pub fn strategy_timeout(&self) -> Duration {
        Duration::from_millis(self.strategy_timeout_ms)
    }

    pub fn inventory_timeout(&self) -> Duration {
        Duration::from_millis(self.inventory_timeout_ms)
    }

    pub fn log_timeout(&self) -> Duration {
        Duration::from_millis(self.log_timeout_ms)
    }

    pub fn is_peak_hour(&self, hour: u32) -> bool {
        (self.peak_start_hour..=self.peak_end_hour).contains(&hour)
    }
}

/// Complete advisor configuration
///
/// Every constant of the scoring model and the strategies lives here so the
/// host can inject its own values.
///
/// ```ignore
/// ADVISOR_STRATEGY_TIMEOUT_MS=80 ADVISOR_MAX_PARTY_SIZE=12 ./reservation-service
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub scoring: ScoringConfig,
    pub weights: StrategyWeights,
    pub engine: EngineConfig,
}

fn ensure_non_negative(fields: &[(&str, f64)]) -> AdvisorResult<()> {
    match fields.iter().find(|(_, value)| !value.is_finite() || *value < 0.0) {
        Some((name, value)) => Err(AdvisorError::Config(format!(
            "{name} must be a finite non-negative number, got {value}"
        ))),
        None => Ok(()),
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AdvisorConfig {
    /// Defaults, with engine budgets and the fallback divisor overridable
    /// from the environment
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            strategy_timeout_ms: env_or("ADVISOR_STRATEGY_TIMEOUT_MS", defaults.strategy_timeout_ms),
            inventory_timeout_ms: env_or(
                "ADVISOR_INVENTORY_TIMEOUT_MS",
                defaults.inventory_timeout_ms,
            ),
            log_timeout_ms: env_or("ADVISOR_LOG_TIMEOUT_MS", defaults.log_timeout_ms),
            max_recommendations: env_or(
                "ADVISOR_MAX_RECOMMENDATIONS",
                defaults.max_recommendations,
            ),
            max_party_size: env_or("ADVISOR_MAX_PARTY_SIZE", defaults.max_party_size),
            slow_response_warn_ms: env_or(
                "ADVISOR_SLOW_RESPONSE_WARN_MS",
                defaults.slow_response_warn_ms,
            ),
            ..defaults
        };

        let mut weights = StrategyWeights::default();
        weights.persons_per_table = env_or("ADVISOR_PERSONS_PER_TABLE", weights.persons_per_table);

        Self {
            scoring: ScoringConfig::default(),
            weights,
            engine,
        }
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> AdvisorResult<()> {
        let tiers = &self.scoring.revenue_tiers;
        if Zone::ALL
            .iter()
            .any(|zone| tiers.rate_for(*zone).is_sign_negative())
        {
            return Err(AdvisorError::Config(
                "revenue tiers must not be negative".into(),
            ));
        }
        if !(tiers.private_room >= tiers.window_seats
            && tiers.window_seats >= tiers.terrace
            && tiers.terrace >= tiers.main_dining)
        {
            return Err(AdvisorError::Config(
                "revenue tiers must be ordered private_room >= window_seats >= terrace >= main_dining"
                    .into(),
            ));
        }
        let scoring = &self.scoring;
        ensure_non_negative(&[
            ("confidence_ceiling", scoring.confidence_ceiling),
            ("capacity_weight", scoring.capacity_weight),
            ("waste_penalty", scoring.waste_penalty),
            ("optimal_bonus", scoring.optimal_bonus),
            ("balanced_bonus", scoring.balanced_bonus),
            ("historical_bonus", scoring.historical_bonus),
            ("utilization_per_table", scoring.utilization_per_table),
            ("utilization_cap", scoring.utilization_cap),
        ])?;
        let weights = &self.weights;
        ensure_non_negative(&[
            ("vip_private_room_bonus", weights.vip_private_room_bonus),
            ("low_utilization_bonus", weights.low_utilization_bonus),
            (
                "low_utilization_threshold_percent",
                weights.low_utilization_threshold_percent,
            ),
            ("preferred_zone_bonus", weights.preferred_zone_bonus),
            ("default_zone_target_percent", weights.default_zone_target_percent),
            ("min_pattern_success_rate", weights.min_pattern_success_rate),
            ("pattern_confidence_bonus", weights.pattern_confidence_bonus),
            ("pattern_confidence_ceiling", weights.pattern_confidence_ceiling),
            ("fallback_confidence", weights.fallback_confidence),
            (
                "fallback_utilization_improvement",
                weights.fallback_utilization_improvement,
            ),
        ])?;
        if self.weights.pattern_limit == 0 {
            return Err(AdvisorError::Config("pattern_limit must be positive".into()));
        }
        if self.weights.persons_per_table == 0 {
            return Err(AdvisorError::Config(
                "persons_per_table must be positive".into(),
            ));
        }
        if self.weights.default_zone_target_percent <= 0.0 {
            return Err(AdvisorError::Config(
                "default_zone_target_percent must be positive".into(),
            ));
        }
        if self.engine.strategy_timeout_ms == 0
            || self.engine.inventory_timeout_ms == 0
            || self.engine.log_timeout_ms == 0
        {
            return Err(AdvisorError::Config("timeouts must be positive".into()));
        }
        if self.engine.max_recommendations == 0 {
            return Err(AdvisorError::Config(
                "max_recommendations must be positive".into(),
            ));
        }
        if self.engine.max_party_size == 0 {
            return Err(AdvisorError::Config(
                "max_party_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AdvisorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_revenue_tiers_are_distinct_and_ordered() {
        let tiers = ZoneRevenueTiers::default();
        let rates: Vec<Decimal> = Zone::ALL.iter().map(|z| tiers.rate_for(*z)).collect();
        assert!(rates.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_unordered_tiers_are_rejected() {
        let mut config = AdvisorConfig::default();
        config.scoring.revenue_tiers.main_dining = Decimal::from(80);
        assert!(matches!(config.validate(), Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_zero_divisor_is_rejected() {
        let mut config = AdvisorConfig::default();
        config.weights.persons_per_table = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_log_timeout_is_rejected() {
        let mut config = AdvisorConfig::default();
        config.engine.log_timeout_ms = 0;
        assert!(matches!(config.validate(), Err(AdvisorError::Config(_))));
    }

    #[test]
    fn test_invalid_weights_are_rejected() {
        let mut config = AdvisorConfig::default();
        config.weights.preferred_zone_bonus = f64::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("preferred_zone_bonus"));

        let mut config = AdvisorConfig::default();
        config.scoring.waste_penalty = -1.0;
        assert!(config.validate().unwrap_err().to_string().contains("waste_penalty"));

        let mut config = AdvisorConfig::default();
        config.scoring.utilization_cap = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_pattern_limit_is_rejected() {
        let mut config = AdvisorConfig::default();
        config.weights.pattern_limit = 0;
        assert!(config.validate().unwrap_err().to_string().contains("pattern_limit"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"engine":{"strategy_timeout_ms":60},"weights":{"persons_per_table":6}}"#;
        let config: AdvisorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.engine.strategy_timeout_ms, 60);
        assert_eq!(config.engine.max_recommendations, 3);
        assert_eq!(config.weights.persons_per_table, 6);
        assert_eq!(config.scoring.confidence_ceiling, 95.0);
    }

    #[test]
    fn test_peak_hour_window_is_inclusive() {
        let engine = EngineConfig::default();
        assert!(!engine.is_peak_hour(18));
        assert!(engine.is_peak_hour(19));
        assert!(engine.is_peak_hour(22));
        assert!(!engine.is_peak_hour(23));
    }
}
