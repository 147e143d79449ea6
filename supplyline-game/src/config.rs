//! Economy tuning: every constant used by the stage calculators.
//!
//! The source variants disagree on cost/revenue constants per stage; these
//! are the conventions chosen for this implementation, one per stage, and
//! they are the documented contract for the scenario tests. Each field has a
//! serde default so partial JSON overrides stay valid.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decision::TransportMode;

/// Errors raised when economy configuration invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("demand band invalid: lo {lo:.2} > hi {hi:.2}")]
    DemandBandInverted { lo: f64, hi: f64 },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("missing transport mode profile: {0}")]
    MissingMode(TransportMode),
    #[error("JSON parse error: {0}")]
    Parse(String),
}

/// Planning-stage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningCfg {
    /// Lower bound of the multiplicative demand-variation draw.
    #[serde(default = "PlanningCfg::default_band_lo")]
    pub demand_band_lo: f64,
    /// Upper bound of the multiplicative demand-variation draw.
    #[serde(default = "PlanningCfg::default_band_hi")]
    pub demand_band_hi: f64,
    /// Fraction of purchase cost added when expediting.
    #[serde(default = "PlanningCfg::default_expedite_surcharge")]
    pub expedite_surcharge: f64,
    /// Fraction of sell price charged per unit of unmet demand.
    #[serde(default = "PlanningCfg::default_lost_margin_rate")]
    pub lost_margin_rate: f64,
}

impl PlanningCfg {
    const fn default_band_lo() -> f64 {
        0.90
    }
    const fn default_band_hi() -> f64 {
        1.15
    }
    const fn default_expedite_surcharge() -> f64 {
        0.25
    }
    const fn default_lost_margin_rate() -> f64 {
        0.40
    }
}

impl Default for PlanningCfg {
    fn default() -> Self {
        Self {
            demand_band_lo: Self::default_band_lo(),
            demand_band_hi: Self::default_band_hi(),
            expedite_surcharge: Self::default_expedite_surcharge(),
            lost_margin_rate: Self::default_lost_margin_rate(),
        }
    }
}

/// Sourcing-stage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingCfg {
    /// Contract resale price per unit passed downstream.
    #[serde(default = "SourcingCfg::default_resale_price")]
    pub resale_price: f64,
    /// Fraction of purchase cost charged when a delay fires.
    #[serde(default = "SourcingCfg::default_delay_penalty_rate")]
    pub delay_penalty_rate: f64,
    /// Fraction of the order counted as lost sales on delay.
    #[serde(default = "SourcingCfg::default_delay_lost_fraction")]
    pub delay_lost_fraction: f64,
    /// Fraction of purchase cost charged when the supplier's mean lead time
    /// exceeds the decision's tolerance.
    #[serde(default = "SourcingCfg::default_schedule_risk_surcharge")]
    pub schedule_risk_surcharge: f64,
}

impl SourcingCfg {
    const fn default_resale_price() -> f64 {
        120.0
    }
    const fn default_delay_penalty_rate() -> f64 {
        0.15
    }
    const fn default_delay_lost_fraction() -> f64 {
        0.25
    }
    const fn default_schedule_risk_surcharge() -> f64 {
        0.02
    }
}

impl Default for SourcingCfg {
    fn default() -> Self {
        Self {
            resale_price: Self::default_resale_price(),
            delay_penalty_rate: Self::default_delay_penalty_rate(),
            delay_lost_fraction: Self::default_delay_lost_fraction(),
            schedule_risk_surcharge: Self::default_schedule_risk_surcharge(),
        }
    }
}

/// Manufacturing-stage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingCfg {
    /// In-house production cost as a fraction of the product's unit cost.
    #[serde(default = "ManufacturingCfg::default_in_house_discount")]
    pub in_house_discount: f64,
    /// Cost multiplier when utilization is pushed above 100%.
    #[serde(default = "ManufacturingCfg::default_overtime_premium")]
    pub overtime_premium: f64,
    /// Fraction of base cost charged per idle fraction below 100%.
    #[serde(default = "ManufacturingCfg::default_downtime_penalty_rate")]
    pub downtime_penalty_rate: f64,
}

impl ManufacturingCfg {
    const fn default_in_house_discount() -> f64 {
        0.90
    }
    const fn default_overtime_premium() -> f64 {
        1.25
    }
    const fn default_downtime_penalty_rate() -> f64 {
        0.20
    }
}

impl Default for ManufacturingCfg {
    fn default() -> Self {
        Self {
            in_house_discount: Self::default_in_house_discount(),
            overtime_premium: Self::default_overtime_premium(),
            downtime_penalty_rate: Self::default_downtime_penalty_rate(),
        }
    }
}

/// Per-mode cost multiplier and delay risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeProfile {
    pub cost_multiplier: f64,
    pub delay_risk: f64,
}

/// Delivery-stage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCfg {
    /// Base freight cost per shipped unit before mode multipliers.
    #[serde(default = "DeliveryCfg::default_freight_rate")]
    pub freight_rate: f64,
    /// Penalty per shipped unit when a delay fires.
    #[serde(default = "DeliveryCfg::default_delay_penalty_per_unit")]
    pub delay_penalty_per_unit: f64,
    /// Fraction of the shipment counted as lost sales on delay.
    #[serde(default = "DeliveryCfg::default_delay_lost_fraction")]
    pub delay_lost_fraction: f64,
    #[serde(default = "DeliveryCfg::default_modes")]
    pub modes: HashMap<TransportMode, ModeProfile>,
}

impl DeliveryCfg {
    const fn default_freight_rate() -> f64 {
        5.0
    }
    const fn default_delay_penalty_per_unit() -> f64 {
        2.0
    }
    const fn default_delay_lost_fraction() -> f64 {
        0.20
    }

    fn default_modes() -> HashMap<TransportMode, ModeProfile> {
        HashMap::from([
            (
                TransportMode::Sea,
                ModeProfile {
                    cost_multiplier: 1.0,
                    delay_risk: 0.30,
                },
            ),
            (
                TransportMode::Road,
                ModeProfile {
                    cost_multiplier: 1.2,
                    delay_risk: 0.10,
                },
            ),
            (
                TransportMode::Air,
                ModeProfile {
                    cost_multiplier: 1.8,
                    delay_risk: 0.02,
                },
            ),
        ])
    }
}

impl Default for DeliveryCfg {
    fn default() -> Self {
        Self {
            freight_rate: Self::default_freight_rate(),
            delay_penalty_per_unit: Self::default_delay_penalty_per_unit(),
            delay_lost_fraction: Self::default_delay_lost_fraction(),
            modes: Self::default_modes(),
        }
    }
}

/// Returns-stage tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsCfg {
    /// Recovered value per refurbished unit.
    #[serde(default = "ReturnsCfg::default_resale_value")]
    pub resale_value: f64,
    /// Processing cost per refurbished unit.
    #[serde(default = "ReturnsCfg::default_processing_cost")]
    pub processing_cost: f64,
}

impl ReturnsCfg {
    const fn default_resale_value() -> f64 {
        80.0
    }
    const fn default_processing_cost() -> f64 {
        20.0
    }
}

impl Default for ReturnsCfg {
    fn default() -> Self {
        Self {
            resale_value: Self::default_resale_value(),
            processing_cost: Self::default_processing_cost(),
        }
    }
}

/// Complete economy configuration, one section per stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EconomyConfig {
    #[serde(default)]
    pub planning: PlanningCfg,
    #[serde(default)]
    pub sourcing: SourcingCfg,
    #[serde(default)]
    pub manufacturing: ManufacturingCfg,
    #[serde(default)]
    pub delivery: DeliveryCfg,
    #[serde(default)]
    pub returns: ReturnsCfg,
}

impl EconomyConfig {
    /// Parse configuration from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or if validation fails.
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.planning.demand_band_lo > self.planning.demand_band_hi {
            return Err(ConfigError::DemandBandInverted {
                lo: self.planning.demand_band_lo,
                hi: self.planning.demand_band_hi,
            });
        }
        let fractions = [
            ("planning.lost_margin_rate", self.planning.lost_margin_rate),
            (
                "sourcing.delay_lost_fraction",
                self.sourcing.delay_lost_fraction,
            ),
            (
                "delivery.delay_lost_fraction",
                self.delivery.delay_lost_fraction,
            ),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        for mode in TransportMode::ALL {
            let Some(profile) = self.delivery.modes.get(&mode) else {
                return Err(ConfigError::MissingMode(mode));
            };
            if !(0.0..=1.0).contains(&profile.delay_risk) {
                return Err(ConfigError::RangeViolation {
                    field: "delivery.modes.delay_risk",
                    min: 0.0,
                    max: 1.0,
                    value: profile.delay_risk,
                });
            }
        }
        Ok(())
    }

    /// Get embedded default configuration.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/data/economy.json"))
            .expect("embedded economy config is valid")
    }
}
