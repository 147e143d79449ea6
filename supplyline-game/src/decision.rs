//! Per-stage decision records submitted by the player.
//!
//! Range validation belongs to the input-collection layer; the core documents
//! the numeric domains (quantities ≥ 0, rates in [0,1] or [0,100] per stage
//! convention) and tolerates anything outside them — out-of-domain numbers
//! flow through the arithmetic and may produce nonsensical output on purpose.
//! Categorical fields are the exception: an unknown supplier or transport
//! mode fails deterministically rather than silently defaulting.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::stage::Stage;

/// Transport modes available in the Delivery stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Sea,
    Road,
    Air,
}

impl TransportMode {
    pub const ALL: [Self; 3] = [Self::Sea, Self::Road, Self::Air];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sea => "sea",
            Self::Road => "road",
            Self::Air => "air",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sea" => Ok(Self::Sea),
            "road" => Ok(Self::Road),
            "air" => Ok(Self::Air),
            other => Err(GameError::UnknownTransportMode(other.to_string())),
        }
    }
}

/// Planning: order quantity, buffer, and expediting choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningDecision {
    /// Units ordered this period; supply arrives within the same invocation.
    pub order_qty: i64,
    /// Buffer units drawn into availability above the order itself.
    pub safety_stock: i64,
    /// Pay a surcharge on the purchase cost for faster handling.
    pub expedite: bool,
    /// Supplier cost tier applied to the product's unit cost.
    pub supplier_cost_mult: f64,
    /// Quoted lead time; informational in the single-period model.
    pub lead_time_days: i64,
    /// Flat transport cost added to the stage cost.
    pub transport_cost: f64,
}

/// Sourcing: supplier profile selection for a contract volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcingDecision {
    /// Supplier id, looked up in reference data. Unknown ids are an error.
    pub supplier: String,
    pub order_qty: i64,
    /// Longest acceptable lead time; slower suppliers incur a schedule-risk
    /// surcharge.
    pub lead_time_tolerance_days: i64,
}

/// Manufacturing: production volume and line settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingDecision {
    /// Units put into production.
    pub production_rate: i64,
    /// Fraction of production scrapped, in [0, 1].
    pub defect_rate: f64,
    /// Percent utilization; below 100 incurs downtime, above 100 is overtime.
    pub machine_utilization: f64,
}

/// Delivery: shipment sizing and routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDecision {
    pub shipment_size: i64,
    pub transport_mode: TransportMode,
    /// Route efficiency in (0, 1]; 1.0 is a direct route.
    pub route_efficiency: f64,
}

/// Returns: reverse-logistics policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsDecision {
    /// Fraction of prior sold units that come back, in [0, 1].
    pub return_rate: f64,
    /// Share of returns refurbished rather than disposed, in [0, 100].
    pub refurbish_rate: f64,
    /// Cost per disposed unit.
    pub disposal_cost: f64,
    /// Share of refurbished units returned to inventory, in [0, 100].
    pub put_back_pct: f64,
}

/// A player decision, tagged by the stage it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum Decision {
    Planning(PlanningDecision),
    Sourcing(SourcingDecision),
    Manufacturing(ManufacturingDecision),
    Delivery(DeliveryDecision),
    Returns(ReturnsDecision),
}

impl Decision {
    /// The stage this decision targets.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Planning(_) => Stage::Planning,
            Self::Sourcing(_) => Stage::Sourcing,
            Self::Manufacturing(_) => Stage::Manufacturing,
            Self::Delivery(_) => Stage::Delivery,
            Self::Returns(_) => Stage::Returns,
        }
    }
}
