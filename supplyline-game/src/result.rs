//! Output of one calculator invocation.

use serde::{Deserialize, Serialize};

/// Result record produced by a stage calculator.
///
/// All numeric fields are deltas relative to the incoming `GameState`
/// (delta semantics uniformly — see the accumulator). A result is immutable
/// once produced: it is merged into state exactly once and then retained
/// verbatim in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StageResult {
    /// Profit delta (revenue − cost for this stage).
    pub profit: f64,
    /// Cost incurred this stage.
    pub cost: f64,
    /// Revenue earned this stage.
    pub revenue: f64,
    /// Signed change to on-hand inventory, in units.
    pub inventory_delta: i64,
    /// Signed change to cumulative units sold.
    #[serde(default)]
    pub units_sold: i64,
    /// Demand that went unmet this stage, in units.
    pub lost_sales: i64,
    /// Human-readable trace of what happened, shown to the player.
    pub note: String,
}
