//! Carried-forward session state.

use serde::{Deserialize, Serialize};

/// Cumulative metrics for one playthrough.
///
/// Every numeric field starts at zero — inventory included; the safety-stock
/// decision in Planning is the intended tool for building a buffer. The state
/// is owned exclusively by its session and is only ever mutated by the
/// accumulator (`accumulator::apply`), never by a calculator.
///
/// Inventory may go negative for adversarial input; that is a teaching
/// outcome, not an invariant violation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GameState {
    /// User-visible seed driving all random draws for the session.
    #[serde(default)]
    pub seed: u64,
    /// On-hand units, signed.
    pub inventory: i64,
    /// Cumulative profit across completed stages.
    pub profit: f64,
    /// Cumulative cost across completed stages.
    pub cost: f64,
    /// Cumulative revenue across completed stages.
    pub revenue: f64,
    /// Cumulative units sold; the Returns stage draws its pool from this.
    pub units_sold: i64,
    /// Cumulative demand that could not be fulfilled, in units.
    pub lost_sales: i64,
}

impl GameState {
    /// Fresh state at the documented initial values.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Restore the documented initial values, keeping the seed.
    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    /// Service level as a percentage of fulfillable demand, for reporting.
    /// A session with no demand at all counts as fully served.
    #[must_use]
    pub fn service_level_pct(&self) -> f64 {
        let faced = self.units_sold + self.lost_sales;
        if faced <= 0 {
            return 100.0;
        }
        crate::numbers::i64_to_f64(self.units_sold) / crate::numbers::i64_to_f64(faced) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_documented_initial_values() {
        let state = GameState::new(42);
        assert_eq!(state.seed, 42);
        assert_eq!(state.inventory, 0);
        assert_eq!(state.units_sold, 0);
        assert_eq!(state.lost_sales, 0);
        assert!(state.profit.abs() < f64::EPSILON);
        assert!(state.cost.abs() < f64::EPSILON);
        assert!(state.revenue.abs() < f64::EPSILON);
    }

    #[test]
    fn reset_keeps_seed_and_zeroes_metrics() {
        let mut state = GameState::new(7);
        state.inventory = 150;
        state.profit = 3450.0;
        state.units_sold = 550;
        state.reset();
        assert_eq!(state, GameState::new(7));
    }

    #[test]
    fn service_level_handles_zero_demand() {
        let state = GameState::new(1);
        assert!((state.service_level_pct() - 100.0).abs() < f64::EPSILON);

        let served = GameState {
            units_sold: 90,
            lost_sales: 10,
            ..GameState::new(1)
        };
        assert!((served.service_level_pct() - 90.0).abs() < 1e-9);
    }
}
