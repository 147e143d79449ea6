//! Returns: reverse logistics over the units sold so far.

use crate::config::ReturnsCfg;
use crate::decision::ReturnsDecision;
use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::result::StageResult;
use crate::state::GameState;

/// Pure Returns outcome; this stage has no stochastic decision point.
///
/// The returns pool is the cumulative units sold. Returned units split into
/// refurbished (recovered at the configured resale value, minus processing)
/// and disposed (charged the decision's per-unit disposal cost). A share of
/// the refurbished units goes back into inventory per the put-back
/// percentage, and the whole pool of returns is backed out of units sold.
#[must_use]
pub fn simulate_returns(
    decision: &ReturnsDecision,
    state: &GameState,
    cfg: &ReturnsCfg,
) -> StageResult {
    let pool = state.units_sold;
    let total = round_f64_to_i64(i64_to_f64(pool) * decision.return_rate);
    let refurbished = round_f64_to_i64(i64_to_f64(total) * decision.refurbish_rate / 100.0);
    let disposed = total - refurbished;

    let revenue = i64_to_f64(refurbished) * cfg.resale_value;
    let cost = i64_to_f64(refurbished) * cfg.processing_cost
        + i64_to_f64(disposed) * decision.disposal_cost;
    let put_back = round_f64_to_i64(i64_to_f64(refurbished) * decision.put_back_pct / 100.0);

    StageResult {
        profit: revenue - cost,
        cost,
        revenue,
        inventory_delta: put_back,
        units_sold: -total,
        lost_sales: 0,
        note: format!(
            "{total} returns from {pool} sold: {refurbished} refurbished, {disposed} disposed, \
             {put_back} back to stock"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision() -> ReturnsDecision {
        ReturnsDecision {
            return_rate: 0.10,
            refurbish_rate: 50.0,
            disposal_cost: 10.0,
            put_back_pct: 100.0,
        }
    }

    fn state_with_sales(sold: i64) -> GameState {
        GameState {
            units_sold: sold,
            ..GameState::new(0)
        }
    }

    #[test]
    fn thousand_unit_pool_scenario() {
        let result = simulate_returns(&decision(), &state_with_sales(1000), &ReturnsCfg::default());
        assert!((result.revenue - 4000.0).abs() < 1e-9);
        // 50 * 20 processing + 50 * 10 disposal
        assert!((result.cost - 1500.0).abs() < 1e-9);
        assert!((result.profit - 2500.0).abs() < 1e-9);
        assert_eq!(result.units_sold, -100);
        assert_eq!(result.inventory_delta, 50);
    }

    #[test]
    fn partial_put_back_keeps_some_units_out_of_stock() {
        let policy = ReturnsDecision {
            put_back_pct: 40.0,
            ..decision()
        };
        let result = simulate_returns(&policy, &state_with_sales(1000), &ReturnsCfg::default());
        assert_eq!(result.inventory_delta, 20);
    }

    #[test]
    fn empty_pool_produces_a_zero_result() {
        let result = simulate_returns(&decision(), &state_with_sales(0), &ReturnsCfg::default());
        assert_eq!(result.units_sold, 0);
        assert_eq!(result.inventory_delta, 0);
        assert!(result.profit.abs() < f64::EPSILON);
    }

    #[test]
    fn all_disposal_policy_is_pure_cost() {
        let harsh = ReturnsDecision {
            refurbish_rate: 0.0,
            ..decision()
        };
        let result = simulate_returns(&harsh, &state_with_sales(1000), &ReturnsCfg::default());
        assert!(result.revenue.abs() < f64::EPSILON);
        assert!((result.cost - 1000.0).abs() < 1e-9);
        assert_eq!(result.inventory_delta, 0);
    }
}
