//! The five stage calculators.
//!
//! Calculators are pure: they never mutate `GameState` (only the accumulator
//! does), and each has at most one stochastic decision point. The stochastic
//! ones are split into a drawing wrapper (`simulate_*` over `&mut impl Rng`)
//! and a pure outcome function over the already-drawn value, so tests can
//! force a draw exactly.

pub mod delivery;
pub mod manufacturing;
pub mod planning;
pub mod returns;
pub mod sourcing;

pub use delivery::{delivery_outcome, simulate_delivery};
pub use manufacturing::simulate_manufacturing;
pub use planning::{planning_outcome, simulate_planning};
pub use returns::simulate_returns;
pub use sourcing::{simulate_sourcing, sourcing_outcome};

use crate::config::EconomyConfig;
use crate::data::{Product, ReferenceData};
use crate::decision::Decision;
use crate::error::GameError;
use crate::result::StageResult;
use crate::rng::StageRngBundle;
use crate::state::GameState;

/// Dispatch one decision to its calculator against the matching RNG stream.
///
/// # Errors
///
/// Propagates `UnknownSupplier` / `UnknownTransportMode` from the
/// categorical lookups; stage-ordering is the caller's concern.
pub fn run_calculator(
    data: &ReferenceData,
    product: &Product,
    cfg: &EconomyConfig,
    decision: &Decision,
    state: &GameState,
    rng: &StageRngBundle,
) -> Result<StageResult, GameError> {
    match decision {
        Decision::Planning(d) => Ok(simulate_planning(
            product,
            data.baseline_demand(product),
            d,
            state,
            &cfg.planning,
            &mut *rng.demand(),
        )),
        Decision::Sourcing(d) => {
            simulate_sourcing(&data.suppliers, d, &cfg.sourcing, &mut *rng.sourcing())
        }
        Decision::Manufacturing(d) => Ok(simulate_manufacturing(product, d, &cfg.manufacturing)),
        Decision::Delivery(d) => simulate_delivery(d, &cfg.delivery, &mut *rng.delivery()),
        Decision::Returns(d) => Ok(simulate_returns(d, state, &cfg.returns)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{ReturnsDecision, SourcingDecision};

    #[test]
    fn dispatch_reaches_the_sourcing_lookup() {
        let data = ReferenceData::default_config();
        let product = data.product("widget-basic").unwrap().clone();
        let cfg = EconomyConfig::default();
        let rng = StageRngBundle::from_user_seed(1);
        let state = GameState::new(1);

        let bad = Decision::Sourcing(SourcingDecision {
            supplier: "nope".to_string(),
            order_qty: 10,
            lead_time_tolerance_days: 30,
        });
        let err = run_calculator(&data, &product, &cfg, &bad, &state, &rng).unwrap_err();
        assert_eq!(err, GameError::UnknownSupplier("nope".to_string()));
    }

    #[test]
    fn deterministic_stages_ignore_the_rng_streams() {
        let data = ReferenceData::default_config();
        let product = data.product("widget-basic").unwrap().clone();
        let cfg = EconomyConfig::default();
        let rng = StageRngBundle::from_user_seed(1);
        let state = GameState::new(1);

        let decision = Decision::Returns(ReturnsDecision {
            return_rate: 0.1,
            refurbish_rate: 50.0,
            disposal_cost: 10.0,
            put_back_pct: 100.0,
        });
        run_calculator(&data, &product, &cfg, &decision, &state, &rng).unwrap();
        assert_eq!(rng.draw_counts(), [0, 0, 0]);
    }
}
