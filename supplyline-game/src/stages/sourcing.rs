//! Sourcing: pick a supplier profile and absorb its delay risk.

use rand::Rng;

use crate::config::SourcingCfg;
use crate::data::Supplier;
use crate::decision::SourcingDecision;
use crate::error::GameError;
use crate::numbers::{clamp_probability, i64_to_f64, round_f64_to_i64};
use crate::result::StageResult;

/// Run the Sourcing calculator, drawing the delay Bernoulli from `rng`.
///
/// # Errors
///
/// Returns `UnknownSupplier` when the decision names a supplier outside the
/// reference set. Silent defaulting would mask UI bugs.
pub fn simulate_sourcing(
    suppliers: &[Supplier],
    decision: &SourcingDecision,
    cfg: &SourcingCfg,
    rng: &mut impl Rng,
) -> Result<StageResult, GameError> {
    let supplier = suppliers
        .iter()
        .find(|s| s.id == decision.supplier)
        .ok_or_else(|| GameError::UnknownSupplier(decision.supplier.clone()))?;
    let delayed = rng.gen_bool(clamp_probability(supplier.delay_risk()));
    Ok(sourcing_outcome(supplier, decision, cfg, delayed))
}

/// Pure Sourcing outcome for an already-drawn delay flag.
///
/// The contract buys at the supplier's unit-cost tier and resells downstream
/// at the configured resale price. A delay forfeits a fraction of the order
/// as lost sales and charges a penalty proportional to the purchase cost. A
/// supplier slower than the decision's lead-time tolerance incurs a
/// schedule-risk surcharge regardless of the draw.
#[must_use]
pub fn sourcing_outcome(
    supplier: &Supplier,
    decision: &SourcingDecision,
    cfg: &SourcingCfg,
    delayed: bool,
) -> StageResult {
    let purchase = i64_to_f64(decision.order_qty) * supplier.unit_cost;
    let surcharge = if supplier.lead_time_days_mean > decision.lead_time_tolerance_days {
        cfg.schedule_risk_surcharge * purchase
    } else {
        0.0
    };

    let (shipped, lost, penalty) = if delayed {
        let lost = round_f64_to_i64(i64_to_f64(decision.order_qty) * cfg.delay_lost_fraction);
        (
            decision.order_qty - lost,
            lost,
            cfg.delay_penalty_rate * purchase,
        )
    } else {
        (decision.order_qty, 0, 0.0)
    };

    let revenue = i64_to_f64(shipped) * cfg.resale_price;
    let cost = purchase + surcharge + penalty;
    let note = if delayed {
        format!(
            "{} delayed the order; {lost} units lost, penalty charged",
            supplier.name
        )
    } else {
        format!("{} delivered {shipped} units on schedule", supplier.name)
    };

    StageResult {
        profit: revenue - cost,
        cost,
        revenue,
        inventory_delta: 0,
        units_sold: shipped,
        lost_sales: lost,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn supplier_b() -> Supplier {
        Supplier {
            id: "B".to_string(),
            name: "Borealis Supply Co.".to_string(),
            unit_cost: 90.0,
            cost_multiplier: 1.0,
            lead_time_days_mean: 12,
            reliability_pct: 90.0,
        }
    }

    fn decision() -> SourcingDecision {
        SourcingDecision {
            supplier: "B".to_string(),
            order_qty: 1000,
            lead_time_tolerance_days: 14,
        }
    }

    #[test]
    fn supplier_b_no_delay_scenario() {
        let result = sourcing_outcome(&supplier_b(), &decision(), &SourcingCfg::default(), false);
        assert!((result.cost - 90_000.0).abs() < 1e-9);
        assert!((result.revenue - 120_000.0).abs() < 1e-9);
        assert!((result.profit - 30_000.0).abs() < 1e-9);
        assert_eq!(result.lost_sales, 0);
        assert_eq!(result.units_sold, 1000);
        assert_eq!(result.inventory_delta, 0);
    }

    #[test]
    fn delay_forfeits_a_quarter_of_the_order() {
        let result = sourcing_outcome(&supplier_b(), &decision(), &SourcingCfg::default(), true);
        assert_eq!(result.lost_sales, 250);
        assert_eq!(result.units_sold, 750);
        // purchase 90000 + penalty 0.15 * 90000
        assert!((result.cost - 103_500.0).abs() < 1e-9);
        assert!((result.revenue - 90_000.0).abs() < 1e-9);
    }

    #[test]
    fn slow_supplier_pays_schedule_risk_surcharge() {
        let impatient = SourcingDecision {
            lead_time_tolerance_days: 10,
            ..decision()
        };
        let result = sourcing_outcome(&supplier_b(), &impatient, &SourcingCfg::default(), false);
        // purchase 90000 + surcharge 0.02 * 90000
        assert!((result.cost - 91_800.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_supplier_is_rejected() {
        let ghost = SourcingDecision {
            supplier: "Z".to_string(),
            ..decision()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let err = simulate_sourcing(&[supplier_b()], &ghost, &SourcingCfg::default(), &mut rng)
            .unwrap_err();
        assert_eq!(err, GameError::UnknownSupplier("Z".to_string()));
    }

    #[test]
    fn fixed_seed_reproduces_the_delay_draw() {
        let suppliers = [supplier_b()];
        let cfg = SourcingCfg::default();
        let mut a = SmallRng::seed_from_u64(5);
        let mut b = SmallRng::seed_from_u64(5);
        let first = simulate_sourcing(&suppliers, &decision(), &cfg, &mut a).unwrap();
        let second = simulate_sourcing(&suppliers, &decision(), &cfg, &mut b).unwrap();
        assert_eq!(first, second);
    }
}
