//! Manufacturing: convert a production run into sellable good units.

use crate::config::ManufacturingCfg;
use crate::data::Product;
use crate::decision::ManufacturingDecision;
use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::result::StageResult;

/// Pure Manufacturing outcome; this stage has no stochastic decision point.
///
/// Good units are the production run net of defects. Production cost is
/// linear in units at the in-house rate; utilization above 100% pays the
/// overtime premium, below 100% pays a downtime penalty on the idle
/// fraction. Good units are booked as sold at the product's sell price and
/// added to inventory.
#[must_use]
pub fn simulate_manufacturing(
    product: &Product,
    decision: &ManufacturingDecision,
    cfg: &ManufacturingCfg,
) -> StageResult {
    let good = round_f64_to_i64(i64_to_f64(decision.production_rate) * (1.0 - decision.defect_rate));

    let mut base = i64_to_f64(decision.production_rate) * product.unit_cost * cfg.in_house_discount;
    if decision.machine_utilization > 100.0 {
        base *= cfg.overtime_premium;
    }
    let downtime = if decision.machine_utilization < 100.0 {
        (1.0 - decision.machine_utilization / 100.0) * base * cfg.downtime_penalty_rate
    } else {
        0.0
    };

    let cost = base + downtime;
    let revenue = i64_to_f64(good) * product.sell_price;
    let scrapped = decision.production_rate - good;

    StageResult {
        profit: revenue - cost,
        cost,
        revenue,
        inventory_delta: good,
        units_sold: good,
        lost_sales: 0,
        note: format!(
            "Produced {} units at {:.0}% utilization; {good} good, {scrapped} scrapped",
            decision.production_rate, decision.machine_utilization
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            id: "widget-basic".to_string(),
            name: "Basic Widget".to_string(),
            unit_cost: 10.0,
            sell_price: 15.0,
            holding_cost_per_unit_per_month: 0.5,
            base_monthly_demand: 500,
        }
    }

    #[test]
    fn full_utilization_is_plain_linear_cost() {
        let decision = ManufacturingDecision {
            production_rate: 1000,
            defect_rate: 0.10,
            machine_utilization: 100.0,
        };
        let result = simulate_manufacturing(&product(), &decision, &ManufacturingCfg::default());

        assert_eq!(result.inventory_delta, 900);
        assert_eq!(result.units_sold, 900);
        // 1000 * 10 * 0.9, no overtime, no downtime
        assert!((result.cost - 9000.0).abs() < 1e-9);
        assert!((result.revenue - 13_500.0).abs() < 1e-9);
        assert!((result.profit - 4500.0).abs() < 1e-9);
    }

    #[test]
    fn idle_capacity_pays_a_downtime_penalty() {
        let decision = ManufacturingDecision {
            production_rate: 1000,
            defect_rate: 0.0,
            machine_utilization: 75.0,
        };
        let result = simulate_manufacturing(&product(), &decision, &ManufacturingCfg::default());
        // base 9000 + 0.25 idle * 9000 * 0.2
        assert!((result.cost - 9450.0).abs() < 1e-9);
    }

    #[test]
    fn overtime_premium_applies_above_full_utilization() {
        let decision = ManufacturingDecision {
            production_rate: 1000,
            defect_rate: 0.0,
            machine_utilization: 110.0,
        };
        let result = simulate_manufacturing(&product(), &decision, &ManufacturingCfg::default());
        // base 9000 * 1.25, no downtime
        assert!((result.cost - 11_250.0).abs() < 1e-9);
    }

    #[test]
    fn total_defect_rate_yields_cost_with_no_revenue() {
        let decision = ManufacturingDecision {
            production_rate: 500,
            defect_rate: 1.0,
            machine_utilization: 100.0,
        };
        let result = simulate_manufacturing(&product(), &decision, &ManufacturingCfg::default());
        assert_eq!(result.inventory_delta, 0);
        assert!(result.revenue.abs() < f64::EPSILON);
        assert!(result.profit < 0.0);
    }
}
