//! Planning: order against a perturbed demand forecast.

use rand::Rng;

use crate::config::PlanningCfg;
use crate::data::Product;
use crate::decision::PlanningDecision;
use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::result::StageResult;
use crate::state::GameState;

/// Run the Planning calculator, drawing the demand variation from `rng`.
pub fn simulate_planning(
    product: &Product,
    baseline_demand: i64,
    decision: &PlanningDecision,
    state: &GameState,
    cfg: &PlanningCfg,
    rng: &mut impl Rng,
) -> StageResult {
    let factor = rng.gen_range(cfg.demand_band_lo..=cfg.demand_band_hi);
    planning_outcome(product, baseline_demand, decision, state, cfg, factor)
}

/// Pure Planning outcome for an already-drawn demand factor.
///
/// Demand is the baseline scaled by the factor; supply received this period
/// equals the order quantity (no intra-stage lead-time delay). Safety stock
/// counts toward availability without being purchased. Holding cost applies
/// to positive ending inventory; unmet demand is charged a lost-margin
/// penalty on top of the lost revenue.
#[must_use]
pub fn planning_outcome(
    product: &Product,
    baseline_demand: i64,
    decision: &PlanningDecision,
    state: &GameState,
    cfg: &PlanningCfg,
    demand_factor: f64,
) -> StageResult {
    let unit_cost = product.unit_cost * decision.supplier_cost_mult;
    let demand = round_f64_to_i64(i64_to_f64(baseline_demand) * demand_factor);

    let available = state.inventory + decision.order_qty + decision.safety_stock;
    let sold = available.min(demand);
    let lost = (demand - available).max(0);
    let inventory_delta = decision.order_qty + decision.safety_stock - sold;
    let ending_inventory = state.inventory + inventory_delta;

    let revenue = i64_to_f64(sold) * product.sell_price;
    let purchase = i64_to_f64(decision.order_qty) * unit_cost;
    let expedite = if decision.expedite {
        cfg.expedite_surcharge * purchase
    } else {
        0.0
    };
    let holding =
        i64_to_f64(ending_inventory.max(0)) * product.holding_cost_per_unit_per_month;
    let lost_margin = i64_to_f64(lost) * product.sell_price * cfg.lost_margin_rate;
    let cost = purchase + holding + decision.transport_cost + expedite + lost_margin;

    StageResult {
        profit: revenue - cost,
        cost,
        revenue,
        inventory_delta,
        units_sold: sold,
        lost_sales: lost,
        note: format!(
            "Demand came in at {demand} (x{demand_factor:.2} swing on {baseline_demand}); \
             sold {sold}, lost {lost}, lead time {}d",
            decision.lead_time_days
        ),
    }
}
