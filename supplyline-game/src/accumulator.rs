//! The single merge point between stage results and session state.
//!
//! Delta semantics, uniformly: every numeric field of a `StageResult` is a
//! signed change added onto the running state. The note is not accumulated;
//! the latest one is visible through the history tail.

use crate::result::StageResult;
use crate::state::GameState;

/// Merge a stage result into state, returning the new state.
#[must_use]
pub fn merge(state: &GameState, result: &StageResult) -> GameState {
    GameState {
        seed: state.seed,
        inventory: state.inventory + result.inventory_delta,
        profit: state.profit + result.profit,
        cost: state.cost + result.cost,
        revenue: state.revenue + result.revenue,
        units_sold: state.units_sold + result.units_sold,
        lost_sales: state.lost_sales + result.lost_sales,
    }
}

/// In-place variant of [`merge`].
pub fn apply(state: &mut GameState, result: &StageResult) {
    *state = merge(state, result);
}
