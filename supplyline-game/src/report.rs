//! End-of-game scoreboard.

use serde::{Deserialize, Serialize};

use crate::history::HistoryLog;
use crate::state::GameState;

/// Coarse performance grade, selected by strict priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Healthy profit and acceptable service.
    Thriving,
    /// In the black.
    Steady,
    /// Losing money but recoverable.
    Struggling,
    /// Deeply negative.
    Insolvent,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Thriving => write!(f, "thriving"),
            Self::Steady => write!(f, "steady"),
            Self::Struggling => write!(f, "struggling"),
            Self::Insolvent => write!(f, "insolvent"),
        }
    }
}

/// Complete summary of a playthrough for the final scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub product_name: String,
    pub share_code: String,
    pub stages_played: usize,
    pub profit: f64,
    pub revenue: f64,
    pub cost: f64,
    pub inventory: i64,
    pub units_sold: i64,
    pub lost_sales: i64,
    pub service_level_pct: f64,
    pub grade: Grade,
}

const THRIVING_PROFIT: f64 = 25_000.0;
const STRUGGLING_FLOOR: f64 = -10_000.0;

/// Select the grade from cumulative profit, strict priority order.
#[must_use]
pub fn select_grade(profit: f64) -> Grade {
    if profit >= THRIVING_PROFIT {
        return Grade::Thriving;
    }
    if profit >= 0.0 {
        return Grade::Steady;
    }
    if profit >= STRUGGLING_FLOOR {
        return Grade::Struggling;
    }
    Grade::Insolvent
}

/// Build the final scoreboard from accumulated state and history.
#[must_use]
pub fn score_summary(state: &GameState, history: &HistoryLog, product_name: &str) -> ScoreSummary {
    ScoreSummary {
        product_name: product_name.to_string(),
        share_code: crate::seed::encode_friendly(state.seed),
        stages_played: history.len(),
        profit: state.profit,
        revenue: state.revenue,
        cost: state.cost,
        inventory: state.inventory,
        units_sold: state.units_sold,
        lost_sales: state.lost_sales,
        service_level_pct: state.service_level_pct(),
        grade: select_grade(state.profit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_thresholds_are_strict_priority() {
        assert_eq!(select_grade(30_000.0), Grade::Thriving);
        assert_eq!(select_grade(25_000.0), Grade::Thriving);
        assert_eq!(select_grade(0.0), Grade::Steady);
        assert_eq!(select_grade(-1.0), Grade::Struggling);
        assert_eq!(select_grade(-10_000.0), Grade::Struggling);
        assert_eq!(select_grade(-10_000.01), Grade::Insolvent);
    }

    #[test]
    fn summary_reflects_state_and_history() {
        let state = GameState {
            profit: 2500.0,
            revenue: 4000.0,
            cost: 1500.0,
            inventory: 50,
            units_sold: 900,
            lost_sales: 100,
            ..GameState::new(0xBEEF)
        };
        let summary = score_summary(&state, &HistoryLog::new(), "Basic Widget");
        assert_eq!(summary.grade, Grade::Steady);
        assert_eq!(summary.stages_played, 0);
        assert!((summary.service_level_pct - 90.0).abs() < 1e-9);
        assert_eq!(
            summary.share_code,
            crate::seed::encode_friendly(0xBEEF),
            "share code is derived from the session seed"
        );
    }
}
