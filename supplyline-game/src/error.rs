//! Error taxonomy for the game core.
//!
//! Arithmetic nonsense (negative inventory, negative profit) is deliberately
//! not an error: the simulator is a teaching sandbox and bad numbers are part
//! of the lesson. Errors cover stage-ordering violations and categorical
//! values outside their enumerated domain, which would otherwise mask
//! configuration or UI bugs if silently defaulted.

use thiserror::Error;

use crate::stage::Stage;

/// Errors surfaced synchronously by `run_stage` and session construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A decision was submitted for a stage other than the sequencer's
    /// current stage. The operation is rejected and state is unchanged.
    #[error("decision for {requested} submitted while the game is at {current}")]
    InvalidStageTransition { current: Stage, requested: Stage },

    /// Supplier id outside the reference data set.
    #[error("unknown supplier '{0}'")]
    UnknownSupplier(String),

    /// Transport mode string outside the enumerated domain.
    #[error("unknown transport mode '{0}'")]
    UnknownTransportMode(String),

    /// Product id outside the reference data set.
    #[error("unknown product '{0}'")]
    UnknownProduct(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_both_stages() {
        let err = GameError::InvalidStageTransition {
            current: Stage::Planning,
            requested: Stage::Delivery,
        };
        let msg = err.to_string();
        assert!(msg.contains("Delivery"));
        assert!(msg.contains("Planning"));
    }
}
