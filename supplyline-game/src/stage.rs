//! Stage machine: five playable phases plus a terminal `Final` state.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One of the fixed phases of the simulated supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Planning,
    Sourcing,
    Manufacturing,
    Delivery,
    Returns,
    /// Terminal state: only reporting and restart are valid.
    Final,
}

impl Stage {
    /// The five playable stages in canonical play order.
    pub const PLAY_ORDER: [Self; 5] = [
        Self::Planning,
        Self::Sourcing,
        Self::Manufacturing,
        Self::Delivery,
        Self::Returns,
    ];

    /// The stage that follows this one. `Final` is absorbing.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Planning => Self::Sourcing,
            Self::Sourcing => Self::Manufacturing,
            Self::Manufacturing => Self::Delivery,
            Self::Delivery => Self::Returns,
            Self::Returns | Self::Final => Self::Final,
        }
    }

    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Final)
    }

    /// Zero-based position in play order; `Final` sits past the end.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Planning => 0,
            Self::Sourcing => 1,
            Self::Manufacturing => 2,
            Self::Delivery => 3,
            Self::Returns => 4,
            Self::Final => 5,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Sourcing => "Sourcing",
            Self::Manufacturing => "Manufacturing",
            Self::Delivery => "Delivery",
            Self::Returns => "Returns",
            Self::Final => "Final",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strictly ordered sequencer over the playable stages.
///
/// One transition per completed stage, no back-edges except an explicit
/// restart. The sequencer never advances on its own; `advance` is called by
/// the session only after a calculator ran and its result was merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StageSequencer {
    current: Stage,
}

impl StageSequencer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Stage::Planning,
        }
    }

    /// Rebuild a sequencer positioned at `stage` (snapshot restore).
    #[must_use]
    pub const fn at(stage: Stage) -> Self {
        Self { current: stage }
    }

    #[must_use]
    pub const fn current(&self) -> Stage {
        self.current
    }

    /// Whether the playthrough has reached the terminal state.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.current.is_final()
    }

    /// Validate that `requested` matches the current stage.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStageTransition` when the stages differ, including
    /// any submission after `Final` has been reached.
    pub const fn expect(&self, requested: Stage) -> Result<(), GameError> {
        if matches!(
            (self.current, requested),
            (Stage::Planning, Stage::Planning)
                | (Stage::Sourcing, Stage::Sourcing)
                | (Stage::Manufacturing, Stage::Manufacturing)
                | (Stage::Delivery, Stage::Delivery)
                | (Stage::Returns, Stage::Returns)
        ) {
            Ok(())
        } else {
            Err(GameError::InvalidStageTransition {
                current: self.current,
                requested,
            })
        }
    }

    /// Move to the next stage, returning the new current stage.
    pub const fn advance(&mut self) -> Stage {
        self.current = self.current.next();
        self.current
    }

    /// Full-game restart back to Planning.
    pub const fn restart(&mut self) {
        self.current = Stage::Planning;
    }
}
