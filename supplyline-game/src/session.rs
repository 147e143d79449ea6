//! High-level session: sequencer, state, history, and RNG behind one entry
//! point.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::accumulator;
use crate::config::EconomyConfig;
use crate::data::{Product, ReferenceData};
use crate::decision::Decision;
use crate::error::GameError;
use crate::history::{HistoryEntry, HistoryLog};
use crate::report::{ScoreSummary, score_summary};
use crate::result::StageResult;
use crate::rng::StageRngBundle;
use crate::stage::{Stage, StageSequencer};
use crate::stages::run_calculator;
use crate::state::GameState;

/// Everything a collaborator needs after one completed turn.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The stage that just ran.
    pub stage: Stage,
    /// The calculator's result, as appended to history.
    pub result: StageResult,
    /// State after the accumulator merge.
    pub state: GameState,
    /// Where the sequencer now sits.
    pub next_stage: Stage,
}

/// Serializable session image for the persistence collaborator.
///
/// Plain structured records only: state, history, sequencer position, seed,
/// and the RNG draw cursors needed to resume the deterministic sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub product_id: String,
    pub stage: Stage,
    pub state: GameState,
    pub history: HistoryLog,
    #[serde(default)]
    pub rng_draws: [u64; 3],
}

/// One player's playthrough. Owns its state and history exclusively;
/// single-threaded, synchronous, one calculator invocation per submission.
#[derive(Debug)]
pub struct GameSession {
    cfg: EconomyConfig,
    data: ReferenceData,
    product_id: String,
    sequencer: StageSequencer,
    state: GameState,
    history: HistoryLog,
    rng: Rc<StageRngBundle>,
}

impl GameSession {
    /// Construct a fresh session for one product.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProduct` when the id is not in the reference data.
    pub fn new(
        seed: u64,
        product_id: &str,
        data: ReferenceData,
        cfg: EconomyConfig,
    ) -> Result<Self, GameError> {
        if data.product(product_id).is_none() {
            return Err(GameError::UnknownProduct(product_id.to_string()));
        }
        Ok(Self {
            cfg,
            data,
            product_id: product_id.to_string(),
            sequencer: StageSequencer::new(),
            state: GameState::new(seed),
            history: HistoryLog::new(),
            rng: Rc::new(StageRngBundle::from_user_seed(seed)),
        })
    }

    /// Drive one turn: validate the stage, run the calculator, merge the
    /// result, append to history, advance the sequencer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStageTransition` when the decision targets any stage
    /// other than the current one (including after `Final`), and propagates
    /// categorical lookup failures from the calculators. On any error the
    /// session is unchanged.
    pub fn run_stage(&mut self, decision: &Decision) -> Result<StageOutcome, GameError> {
        let stage = decision.stage();
        self.sequencer.expect(stage)?;

        let result = run_calculator(
            &self.data,
            self.product(),
            &self.cfg,
            decision,
            &self.state,
            &self.rng,
        )?;

        accumulator::apply(&mut self.state, &result);
        self.history.push(HistoryEntry {
            stage,
            decision: decision.clone(),
            result: result.clone(),
        });
        let next_stage = self.sequencer.advance();

        Ok(StageOutcome {
            stage,
            result,
            state: self.state,
            next_stage,
        })
    }

    /// Full-game restart: initial state, empty history, streams re-derived
    /// from the seed so the replay is identical.
    pub fn restart(&mut self) {
        self.sequencer.restart();
        self.state.reset();
        self.history.clear();
        self.rng = Rc::new(StageRngBundle::from_user_seed(self.state.seed));
    }

    #[must_use]
    pub const fn current_stage(&self) -> Stage {
        self.sequencer.current()
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.sequencer.is_complete()
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// The product this session plays.
    ///
    /// # Panics
    ///
    /// Never panics: the id was checked at construction and the data is
    /// immutable afterwards.
    #[must_use]
    pub fn product(&self) -> &Product {
        self.data
            .product(&self.product_id)
            .expect("product id validated at construction")
    }

    /// Final scoreboard over the accumulated state and history.
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        score_summary(&self.state, &self.history, &self.product().name)
    }

    /// Serializable image of the session for the persistence collaborator.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            seed: self.state.seed,
            product_id: self.product_id.clone(),
            stage: self.sequencer.current(),
            state: self.state,
            history: self.history.clone(),
            rng_draws: self.rng.draw_counts(),
        }
    }

    /// Rebuild a session from a snapshot, fast-forwarding the RNG streams to
    /// the recorded draw cursors.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProduct` when the snapshot references a product the
    /// supplied reference data does not contain.
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        data: ReferenceData,
        cfg: EconomyConfig,
    ) -> Result<Self, GameError> {
        if data.product(&snapshot.product_id).is_none() {
            return Err(GameError::UnknownProduct(snapshot.product_id));
        }
        let rng = StageRngBundle::from_user_seed(snapshot.seed);
        rng.fast_forward(snapshot.rng_draws);
        Ok(Self {
            cfg,
            data,
            product_id: snapshot.product_id,
            sequencer: StageSequencer::at(snapshot.stage),
            state: snapshot.state,
            history: snapshot.history,
            rng: Rc::new(rng),
        })
    }
}
