//! Supplyline Game Engine
//!
//! Platform-agnostic core logic for Supplyline, a turn-based supply-chain
//! teaching simulator. A playthrough walks five fixed stages — Planning,
//! Sourcing, Manufacturing, Delivery, Returns — each a pure calculator over
//! the submitted decision and the carried state. This crate provides all the
//! game mechanics without UI or platform-specific dependencies; input
//! collection, rendering, and durable persistence live in collaborators
//! behind the traits defined here.

pub mod accumulator;
pub mod config;
pub mod data;
pub mod decision;
pub mod error;
pub mod history;
pub mod numbers;
pub mod report;
pub mod result;
pub mod rng;
pub mod seed;
pub mod session;
pub mod stage;
pub mod stages;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, DeliveryCfg, EconomyConfig, ManufacturingCfg, ModeProfile,
    PlanningCfg, ReturnsCfg, SourcingCfg};
pub use data::{DemandPoint, Product, ReferenceData, Supplier};
pub use decision::{Decision, DeliveryDecision, ManufacturingDecision, PlanningDecision,
    ReturnsDecision, SourcingDecision, TransportMode};
pub use error::GameError;
pub use history::{HistoryEntry, HistoryLog};
pub use report::{Grade, ScoreSummary, score_summary, select_grade};
pub use result::StageResult;
pub use rng::{CountingRng, StageRngBundle};
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use session::{GameSession, SessionSnapshot, StageOutcome};
pub use stage::{Stage, StageSequencer};
pub use stages::{
    delivery_outcome, planning_outcome, run_calculator, simulate_delivery,
    simulate_manufacturing, simulate_planning, simulate_returns, simulate_sourcing,
    sourcing_outcome,
};
pub use state::GameState;

/// Trait for abstracting data loading operations
/// Platform-specific implementations should provide this
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load reference data (products, suppliers, demand history) from the
    /// platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the reference data cannot be loaded.
    fn load_reference_data(&self) -> Result<ReferenceData, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Trait for abstracting save/load of session snapshots
/// Platform-specific implementations should provide this
pub trait SessionStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a session snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    fn save_session(&self, save_name: &str, snapshot: &SessionSnapshot)
    -> Result<(), Self::Error>;

    /// Load a session snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded.
    fn load_session(&self, save_name: &str) -> Result<Option<SessionSnapshot>, Self::Error>;

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_session(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Main game engine for managing game sessions
pub struct GameEngine<L, S>
where
    L: DataLoader,
    S: SessionStore,
{
    data_loader: L,
    storage: S,
}

impl<L, S> GameEngine<L, S>
where
    L: DataLoader,
    S: SessionStore,
{
    /// Create a new game engine with the provided data loader and storage
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// Create a new session for the given seed and product, using the
    /// embedded default economy.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference data cannot be loaded or the
    /// product id is unknown.
    pub fn create_session(&self, seed: u64, product_id: &str) -> Result<GameSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let data = self.data_loader.load_reference_data().map_err(Into::into)?;
        let session = GameSession::new(seed, product_id, data, EconomyConfig::default_config())?;
        Ok(session)
    }

    /// Save a session snapshot
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be saved.
    pub fn save_session(&self, save_name: &str, session: &GameSession) -> Result<(), S::Error> {
        self.storage.save_session(save_name, &session.snapshot())
    }

    /// Load a session, rehydrating it with fresh reference data
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be loaded or rehydrated.
    pub fn load_session(&self, save_name: &str) -> Result<Option<GameSession>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        if let Some(snapshot) = self.storage.load_session(save_name).map_err(Into::into)? {
            let data = self.data_loader.load_reference_data().map_err(Into::into)?;
            let session =
                GameSession::from_snapshot(snapshot, data, EconomyConfig::default_config())?;
            Ok(Some(session))
        } else {
            Ok(None)
        }
    }

    /// Delete a saved session
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_session(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_session(save_name)
    }
}
