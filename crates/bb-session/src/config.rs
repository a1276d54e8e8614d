//! Session configuration.

use bb_core::{GameMode, MiniGame};
use bb_engine::PacingConfig;

/// Configuration for one game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Classic (time-boxed) or endless (sudden-death).
    pub mode: GameMode,
    /// Mini-games eligible for rotation. Must contain at least one entry
    /// from the mixable pool; validated when the session is created.
    pub enabled_games: Vec<MiniGame>,
    /// RNG seed for reproducible game rotation and question generation.
    pub seed: u64,
    /// XP price of the endless continue.
    pub continue_cost: u64,
    /// Pacing engine tunables.
    pub pacing: PacingConfig,
}

impl SessionConfig {
    /// Configuration with the full mixable pool and default tunables.
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            enabled_games: MiniGame::MIXABLE.to_vec(),
            seed: 42,
            continue_cost: 100,
            pacing: PacingConfig::default(),
        }
    }

    /// Restrict the rotation to the given games.
    pub fn with_games(mut self, games: Vec<MiniGame>) -> Self {
        self.enabled_games = games;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the XP price of the endless continue.
    pub fn with_continue_cost(mut self, cost: u64) -> Self {
        self.continue_cost = cost;
        self
    }

    /// Replace the pacing tunables.
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// The enabled games that are actually mixable, in declaration order.
    pub fn mixable_games(&self) -> Vec<MiniGame> {
        self.enabled_games
            .iter()
            .copied()
            .filter(MiniGame::is_mixable)
            .collect()
    }
}
