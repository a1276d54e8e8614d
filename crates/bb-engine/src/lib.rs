//! Adaptive pacing and difficulty engine for BrainBlitz.
//!
//! Converts each answer's correctness and response latency into an updated
//! pacing state (speed, phase, difficulty), and maps streak lengths to the
//! coarser player-facing difficulty tiers that parameterize mini-games.
//! The engine is pure bookkeeping: no timers, no I/O, no persistence.

/// Tunable pacing parameters.
pub mod config;
/// The latency-driven pacing engine.
pub mod pacing;
/// Streak-driven tier resolution and per-tier mini-game parameters.
pub mod tier;

/// Re-export the pacing configuration.
pub use config::PacingConfig;
/// Re-export the pacing engine and its observable state.
pub use pacing::{PacingEngine, PacingSnapshot, Phase};
/// Re-export tier types.
pub use tier::{GameParams, Tier, game_params, resolve_tier};
