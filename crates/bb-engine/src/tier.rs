//! Streak-driven tier resolution and per-tier mini-game parameters.
//!
//! Tier is the coarse, player-facing difficulty signal: a pure step
//! function of streak length, independent of the latency-driven speed in
//! [`crate::pacing`]. Tier changes are visible immediately at streak
//! boundaries — no smoothing.

use serde::{Deserialize, Serialize};

use bb_core::{GameMode, MiniGame};

/// A difficulty tier in `{1..5}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(u8);

impl Tier {
    /// Create a tier, clamped to `1..=5`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 5))
    }

    /// The tier number in `1..=5`.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Player-facing tier name.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Warming Up",
            2 => "Focused",
            3 => "In the Zone",
            4 => "Blazing",
            _ => "Unstoppable",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

/// Map a streak count and mode to a tier.
///
/// Endless escalates faster than classic, reflecting its single-mistake
/// stakes.
pub fn resolve_tier(streak: u32, mode: GameMode) -> Tier {
    let breakpoints: [u32; 4] = match mode {
        GameMode::Classic => [5, 10, 15, 20],
        GameMode::Endless => [3, 6, 10, 15],
    };
    let tier = 1 + breakpoints.iter().filter(|&&b| streak >= b).count() as u8;
    Tier::new(tier)
}

/// Tier-scaled generation parameters consumed by a mini-game.
///
/// Each field is a monotone step function of tier: higher tier never
/// yields an easier parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParams {
    /// Side length of the play grid, where the game uses one.
    pub grid_size: u32,
    /// Smallest operand for arithmetic generation.
    pub operand_min: i64,
    /// Largest operand for arithmetic generation.
    pub operand_max: i64,
    /// Number of operands combined per arithmetic question.
    pub operand_count: u32,
    /// How long stimulus material is shown, in milliseconds.
    pub show_time_ms: u32,
    /// Number of answer options presented.
    pub option_count: u32,
    /// Length of a sequence to recall.
    pub sequence_len: u32,
}

/// Resolve the generation parameters for a mini-game at a tier.
pub fn game_params(tier: Tier, game: MiniGame) -> GameParams {
    let t = u32::from(tier.value());
    let base = GameParams {
        grid_size: 2 + t.min(4),
        operand_min: 1,
        operand_max: i64::from(10 * t * t),
        operand_count: 2 + t / 3,
        show_time_ms: 2500u32.saturating_sub(300 * (t - 1)),
        option_count: 3 + t.min(3),
        sequence_len: 2 + t,
    };
    match game {
        MiniGame::QuickMath => GameParams {
            // Arithmetic scales through operand range and count only.
            grid_size: 0,
            sequence_len: 0,
            ..base
        },
        MiniGame::ColorMatch => GameParams {
            operand_count: 0,
            sequence_len: 0,
            grid_size: 0,
            ..base
        },
        MiniGame::SequenceRecall => GameParams {
            operand_count: 0,
            grid_size: 0,
            ..base
        },
        MiniGame::ShapeCount => GameParams {
            operand_count: 0,
            sequence_len: 0,
            ..base
        },
        MiniGame::OddOneOut => GameParams {
            operand_count: 0,
            sequence_len: 0,
            ..base
        },
    }
}
