//! Game modes and mini-game identifiers.

use serde::{Deserialize, Serialize};

/// The two ways a session can be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Time-boxed scoring run: wrong answers reset the streak but play
    /// continues until an external clock expires.
    Classic,
    /// Sudden-death streak run: the first wrong answer ends the run
    /// unless a continue is granted.
    Endless,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Endless => write!(f, "endless"),
        }
    }
}

/// Identifier for one mini-game in the rotating pool.
///
/// The serde names are stable: they are used as map keys in persisted
/// per-game level data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGame {
    /// Rapid mental arithmetic.
    QuickMath,
    /// Match a color word against a swatch.
    ColorMatch,
    /// Recall a briefly shown sequence.
    SequenceRecall,
    /// Count shapes in a grid.
    ShapeCount,
    /// Spot the item that does not belong.
    OddOneOut,
}

impl MiniGame {
    /// The pool of games eligible for session rotation.
    pub const MIXABLE: [MiniGame; 5] = [
        MiniGame::QuickMath,
        MiniGame::ColorMatch,
        MiniGame::SequenceRecall,
        MiniGame::ShapeCount,
        MiniGame::OddOneOut,
    ];

    /// Player-facing name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::QuickMath => "Quick Math",
            Self::ColorMatch => "Color Match",
            Self::SequenceRecall => "Sequence Recall",
            Self::ShapeCount => "Shape Count",
            Self::OddOneOut => "Odd One Out",
        }
    }

    /// Returns true if this game may be part of the mixed rotation.
    pub fn is_mixable(&self) -> bool {
        Self::MIXABLE.contains(self)
    }
}

impl std::fmt::Display for MiniGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_display() {
        assert_eq!(GameMode::Classic.to_string(), "classic");
        assert_eq!(GameMode::Endless.to_string(), "endless");
    }

    #[test]
    fn mixable_pool_is_complete() {
        for game in MiniGame::MIXABLE {
            assert!(game.is_mixable());
        }
    }

    #[test]
    fn serde_names_are_stable() {
        let json = serde_json::to_string(&MiniGame::QuickMath).unwrap();
        assert_eq!(json, "\"quick_math\"");
        let back: MiniGame = serde_json::from_str("\"odd_one_out\"").unwrap();
        assert_eq!(back, MiniGame::OddOneOut);
    }
}
