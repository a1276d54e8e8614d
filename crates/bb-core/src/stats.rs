//! Persisted player statistics and ad-economy counters.
//!
//! Both structs are process-wide singletons with a load-at-startup,
//! write-on-every-mutation lifecycle (see [`crate::store::ProfileStore`]).
//! Every field defaults so that missing or malformed stored JSON degrades
//! to a fresh profile instead of an error.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::game::MiniGame;

/// Durable player progress, merged once per completed session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    /// Best score achieved in a classic session.
    pub classic_high_score: u64,
    /// Longest streak achieved in an endless session.
    pub endless_best_streak: u32,
    /// Lifetime experience points. Never negative; spending goes through
    /// the ad-economy gate, which uses checked subtraction.
    pub total_xp: u64,
    /// Number of finalized sessions.
    pub total_games_played: u64,
    /// Lifetime correct answers.
    pub total_correct_answers: u64,
    /// Per-mini-game progression levels.
    pub game_levels: HashMap<MiniGame, u32>,
    /// Calendar date of the most recent finalized session.
    pub last_played: Option<NaiveDate>,
    /// Consecutive calendar days with at least one finalized session.
    /// Incremented only when `last_played` was exactly yesterday; never
    /// decremented, reset to 1 after a gap.
    pub day_streak: u32,
}

impl UserStats {
    /// Average correct answers per finalized session.
    ///
    /// A profile with no sessions reports 0.0, not NaN.
    pub fn correct_per_game(&self) -> f64 {
        if self.total_games_played == 0 {
            return 0.0;
        }
        self.total_correct_answers as f64 / self.total_games_played as f64
    }

    /// Level of a mini-game, defaulting to 0 for games never leveled.
    pub fn game_level(&self, game: MiniGame) -> u32 {
        self.game_levels.get(&game).copied().unwrap_or(0)
    }
}

/// Durable monetization counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdEconomyState {
    /// Completed sessions since an interstitial was last shown or skipped.
    pub games_since_last_ad: u32,
    /// Lifetime interstitials actually watched.
    pub total_ads_watched: u64,
    /// Lifetime interstitials skipped by spending XP.
    pub total_ads_skipped: u64,
    /// Lifetime XP spent on skips.
    pub xp_spent_on_skips: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zeroed() {
        let stats = UserStats::default();
        assert_eq!(stats.total_xp, 0);
        assert_eq!(stats.day_streak, 0);
        assert!(stats.last_played.is_none());
        assert!(stats.game_levels.is_empty());
    }

    #[test]
    fn correct_per_game_guards_divide_by_zero() {
        let stats = UserStats::default();
        assert_eq!(stats.correct_per_game(), 0.0);
    }

    #[test]
    fn correct_per_game_averages() {
        let stats = UserStats {
            total_games_played: 4,
            total_correct_answers: 30,
            ..UserStats::default()
        };
        assert!((stats.correct_per_game() - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn game_level_defaults_to_zero() {
        let mut stats = UserStats::default();
        assert_eq!(stats.game_level(MiniGame::QuickMath), 0);
        stats.game_levels.insert(MiniGame::QuickMath, 3);
        assert_eq!(stats.game_level(MiniGame::QuickMath), 3);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let stats: UserStats = serde_json::from_str(r#"{"total_xp": 120}"#).unwrap();
        assert_eq!(stats.total_xp, 120);
        assert_eq!(stats.total_games_played, 0);
    }

    #[test]
    fn round_trip_serde() {
        let mut stats = UserStats {
            classic_high_score: 900,
            day_streak: 4,
            last_played: NaiveDate::from_ymd_opt(2026, 8, 27),
            ..UserStats::default()
        };
        stats.game_levels.insert(MiniGame::ColorMatch, 2);

        let json = serde_json::to_string(&stats).unwrap();
        let back: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }
}
