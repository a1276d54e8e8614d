//! Per-session tallies and the stat-merge ledger.
//!
//! [`SessionTally`] accumulates live counters while a session runs;
//! [`finalize`] merges a finished tally into the persisted [`UserStats`]
//! exactly once. The idempotence guard against duplicate termination
//! events lives in the session controller, which caches its report.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bb_core::{GameMode, MiniGame, UserStats};

/// XP per correct answer.
pub const XP_PER_CORRECT: u64 = 10;
/// XP bonus per full streak block.
pub const XP_PER_STREAK_BLOCK: u64 = 25;
/// Streak length of one bonus block.
pub const STREAK_BLOCK: u32 = 5;
/// Correct answers in one mini-game needed for one level.
pub const CORRECT_PER_LEVEL: u32 = 5;

/// The outcome of the most recent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastResult {
    /// No answer yet.
    #[default]
    None,
    /// The last answer was correct.
    Correct,
    /// The last answer was wrong.
    Wrong,
}

/// Live counters for one running session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTally {
    /// Accumulated score.
    pub score: u64,
    /// Correct answers so far.
    pub correct: u32,
    /// Wrong answers so far.
    pub wrong: u32,
    /// Consecutive correct answers since the last reset.
    pub streak: u32,
    /// Longest streak reached this session.
    pub best_streak: u32,
    /// Correct answers per mini-game, for level progression.
    pub per_game_correct: HashMap<MiniGame, u32>,
    /// Outcome of the most recent answer.
    pub last_result: LastResult,
}

impl SessionTally {
    /// Record a correct answer worth `points`.
    pub fn record_correct(&mut self, game: MiniGame, points: u64) {
        self.score += points;
        self.correct += 1;
        self.streak += 1;
        self.best_streak = self.best_streak.max(self.streak);
        *self.per_game_correct.entry(game).or_insert(0) += 1;
        self.last_result = LastResult::Correct;
    }

    /// Record a wrong answer. The streak resets; the score is untouched.
    pub fn record_wrong(&mut self) {
        self.wrong += 1;
        self.streak = 0;
        self.last_result = LastResult::Wrong;
    }

    /// Session accuracy in `[0.0, 1.0]`; 0.0 with no attempts, never NaN.
    pub fn accuracy(&self) -> f64 {
        let attempts = self.correct + self.wrong;
        if attempts == 0 {
            return 0.0;
        }
        f64::from(self.correct) / f64::from(attempts)
    }
}

/// Final tallies of a finalized session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Mode the session was played in.
    pub mode: GameMode,
    /// Final score.
    pub score: u64,
    /// Longest streak reached.
    pub streak: u32,
    /// Correct answers.
    pub correct: u32,
    /// Wrong answers.
    pub wrong: u32,
    /// XP credited to the profile.
    pub xp_gained: u64,
    /// Whether this session set a new mode high score.
    pub is_new_high_score: bool,
    /// Wall-clock session length in seconds.
    pub duration_secs: u64,
}

/// The fallback session XP formula.
///
/// Used only when the caller supplies no authoritative XP value; a
/// supplied value always wins because it may include bonuses computed
/// elsewhere (per-tier multipliers).
pub fn session_xp(correct: u32, best_streak: u32) -> u64 {
    u64::from(correct) * XP_PER_CORRECT
        + u64::from(best_streak / STREAK_BLOCK) * XP_PER_STREAK_BLOCK
}

/// Merge a finished tally into the persisted stats.
///
/// Returns `(xp_gained, is_new_high_score)`. Must be called exactly once
/// per session; the session controller guarantees that.
pub fn finalize(
    tally: &SessionTally,
    mode: GameMode,
    today: NaiveDate,
    explicit_xp: Option<u64>,
    stats: &mut UserStats,
) -> (u64, bool) {
    let xp = explicit_xp.unwrap_or_else(|| session_xp(tally.correct, tally.best_streak));

    // Exactly one of the two records is eligible, selected by mode.
    let is_new_high_score = match mode {
        GameMode::Classic => {
            if tally.score > stats.classic_high_score {
                stats.classic_high_score = tally.score;
                true
            } else {
                false
            }
        }
        GameMode::Endless => {
            if tally.best_streak > stats.endless_best_streak {
                stats.endless_best_streak = tally.best_streak;
                true
            } else {
                false
            }
        }
    };

    update_day_streak(stats, today);

    stats.total_games_played += 1;
    stats.total_correct_answers += u64::from(tally.correct);
    stats.total_xp += xp;

    for (&game, &correct) in &tally.per_game_correct {
        let levels = correct / CORRECT_PER_LEVEL;
        if levels > 0 {
            *stats.game_levels.entry(game).or_insert(0) += levels;
        }
    }

    (xp, is_new_high_score)
}

/// Day-streak law: unchanged on a same-day repeat, +1 when the previous
/// session was exactly yesterday, reset to 1 after any gap.
fn update_day_streak(stats: &mut UserStats, today: NaiveDate) {
    match stats.last_played {
        Some(last) if last == today => {}
        Some(last) if last.succ_opt() == Some(today) => stats.day_streak += 1,
        _ => stats.day_streak = 1,
    }
    stats.last_played = Some(today);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tally(correct: u32, wrong: u32, best_streak: u32, score: u64) -> SessionTally {
        SessionTally {
            score,
            correct,
            wrong,
            streak: 0,
            best_streak,
            per_game_correct: HashMap::new(),
            last_result: LastResult::Wrong,
        }
    }

    #[test]
    fn tally_tracks_streaks() {
        let mut t = SessionTally::default();
        t.record_correct(MiniGame::QuickMath, 10);
        t.record_correct(MiniGame::QuickMath, 10);
        t.record_wrong();
        t.record_correct(MiniGame::ColorMatch, 12);

        assert_eq!(t.correct, 3);
        assert_eq!(t.wrong, 1);
        assert_eq!(t.streak, 1);
        assert_eq!(t.best_streak, 2);
        assert_eq!(t.score, 32);
        assert_eq!(t.per_game_correct[&MiniGame::QuickMath], 2);
        assert_eq!(t.last_result, LastResult::Correct);
    }

    #[test]
    fn accuracy_guards_zero_attempts() {
        assert_eq!(SessionTally::default().accuracy(), 0.0);
        let t = tally(3, 1, 3, 0);
        assert!((t.accuracy() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn xp_formula_example() {
        // 8 correct, streak 12: 8*10 + floor(12/5)*25 = 130.
        assert_eq!(session_xp(8, 12), 130);
        assert_eq!(session_xp(0, 0), 0);
        assert_eq!(session_xp(1, 4), 10);
    }

    #[test]
    fn explicit_xp_wins_over_formula() {
        let mut stats = UserStats::default();
        let (xp, _) = finalize(
            &tally(8, 0, 12, 100),
            GameMode::Classic,
            date(2026, 8, 27),
            Some(999),
            &mut stats,
        );
        assert_eq!(xp, 999);
        assert_eq!(stats.total_xp, 999);
    }

    #[test]
    fn classic_updates_only_classic_high_score() {
        let mut stats = UserStats::default();
        let (_, high) = finalize(
            &tally(5, 2, 4, 300),
            GameMode::Classic,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert!(high);
        assert_eq!(stats.classic_high_score, 300);
        assert_eq!(stats.endless_best_streak, 0);

        // A lower score is not a new high.
        let (_, high) = finalize(
            &tally(2, 2, 2, 120),
            GameMode::Classic,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert!(!high);
        assert_eq!(stats.classic_high_score, 300);
    }

    #[test]
    fn endless_compares_best_streak() {
        let mut stats = UserStats::default();
        let (_, high) = finalize(
            &tally(9, 1, 9, 500),
            GameMode::Endless,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert!(high);
        assert_eq!(stats.endless_best_streak, 9);
        assert_eq!(stats.classic_high_score, 0);
    }

    #[test]
    fn day_streak_increments_after_yesterday() {
        let mut stats = UserStats {
            last_played: Some(date(2026, 8, 26)),
            day_streak: 3,
            ..UserStats::default()
        };
        finalize(
            &tally(1, 0, 1, 10),
            GameMode::Classic,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert_eq!(stats.day_streak, 4);
        assert_eq!(stats.last_played, Some(date(2026, 8, 27)));
    }

    #[test]
    fn day_streak_resets_after_gap() {
        let mut stats = UserStats {
            last_played: Some(date(2026, 8, 25)),
            day_streak: 7,
            ..UserStats::default()
        };
        finalize(
            &tally(1, 0, 1, 10),
            GameMode::Classic,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert_eq!(stats.day_streak, 1);
    }

    #[test]
    fn day_streak_untouched_same_day() {
        let mut stats = UserStats {
            last_played: Some(date(2026, 8, 27)),
            day_streak: 5,
            ..UserStats::default()
        };
        finalize(
            &tally(1, 0, 1, 10),
            GameMode::Classic,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert_eq!(stats.day_streak, 5);
    }

    #[test]
    fn day_streak_starts_at_one_for_fresh_profile() {
        let mut stats = UserStats::default();
        finalize(
            &tally(1, 0, 1, 10),
            GameMode::Endless,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert_eq!(stats.day_streak, 1);
    }

    #[test]
    fn day_streak_handles_month_boundary() {
        let mut stats = UserStats {
            last_played: Some(date(2026, 8, 31)),
            day_streak: 2,
            ..UserStats::default()
        };
        finalize(
            &tally(1, 0, 1, 10),
            GameMode::Classic,
            date(2026, 9, 1),
            None,
            &mut stats,
        );
        assert_eq!(stats.day_streak, 3);
    }

    #[test]
    fn totals_accumulate_once_per_finalize() {
        let mut stats = UserStats::default();
        finalize(
            &tally(6, 2, 5, 80),
            GameMode::Classic,
            date(2026, 8, 27),
            None,
            &mut stats,
        );
        assert_eq!(stats.total_games_played, 1);
        assert_eq!(stats.total_correct_answers, 6);
        assert_eq!(stats.total_xp, 85);
    }

    #[test]
    fn game_levels_grow_with_correct_blocks() {
        let mut stats = UserStats::default();
        let mut t = tally(12, 0, 12, 100);
        t.per_game_correct.insert(MiniGame::QuickMath, 11);
        t.per_game_correct.insert(MiniGame::ColorMatch, 1);
        finalize(&t, GameMode::Classic, date(2026, 8, 27), None, &mut stats);
        assert_eq!(stats.game_level(MiniGame::QuickMath), 2);
        assert_eq!(stats.game_level(MiniGame::ColorMatch), 0);
    }
}
