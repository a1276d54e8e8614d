//! Ad-frequency gate and XP spending.
//!
//! Decides when a monetization interstitial should block navigation
//! between sessions, and handles the two resolution paths: watching the
//! ad, or paying XP to skip it. The in-session continue offer reuses the
//! XP spend but never touches the gate counter.

use bb_core::{AdEconomyState, GameMode, UserStats};

use crate::error::{SessionError, SessionResult};
use crate::provider::AdProvider;

/// Completed sessions between interstitials, per mode.
///
/// Endless gates less often, reflecting its higher session value.
pub fn frequency(mode: GameMode) -> u32 {
    match mode {
        GameMode::Classic => 3,
        GameMode::Endless => 4,
    }
}

/// Should the next navigation be blocked by an interstitial?
pub fn should_gate(ads: &AdEconomyState, mode: GameMode) -> bool {
    ads.games_since_last_ad >= frequency(mode)
}

/// Count one completed session toward the gate.
pub fn record_session(ads: &mut AdEconomyState) {
    ads.games_since_last_ad += 1;
}

/// Show the interstitial and resolve the gate.
///
/// Provider failure is absorbed as granted, so the counter resets and the
/// player moves on. A declined interstitial leaves the gate armed and
/// returns false.
pub fn watch_ad(provider: &mut dyn AdProvider, ads: &mut AdEconomyState) -> bool {
    if provider.show_interstitial().is_granted() {
        ads.games_since_last_ad = 0;
        ads.total_ads_watched += 1;
        true
    } else {
        false
    }
}

/// Pay XP to skip the interstitial.
///
/// Fails without mutating anything if the balance is short; the balance
/// can never go negative.
pub fn skip_with_xp(
    cost: u64,
    stats: &mut UserStats,
    ads: &mut AdEconomyState,
) -> SessionResult<()> {
    spend_xp(stats, cost)?;
    ads.games_since_last_ad = 0;
    ads.total_ads_skipped += 1;
    ads.xp_spent_on_skips += cost;
    Ok(())
}

/// Deduct XP with a checked balance.
pub fn spend_xp(stats: &mut UserStats, cost: u64) -> SessionResult<()> {
    match stats.total_xp.checked_sub(cost) {
        Some(rest) => {
            stats.total_xp = rest;
            Ok(())
        }
        None => Err(SessionError::InsufficientXp {
            have: stats.total_xp,
            need: cost,
        }),
    }
}
