//! Collaborator traits: ad provider and feedback sink.
//!
//! The core never talks to a real ad SDK or audio engine; it consumes
//! these seams. Ad failures are absorbed at this boundary: a provider
//! error is deliberately indistinguishable from a granted reward, so a
//! flaky network never blocks the player (see [`AdOutcome::absorb_failure`]).

use serde::{Deserialize, Serialize};

/// What came back from an ad display call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdOutcome {
    /// The ad played to completion; the reward applies.
    Granted,
    /// The player closed the ad early; no reward.
    Declined,
    /// The provider rejected, timed out, or errored.
    Failed,
}

impl AdOutcome {
    /// Map provider failure to a granted reward.
    ///
    /// Failure is treated as success for UX continuity. This is policy,
    /// not error swallowing: a declined ad stays declined.
    pub fn absorb_failure(self) -> AdOutcome {
        match self {
            Self::Failed => Self::Granted,
            other => other,
        }
    }

    /// Returns true if the reward applies after failure absorption.
    pub fn is_granted(self) -> bool {
        self.absorb_failure() == Self::Granted
    }
}

/// Displays monetization ads. Implementations may block; the core only
/// observes the final outcome.
pub trait AdProvider {
    /// Show a between-session interstitial.
    fn show_interstitial(&mut self) -> AdOutcome;
    /// Show a rewarded ad (used for the endless continue).
    fn show_rewarded(&mut self) -> AdOutcome;
}

/// Provider that always grants. Used by the simulator and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantingProvider;

impl AdProvider for GrantingProvider {
    fn show_interstitial(&mut self) -> AdOutcome {
        AdOutcome::Granted
    }

    fn show_rewarded(&mut self) -> AdOutcome {
        AdOutcome::Granted
    }
}

/// Sound cues the session may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundKind {
    /// A correct answer.
    Correct,
    /// A wrong answer.
    Wrong,
    /// A tier boundary was crossed.
    TierUp,
    /// The run ended.
    GameOver,
}

/// Haptic cues the session may trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    /// Subtle tick.
    Light,
    /// Emphatic buzz.
    Heavy,
}

/// Fire-and-forget audio/haptic sink. The core never observes a return
/// value from these calls.
pub trait FeedbackSink {
    /// Play a sound cue.
    fn play_sound(&mut self, kind: SoundKind);
    /// Trigger a haptic cue.
    fn trigger_haptic(&mut self, kind: HapticKind);
}

/// Sink that does nothing. The default when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play_sound(&mut self, _kind: SoundKind) {}
    fn trigger_haptic(&mut self, _kind: HapticKind) {}
}
