//! Session state machine, scoring ledger, and ad-economy gate for BrainBlitz.
//!
//! A [`GameSession`] owns one run of the game: it feeds answers to the
//! pacing engine, rotates mini-games, enforces the classic/endless mode
//! rules including the endless "continue" negotiation, and finalizes the
//! run into durable player stats exactly once. The ad-economy gate decides
//! when a monetization interstitial blocks navigation between sessions.
//!
//! Everything here is single-threaded and synchronous: one external event
//! per call, no timers, no background work.

/// Session configuration.
pub mod config;
/// Ad-frequency gate and XP spending.
pub mod economy;
/// Error types for session operations.
pub mod error;
/// Collaborator traits: ad provider and feedback sink.
pub mod provider;
/// Per-session tallies and the stat-merge ledger.
pub mod scoring;
/// The session state machine.
pub mod session;

/// Re-export session configuration.
pub use config::SessionConfig;
/// Re-export error types.
pub use error::{SessionError, SessionResult};
/// Re-export collaborator types.
pub use provider::{AdOutcome, AdProvider, FeedbackSink, GrantingProvider, NullFeedback};
/// Re-export scoring types.
pub use scoring::{SessionReport, SessionTally};
/// Re-export the session state machine.
pub use session::{
    AnswerFeedback, ContinueChoice, ContinueResolution, GameSession, PendingDeath, SessionPhase,
};
