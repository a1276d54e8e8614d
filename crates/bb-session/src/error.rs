//! Error types for session operations.

use thiserror::Error;

/// Alias for `Result<T, SessionError>`.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while driving a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The enabled-games set contains no game from the mixable pool.
    #[error("no mixable games enabled")]
    NoMixableGames,

    /// The session has not been started yet.
    #[error("session not started")]
    NotStarted,

    /// An event arrived in a phase that cannot accept it.
    #[error("invalid transition: {event} in phase {phase}")]
    InvalidTransition {
        /// The event that was attempted.
        event: &'static str,
        /// The phase the session was in.
        phase: &'static str,
    },

    /// A continue resolution arrived with no continue pending.
    #[error("no continue is pending")]
    NoPendingContinue,

    /// An XP spend exceeded the player's balance.
    #[error("not enough XP: have {have}, need {need}")]
    InsufficientXp {
        /// Current XP balance.
        have: u64,
        /// XP required for the purchase.
        need: u64,
    },

    /// Persistence failure while writing stats.
    #[error(transparent)]
    Core(#[from] bb_core::CoreError),
}
