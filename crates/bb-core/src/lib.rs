//! Core types for BrainBlitz: game modes, player stats, and persistence.
//!
//! This crate defines the data model shared by the pacing engine and the
//! session controller, plus the key/value persistence layer that durable
//! player state is written through. It has no game logic of its own — you
//! can construct a [`UserStats`] programmatically or deserialize one from
//! JSON.

/// Error types used throughout the crate.
pub mod error;
/// Game modes and mini-game identifiers.
pub mod game;
/// Persisted player statistics and ad-economy counters.
pub mod stats;
/// Key/value persistence and the write-through profile store.
pub mod store;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export game identifiers.
pub use game::{GameMode, MiniGame};
/// Re-export persisted state types.
pub use stats::{AdEconomyState, UserStats};
/// Re-export store types.
pub use store::{FileStore, KvStore, MemoryStore, ProfileStore};
