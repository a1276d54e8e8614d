//! Mini-game question generators for BrainBlitz.
//!
//! One quiz item per call, parameterized by the tier-scaled
//! [`GameParams`](bb_engine::GameParams) from the engine. Generators are
//! stateless from the session's point of view: all randomness comes from
//! the caller's RNG, so a seeded run reproduces its questions.

/// Question generation per mini-game.
pub mod generate;
/// The quiz item type.
pub mod question;

/// Re-export the generator entry point.
pub use generate::generate;
/// Re-export the quiz item type.
pub use question::Question;
