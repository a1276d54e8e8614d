pub mod reset;
pub mod simulate;
pub mod stats;

use std::path::Path;

use bb_core::{FileStore, GameMode, ProfileStore};

/// Open the profile store backed by the given file.
pub fn open_profile(path: &Path) -> ProfileStore {
    ProfileStore::load(Box::new(FileStore::open(path)))
}

/// Parse a mode argument.
pub fn parse_mode(mode: &str) -> Result<GameMode, String> {
    match mode.to_lowercase().as_str() {
        "classic" => Ok(GameMode::Classic),
        "endless" => Ok(GameMode::Endless),
        other => Err(format!("unknown mode '{other}', use: classic, endless")),
    }
}
