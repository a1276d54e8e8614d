//! Key/value persistence and the write-through profile store.
//!
//! The engine consumes persistence as a JSON blob store: `get` returns
//! whatever was last written (or nothing), `set` replaces it. Missing or
//! malformed JSON on read falls back to defaults rather than erroring —
//! losing a stat is acceptable, crashing over a corrupt profile is not.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::stats::{AdEconomyState, UserStats};

/// Storage key for [`UserStats`].
pub const STATS_KEY: &str = "user_stats";
/// Storage key for [`AdEconomyState`].
pub const ADS_KEY: &str = "ad_economy";

/// A JSON blob store with single-writer semantics.
pub trait KvStore {
    /// Read the value last written under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;
    /// Replace the value under `key`, persisting immediately.
    fn set(&mut self, key: &str, value: Value) -> CoreResult<()>;
}

/// Volatile in-memory store, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk.
///
/// The whole document is rewritten on every `set`; there is no batching,
/// matching the one-writer-per-profile model.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl FileStore {
    /// Open a store at `path`, loading any existing document.
    ///
    /// A missing file yields an empty store; an unreadable or malformed
    /// document is discarded and replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> CoreResult<()> {
        let parent = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).map_err(|source| CoreError::StoreIo {
                path: self.path.clone(),
                source,
            })?;
        }
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, text).map_err(|source| CoreError::StoreIo {
            path: self.path.clone(),
            source,
        })
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) -> CoreResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// Write-through owner of the two persisted singletons.
///
/// Loads [`UserStats`] and [`AdEconomyState`] once at construction and
/// writes the mutated struct back to the store immediately after every
/// update closure runs.
pub struct ProfileStore {
    store: Box<dyn KvStore>,
    stats: UserStats,
    ads: AdEconomyState,
}

impl ProfileStore {
    /// Load a profile from the given store.
    pub fn load(store: Box<dyn KvStore>) -> Self {
        let stats = read_or_default(store.as_ref(), STATS_KEY);
        let ads = read_or_default(store.as_ref(), ADS_KEY);
        Self { store, stats, ads }
    }

    /// Load a profile backed by an in-memory store.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    /// Current player stats.
    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    /// Current ad-economy counters.
    pub fn ads(&self) -> &AdEconomyState {
        &self.ads
    }

    /// Mutate the player stats and persist the result.
    pub fn update_stats<T>(&mut self, f: impl FnOnce(&mut UserStats) -> T) -> CoreResult<T> {
        let out = f(&mut self.stats);
        self.store.set(STATS_KEY, serde_json::to_value(&self.stats)?)?;
        Ok(out)
    }

    /// Mutate the ad counters and persist the result.
    pub fn update_ads<T>(&mut self, f: impl FnOnce(&mut AdEconomyState) -> T) -> CoreResult<T> {
        let out = f(&mut self.ads);
        self.store.set(ADS_KEY, serde_json::to_value(&self.ads)?)?;
        Ok(out)
    }

    /// Mutate both persisted singletons in one step, persisting each.
    ///
    /// Used by flows that touch the XP balance and the ad counters
    /// together (an XP-priced ad skip).
    pub fn update<T>(
        &mut self,
        f: impl FnOnce(&mut UserStats, &mut AdEconomyState) -> T,
    ) -> CoreResult<T> {
        let out = f(&mut self.stats, &mut self.ads);
        self.store.set(STATS_KEY, serde_json::to_value(&self.stats)?)?;
        self.store.set(ADS_KEY, serde_json::to_value(&self.ads)?)?;
        Ok(out)
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("stats", &self.stats)
            .field("ads", &self.ads)
            .finish_non_exhaustive()
    }
}

fn read_or_default<T: serde::de::DeserializeOwned + Default>(store: &dyn KvStore, key: &str) -> T {
    store
        .get(key)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default()
}
