//! Typed wrapper over durable key-value storage.
//!
//! Two named values survive restarts: `emailHistory` (entry list, newest
//! first, capped) and `emailStats` (aggregate counters). Each value falls
//! back independently to its default when absent or malformed; malformed
//! data is discarded, not repaired. Writes are last-write-wins across
//! processes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::{debug, warn};

use triage_core::defaults::{HISTORY_KEY, STATS_KEY};
use triage_core::{Error, HistoryEntry, Result, Stats};

/// Everything the store persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    /// Newest-first, length ≤ [`triage_core::defaults::HISTORY_CAP`].
    pub history: Vec<HistoryEntry>,
    pub stats: Stats,
}

/// Durable storage for history and stats.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load persisted state, defaulting absent or malformed values.
    async fn load(&self) -> Result<PersistedState>;

    /// Persist both structures.
    async fn save(&self, state: &PersistedState) -> Result<()>;

    /// Remove all persisted state.
    async fn clear(&self) -> Result<()>;
}

// =============================================================================
// FILE-BACKED STORE
// =============================================================================

/// JSON-file-backed store.
///
/// Each named value lives in its own file under the state directory and is
/// written atomically (tmp file + rename) so a crashed write never leaves a
/// half-serialized document behind.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read one named value, defaulting on absence or malformed content.
    async fn read_value<T: serde::de::DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let path = self.value_path(key);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(key, "No persisted value, using default");
                return Ok(T::default());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed persisted value");
                Ok(T::default())
            }
        }
    }

    /// Write one named value atomically.
    async fn write_value<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.value_path(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));

        let raw = serde_json::to_vec_pretty(value)?;
        fs::write(&tmp, &raw).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove_value(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.value_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self) -> Result<PersistedState> {
        let history: Vec<HistoryEntry> = self.read_value(HISTORY_KEY).await?;
        let stats: Stats = self.read_value(STATS_KEY).await?;
        Ok(PersistedState { history, stats })
    }

    async fn save(&self, state: &PersistedState) -> Result<()> {
        self.write_value(HISTORY_KEY, &state.history).await?;
        self.write_value(STATS_KEY, &state.stats).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.remove_value(HISTORY_KEY).await?;
        self.remove_value(STATS_KEY).await?;
        Ok(())
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory store for unit tests; no durability.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<Option<PersistedState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored state, if any save happened.
    pub fn snapshot(&self) -> Option<PersistedState> {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<PersistedState> {
        Ok(self.state.lock().unwrap().clone().unwrap_or_default())
    }

    async fn save(&self, state: &PersistedState) -> Result<()> {
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.state.lock().unwrap() = None;
        Ok(())
    }
}
