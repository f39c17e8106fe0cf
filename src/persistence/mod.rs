//! Statistics persistence
//!
//! Backends:
//! - `JsonFileStore`: JSON file on disk, written via tmp file + rename
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)
//! - `MemoryStore`: in-process, for tests and headless runs
//!
//! Stores report failures as [`StoreError`]; the session decides what to do
//! with them (it logs and carries on).

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::stats::Stats;

pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

/// Persistence failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stats I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stats record is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stats storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save contract for the single global stats record
pub trait StatsStore {
    /// Read the record. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Stats>, StoreError>;

    /// Overwrite the record
    fn save(&self, stats: &Stats) -> Result<(), StoreError>;

    /// Load, falling back to defaults on a missing record or any failure
    fn load_or_default(&self) -> Stats {
        match self.load() {
            Ok(Some(stats)) => stats,
            Ok(None) => {
                log::info!("No saved stats, starting fresh");
                Stats::default()
            }
            Err(e) => {
                log::warn!("Failed to load stats, using defaults: {}", e);
                Stats::default()
            }
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    stats: Option<Stats>,
    saves: usize,
    fail: bool,
}

/// In-memory store. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a record
    pub fn with_stats(stats: Stats) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().stats = Some(stats);
        store
    }

    /// Make every subsequent load/save fail
    pub fn set_failing(&self, fail: bool) {
        self.inner.borrow_mut().fail = fail;
    }

    /// Last successfully saved record
    pub fn stats(&self) -> Option<Stats> {
        self.inner.borrow().stats.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves
    }
}

impl StatsStore for MemoryStore {
    fn load(&self) -> Result<Option<Stats>, StoreError> {
        let inner = self.inner.borrow();
        if inner.fail {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        Ok(inner.stats.clone())
    }

    fn save(&self, stats: &Stats) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail {
            return Err(StoreError::Unavailable("memory store set to fail".into()));
        }
        inner.stats = Some(stats.clone());
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_round_trip_shared_between_clones() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let mut stats = Stats::default();
        stats.wins = 3;
        store.save(&stats).unwrap();
        assert_eq!(handle.stats().unwrap().wins, 3);
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn test_load_or_default_on_empty() {
        assert_eq!(MemoryStore::new().load_or_default(), Stats::default());
    }

    #[test]
    fn test_load_or_default_on_failure() {
        let mut stats = Stats::default();
        stats.losses = 9;
        let store = MemoryStore::with_stats(stats);
        store.set_failing(true);
        assert_eq!(store.load_or_default(), Stats::default());
        assert!(store.save(&Stats::default()).is_err());
    }
}
