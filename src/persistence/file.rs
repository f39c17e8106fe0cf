//! JSON file backend

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StatsStore, StoreError};
use crate::stats::Stats;

/// Default file name, relative to the working directory
pub const DEFAULT_STATS_FILE: &str = "crash_flight_stats.json";

/// Stats stored as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_STATS_FILE)
    }
}

impl StatsStore for JsonFileStore {
    fn load(&self) -> Result<Option<Stats>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stats = serde_json::from_str(&json)?;
        log::info!("Loaded stats from {}", self.path.display());
        Ok(Some(stats))
    }

    fn save(&self, stats: &Stats) -> Result<(), StoreError> {
        let json = serde_json::to_string(stats)?;
        // Write aside then swap in so a crash mid-write keeps the old record
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Stats saved to {}", self.path.display());
        Ok(())
    }
}
