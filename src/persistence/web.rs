//! Browser LocalStorage backend (wasm32 only)

use super::{StatsStore, StoreError};
use crate::stats::Stats;

/// Stats stored under a single LocalStorage key
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "crash_flight_stats";

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StoreError::Unavailable("no LocalStorage".into()))
    }
}

impl StatsStore for LocalStorageStore {
    fn load(&self) -> Result<Option<Stats>, StoreError> {
        let storage = Self::storage()?;
        let json = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        match json {
            Some(json) => {
                let stats = serde_json::from_str(&json)?;
                log::info!("Loaded stats from LocalStorage");
                Ok(Some(stats))
            }
            None => Ok(None),
        }
    }

    fn save(&self, stats: &Stats) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(stats)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Stats saved");
        Ok(())
    }
}
