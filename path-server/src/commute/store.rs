//! Disk persistence for the commute pair.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::CommutePair;
use crate::topology::Topology;

/// Errors from saving or clearing the stored pair.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create store directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("failed to write commute file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to remove commute file: {0}")]
    Remove(#[source] std::io::Error),

    #[error("failed to serialize commute pair: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for the commute store.
#[derive(Debug, Clone)]
pub struct CommuteStoreConfig {
    /// Path to the JSON file.
    pub path: PathBuf,
}

impl CommuteStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for CommuteStoreConfig {
    fn default() -> Self {
        Self::new("commute.json")
    }
}

/// On-disk form.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCommute {
    pair: CommutePair,
}

/// Stores a single commute pair in a JSON file.
#[derive(Debug, Clone)]
pub struct CommuteStore {
    config: CommuteStoreConfig,
}

impl CommuteStore {
    pub fn new(config: CommuteStoreConfig) -> Self {
        Self { config }
    }

    /// Load the stored pair.
    ///
    /// Returns `None` if nothing is stored or the file can't be used.
    pub fn load(&self) -> Option<CommutePair> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        match serde_json::from_str::<StoredCommute>(&contents) {
            Ok(stored) => Some(stored.pair),
            Err(e) => {
                warn!(path = %self.config.path.display(), error = %e, "ignoring unreadable commute file");
                None
            }
        }
    }

    /// Load the stored pair, dropping it if either station is not in `topology`.
    pub fn load_for(&self, topology: &Topology) -> Option<CommutePair> {
        let pair = self.load()?;
        if topology.contains(&pair.home()) && topology.contains(&pair.work()) {
            Some(pair)
        } else {
            warn!(home = %pair.home(), work = %pair.work(), "stored commute references unknown stations");
            None
        }
    }

    /// Save the pair, replacing any stored one.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, pair: &CommutePair) -> Result<(), StoreError> {
        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(StoreError::CreateDir)?;
        }

        let json = serde_json::to_string_pretty(&StoredCommute { pair: *pair })?;
        std::fs::write(&self.config.path, json).map_err(StoreError::Write)?;
        Ok(())
    }

    /// Remove the stored pair. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.config.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Remove(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationCode;
    use crate::topology::path_topology;
    use tempfile::tempdir;

    fn pair(home: &str, work: &str) -> CommutePair {
        CommutePair::new(
            StationCode::parse(home).unwrap(),
            StationCode::parse(work).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = CommuteStore::new(CommuteStoreConfig::new(dir.path().join("commute.json")));

        store.save(&pair("GRV", "33S")).unwrap();
        assert_eq!(store.load(), Some(pair("GRV", "33S")));

        store.save(&pair("HOB", "WTC")).unwrap();
        assert_eq!(store.load(), Some(pair("HOB", "WTC")));
    }

    #[test]
    fn missing_file_loads_none() {
        let store = CommuteStore::new(CommuteStoreConfig::new("/nonexistent/path/commute.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_or_invalid_file_loads_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commute.json");
        let store = CommuteStore::new(CommuteStoreConfig::new(&path));

        std::fs::write(&path, "not json").unwrap();
        assert!(store.load().is_none());

        std::fs::write(&path, r#"{"pair":{"home":"HOB","work":"HOB"}}"#).unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn load_for_drops_unknown_stations() {
        let dir = tempdir().unwrap();
        let store = CommuteStore::new(CommuteStoreConfig::new(dir.path().join("commute.json")));
        let topology = path_topology();

        store.save(&pair("NWK", "ZZZ")).unwrap();
        assert!(store.load().is_some());
        assert!(store.load_for(&topology).is_none());

        store.save(&pair("NWK", "WTC")).unwrap();
        assert_eq!(store.load_for(&topology), Some(pair("NWK", "WTC")));
    }

    #[test]
    fn clear_removes_pair() {
        let dir = tempdir().unwrap();
        let store = CommuteStore::new(CommuteStoreConfig::new(dir.path().join("commute.json")));

        store.save(&pair("JSQ", "WTC")).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());

        // Clearing again is fine
        store.clear().unwrap();
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("commute.json");
        let store = CommuteStore::new(CommuteStoreConfig::new(&path));

        store.save(&pair("NWK", "HAR")).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }
}
