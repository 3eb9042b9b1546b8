//! JSON persistence for the learning blob.
//!
//! The learning state lives in `~/.config/timecoach/learning.json` and is
//! loaded once at run start, then written back after mutation. Callers are
//! expected to log and swallow save failures: analytics must never abort a
//! scheduling run's primary result.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::learning::LearningData;

/// Handle to the persisted learning blob.
#[derive(Debug, Clone)]
pub struct LearningStore {
    path: PathBuf,
}

impl LearningStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(super::data_dir()?.join("learning.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the blob. A missing file yields empty learning data.
    pub fn load(&self) -> Result<LearningData> {
        if !self.path.exists() {
            return Ok(LearningData::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the blob back. Goes through a sibling temp file and rename so a
    /// crash mid-write cannot leave a truncated blob behind.
    pub fn save(&self, data: &LearningData) -> Result<()> {
        let raw = serde_json::to_string_pretty(data)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::{EstimateAdjuster, TimeOfDay};

    #[test]
    fn missing_blob_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LearningStore::new(dir.path().join("learning.json"));
        let data = store.load().unwrap();
        assert!(data.task_estimates.is_empty());
        assert!(data.category_patterns.is_empty());
    }

    #[test]
    fn save_and_reload_preserves_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = LearningStore::new(dir.path().join("learning.json"));

        let mut adjuster = EstimateAdjuster::default();
        adjuster.record_completion("Write docs", "writing", 45, 60, TimeOfDay::Morning);
        store.save(adjuster.data()).unwrap();

        let reloaded = EstimateAdjuster::new(store.load().unwrap());
        assert_eq!(reloaded.improved_estimate("Write docs", "writing", 45), 60);
    }

    #[test]
    fn corrupt_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learning.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = LearningStore::new(path);
        assert!(store.load().is_err());
    }
}
