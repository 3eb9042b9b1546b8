pub mod config;
pub mod insights;
pub mod plan;
pub mod track;

use std::path::PathBuf;

use timecoach_core::{EstimateAdjuster, LearningStore, PlannerConfig};

/// Load the planner config from an explicit path or the default location.
pub fn load_config(path: Option<PathBuf>) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p,
        None => PlannerConfig::default_path()?,
    };
    Ok(PlannerConfig::load(&path)?)
}

/// Open the learning store, honoring an explicit blob path.
pub fn open_store(path: Option<PathBuf>) -> Result<LearningStore, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(LearningStore::new(p)),
        None => Ok(LearningStore::open_default()?),
    }
}

/// Load the learning blob into an adjuster. A broken blob degrades to empty
/// data with a warning -- analytics never block the primary workflow.
pub fn load_adjuster(store: &LearningStore) -> EstimateAdjuster {
    match store.load() {
        Ok(data) => EstimateAdjuster::new(data),
        Err(e) => {
            tracing::warn!(error = %e, "could not load learning data, starting empty");
            EstimateAdjuster::default()
        }
    }
}

/// Persist the learning blob, logging and swallowing failures.
pub fn save_learning(store: &LearningStore, adjuster: &EstimateAdjuster) {
    if let Err(e) = store.save(adjuster.data()) {
        tracing::warn!(error = %e, "could not save learning data");
    }
}
