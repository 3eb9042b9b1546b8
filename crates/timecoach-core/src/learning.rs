//! Adaptive estimation model.
//!
//! Historical completion and decline events feed per-task and per-category
//! aggregates that improve future duration estimates and reveal productivity
//! patterns. The state is a plain value: callers load it from the store at
//! run start, hand it to an [`EstimateAdjuster`], and write it back after
//! mutation. There is no hidden global.
//!
//! Serialized field names are camelCase to stay compatible with the persisted
//! blob shape (`taskEstimates` / `categoryPatterns` / `timePreferences`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fallback estimate when an item has no nominal estimate and no history.
pub const DEFAULT_ESTIMATE_MINUTES: u32 = 45;

/// How many recent actual samples feed the per-task estimate.
const RECENT_SAMPLE_WINDOW: usize = 3;

/// Minimum samples before a per-category time-of-day bucket is trusted.
const CATEGORY_TOD_CONFIDENCE: u32 = 2;

/// Minimum combined samples before the cross-category best time is reported.
const GLOBAL_TOD_CONFIDENCE: u32 = 3;

/// Coarse part-of-day bucket used for productivity aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parallel (estimate, actual) sample history for one task key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskHistory {
    #[serde(default)]
    pub estimates: Vec<u32>,
    #[serde(default)]
    pub actuals: Vec<u32>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
}

/// Per-time-of-day efficiency bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    pub count: u32,
    pub total_efficiency: f64,
}

impl TimeBucket {
    pub fn mean_efficiency(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_efficiency / self.count as f64
        }
    }
}

/// Aggregated outcomes for one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPattern {
    #[serde(default)]
    pub completions: u32,
    #[serde(default)]
    pub declines: u32,
    #[serde(default)]
    pub total_estimated: u64,
    #[serde(default)]
    pub total_actual: u64,
    #[serde(default = "default_efficiency")]
    pub average_efficiency: f64,
    #[serde(default)]
    pub best_time_of_day: HashMap<TimeOfDay, TimeBucket>,
}

fn default_efficiency() -> f64 {
    1.0
}

impl Default for CategoryPattern {
    fn default() -> Self {
        Self {
            completions: 0,
            declines: 0,
            total_estimated: 0,
            total_actual: 0,
            average_efficiency: 1.0,
            best_time_of_day: HashMap::new(),
        }
    }
}

/// Global per-time-of-day completion/decline counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeOfDayRecord {
    #[serde(default)]
    pub completions: u32,
    #[serde(default)]
    pub declines: u32,
}

/// The full learning state, persisted across runs as an opaque blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningData {
    #[serde(default)]
    pub task_estimates: HashMap<String, TaskHistory>,
    #[serde(default)]
    pub category_patterns: HashMap<String, CategoryPattern>,
    #[serde(default)]
    pub time_preferences: HashMap<TimeOfDay, TimeOfDayRecord>,
}

/// Kind of productivity insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Productivity,
    Timing,
    Estimation,
}

/// A human-readable productivity finding for the notification collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityInsight {
    pub kind: InsightKind,
    pub message: String,
}

/// The adaptive estimation model.
///
/// Owns a [`LearningData`] value for the duration of a run. Every record or
/// decline call applies its aggregate updates through a single `&mut self`,
/// so no partially updated aggregate is ever observable.
#[derive(Debug, Default)]
pub struct EstimateAdjuster {
    data: LearningData,
}

impl EstimateAdjuster {
    pub fn new(data: LearningData) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &LearningData {
        &self.data
    }

    pub fn into_data(self) -> LearningData {
        self.data
    }

    /// Record a completed item: append the sample pair to the task key's
    /// history and fold it into the category aggregates.
    pub fn record_completion(
        &mut self,
        title: &str,
        category: &str,
        estimated_minutes: u32,
        actual_minutes: u32,
        time_of_day: TimeOfDay,
    ) {
        if estimated_minutes == 0 {
            tracing::warn!(title, "ignoring completion with zero estimate");
            return;
        }
        let key = task_key(title, category);
        let efficiency = actual_minutes as f64 / estimated_minutes as f64;

        let history = self.data.task_estimates.entry(key.clone()).or_default();
        if history.title.is_empty() {
            history.title = title.to_string();
            history.category = category.to_string();
        }
        history.estimates.push(estimated_minutes);
        history.actuals.push(actual_minutes);

        let pattern = self
            .data
            .category_patterns
            .entry(category.to_string())
            .or_default();
        pattern.completions += 1;
        pattern.total_estimated += estimated_minutes as u64;
        pattern.total_actual += actual_minutes as u64;
        pattern.average_efficiency = pattern.total_actual as f64 / pattern.total_estimated as f64;

        let bucket = pattern.best_time_of_day.entry(time_of_day).or_default();
        bucket.count += 1;
        bucket.total_efficiency += efficiency;

        self.data
            .time_preferences
            .entry(time_of_day)
            .or_default()
            .completions += 1;

        tracing::debug!(
            task = %key,
            category,
            estimated_minutes,
            actual_minutes,
            efficiency,
            "completion recorded"
        );
    }

    /// Record a declined item. Efficiency aggregates are untouched.
    pub fn record_decline(&mut self, category: &str, time_of_day: TimeOfDay) {
        self.data
            .category_patterns
            .entry(category.to_string())
            .or_default()
            .declines += 1;
        self.data
            .time_preferences
            .entry(time_of_day)
            .or_default()
            .declines += 1;

        tracing::debug!(category, time_of_day = %time_of_day, "decline recorded");
    }

    /// Best known estimate for an item, in minutes.
    ///
    /// Prefers the rounded mean of the last three actual durations for this
    /// exact task key; falls back to scaling the nominal estimate by the
    /// category's average efficiency; finally the nominal estimate itself
    /// (or 45 minutes when there is none).
    pub fn improved_estimate(&self, title: &str, category: &str, nominal_minutes: u32) -> u32 {
        let key = task_key(title, category);

        if let Some(history) = self.data.task_estimates.get(&key) {
            if !history.actuals.is_empty() {
                let recent: Vec<u32> = history
                    .actuals
                    .iter()
                    .rev()
                    .take(RECENT_SAMPLE_WINDOW)
                    .copied()
                    .collect();
                let mean = recent.iter().map(|&v| v as f64).sum::<f64>() / recent.len() as f64;
                return mean.round() as u32;
            }
        }

        let nominal = if nominal_minutes == 0 {
            DEFAULT_ESTIMATE_MINUTES
        } else {
            nominal_minutes
        };

        if let Some(pattern) = self.data.category_patterns.get(category) {
            if pattern.total_estimated > 0 {
                return (nominal as f64 * pattern.average_efficiency).round() as u32;
            }
        }

        nominal
    }

    /// Most efficient time of day for a category, if enough samples exist.
    pub fn best_time_for_category(&self, category: &str) -> Option<TimeOfDay> {
        let pattern = self.data.category_patterns.get(category)?;

        let mut best: Option<(TimeOfDay, f64)> = None;
        for (&tod, bucket) in &pattern.best_time_of_day {
            if bucket.count < CATEGORY_TOD_CONFIDENCE {
                continue;
            }
            let mean = bucket.mean_efficiency();
            if best.map_or(true, |(_, b)| mean > b) {
                best = Some((tod, mean));
            }
        }
        best.map(|(tod, _)| tod)
    }

    /// Symmetric estimate-accuracy score over all recorded samples.
    ///
    /// `min(sum_estimated/sum_actual, sum_actual/sum_estimated)` -- clamped
    /// to (0, 1], insensitive to the direction of mis-estimation. `None`
    /// when no samples exist.
    pub fn estimate_accuracy(&self) -> Option<f64> {
        let mut total_estimated = 0u64;
        let mut total_actual = 0u64;
        for history in self.data.task_estimates.values() {
            let pairs = history.estimates.len().min(history.actuals.len());
            total_estimated += history.estimates[..pairs].iter().map(|&v| v as u64).sum::<u64>();
            total_actual += history.actuals[..pairs].iter().map(|&v| v as u64).sum::<u64>();
        }
        if total_estimated == 0 || total_actual == 0 {
            return None;
        }
        let e = total_estimated as f64;
        let a = total_actual as f64;
        Some((e / a).min(a / e))
    }

    /// Read-only productivity report.
    pub fn productivity_insights(&self) -> Vec<ProductivityInsight> {
        let mut insights = Vec::new();

        if let Some((name, pattern)) = self
            .data
            .category_patterns
            .iter()
            .filter(|(_, p)| p.completions > 0)
            .max_by_key(|(_, p)| p.completions)
        {
            insights.push(ProductivityInsight {
                kind: InsightKind::Productivity,
                message: format!(
                    "Your most productive category is {} with {} completed tasks",
                    name, pattern.completions
                ),
            });
        }

        if let Some((tod, efficiency)) = self.best_overall_time() {
            insights.push(ProductivityInsight {
                kind: InsightKind::Timing,
                message: format!(
                    "You're most productive during {} with {:.0}% efficiency",
                    tod,
                    efficiency * 100.0
                ),
            });
        }

        if let Some(accuracy) = self.estimate_accuracy() {
            insights.push(ProductivityInsight {
                kind: InsightKind::Estimation,
                message: format!(
                    "Your time estimates are {:.0}% accurate on average",
                    accuracy * 100.0
                ),
            });
        }

        insights
    }

    /// Best time of day aggregated across all categories, gated at three
    /// combined samples.
    fn best_overall_time(&self) -> Option<(TimeOfDay, f64)> {
        let mut combined: HashMap<TimeOfDay, TimeBucket> = HashMap::new();
        for pattern in self.data.category_patterns.values() {
            for (&tod, bucket) in &pattern.best_time_of_day {
                let entry = combined.entry(tod).or_default();
                entry.count += bucket.count;
                entry.total_efficiency += bucket.total_efficiency;
            }
        }

        let mut best: Option<(TimeOfDay, f64)> = None;
        for (tod, bucket) in combined {
            if bucket.count < GLOBAL_TOD_CONFIDENCE {
                continue;
            }
            let mean = bucket.mean_efficiency();
            if best.map_or(true, |(_, b)| mean > b) {
                best = Some((tod, mean));
            }
        }
        best
    }
}

/// Normalized lookup key for a task's history.
///
/// Lowercased title with punctuation stripped, truncated to 20 characters
/// and prefixed with the category. Distinct tasks sharing this prefix merge
/// into one history, an accepted approximation.
pub fn task_key(title: &str, category: &str) -> String {
    let normalized: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    let trimmed = normalized.trim();
    let truncated: String = trimmed.chars().take(20).collect();
    format!("{}_{}", category, truncated)
}
