use crate::error::{CoreError, Result};
use crate::types::{MIN_CLIP_DURATION, MIN_TRANSITION_DURATION, TIME_EPSILON};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for trimming, transitions, snapping and undo depth.
///
/// Every field has a default, so a partial JSON document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrimConfig {
    /// Shortest clip any accepted trim may produce, in seconds.
    pub min_clip_duration: f64,
    /// Floor applied to every fade and crossfade, in seconds.
    pub min_transition_duration: f64,
    /// Absolute tolerance for time comparisons, in seconds.
    pub time_epsilon: f64,
    /// Maximum distance a dragged edge is pulled towards a snap point, in seconds.
    pub snap_threshold: f64,
    /// Number of trim batches kept for undo.
    pub history_limit: usize,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            min_clip_duration: MIN_CLIP_DURATION,
            min_transition_duration: MIN_TRANSITION_DURATION,
            time_epsilon: TIME_EPSILON,
            snap_threshold: 0.1,
            history_limit: 100,
        }
    }
}

impl TrimConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: TrimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&data)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_clip_duration.is_finite() && self.min_clip_duration > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "minClipDuration must be positive, got {}",
                self.min_clip_duration
            )));
        }
        if !(self.min_transition_duration.is_finite() && self.min_transition_duration > 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "minTransitionDuration must be positive, got {}",
                self.min_transition_duration
            )));
        }
        if !(self.time_epsilon.is_finite()
            && self.time_epsilon >= 0.0
            && self.time_epsilon < self.min_clip_duration)
        {
            return Err(CoreError::InvalidConfig(format!(
                "timeEpsilon must be in [0, minClipDuration), got {}",
                self.time_epsilon
            )));
        }
        if !(self.snap_threshold.is_finite() && self.snap_threshold >= 0.0) {
            return Err(CoreError::InvalidConfig(format!(
                "snapThreshold must be non-negative, got {}",
                self.snap_threshold
            )));
        }
        if self.history_limit == 0 {
            return Err(CoreError::InvalidConfig(
                "historyLimit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// `a ≈ b` within the configured tolerance.
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.time_epsilon
    }

    /// `a ≥ b` within the configured tolerance.
    pub fn approx_ge(&self, a: f64, b: f64) -> bool {
        a > b - self.time_epsilon
    }

    /// `a > b` by more than the configured tolerance.
    pub fn definitely_gt(&self, a: f64, b: f64) -> bool {
        a > b + self.time_epsilon
    }
}
