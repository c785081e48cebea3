//! Daemon configuration.
//!
//! Loaded from a TOML file; every field has a default so a missing or
//! partial file is fine. The threshold mode switch lives here so the
//! legacy/distinct decision stays a deployment choice.

use crate::error::UsherError;
use crate::history::DEFAULT_HISTORY_CAP;
use crate::scoring::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsherConfig {
    /// Where the snapshot and interaction log live
    pub state_dir: PathBuf,
    pub thresholds: Thresholds,
    /// Capacity of the in-memory recent-history buffer
    pub history_cap: usize,
    /// Interaction log rotation cap (entries)
    pub max_log_entries: usize,
    /// Behavior analysis interval
    pub analyze_interval_secs: u64,
    /// Tier re-evaluation interval
    pub evaluate_interval_secs: u64,
    /// Persistence flush interval
    pub persist_interval_secs: u64,
}

impl Default for UsherConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(crate::STATE_DIR),
            thresholds: Thresholds::default(),
            history_cap: DEFAULT_HISTORY_CAP,
            max_log_entries: 5000,
            analyze_interval_secs: 45,
            evaluate_interval_secs: 30,
            persist_interval_secs: 60,
        }
    }
}

impl UsherConfig {
    /// Load from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, UsherError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| UsherError::Config(e.to_string()))
    }

    /// Load from `USHER_CONFIG` or the default path, falling back to
    /// defaults on any error.
    pub fn load_or_default() -> Self {
        let path = std::env::var("USHER_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(crate::CONFIG_PATH));

        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("config unreadable at {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join(crate::INTERACTION_LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ThresholdMode;

    #[test]
    fn test_defaults() {
        let config = UsherConfig::default();
        assert_eq!(config.evaluate_interval_secs, 30);
        assert_eq!(config.history_cap, 100);
        assert_eq!(config.thresholds.intermediate, 1000);
    }

    #[test]
    fn test_load_missing_file_is_defaults() {
        let config = UsherConfig::load(Path::new("/nonexistent/usher.toml")).unwrap();
        assert_eq!(config, UsherConfig::default());
    }

    #[test]
    fn test_parse_partial_toml() {
        let text = r#"
            evaluate_interval_secs = 10

            [thresholds]
            intermediate = 500
            mode = "distinct"
        "#;
        let config: UsherConfig = toml::from_str(text).unwrap();
        assert_eq!(config.evaluate_interval_secs, 10);
        assert_eq!(config.thresholds.intermediate, 500);
        assert_eq!(config.thresholds.mode, ThresholdMode::Distinct);
        // Untouched fields keep defaults
        assert_eq!(config.persist_interval_secs, 60);
        assert_eq!(config.thresholds.expert, 5000);
    }

    #[test]
    fn test_load_real_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "history_cap = 16\n").unwrap();

        let config = UsherConfig::load(&path).unwrap();
        assert_eq!(config.history_cap, 16);
    }
}
