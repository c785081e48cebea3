//! Wire types describing daemon and progress state for usherctl.

use crate::history::BehaviorProfile;
use crate::scoring::{ThresholdMode, Thresholds};
use crate::tier::ConfidenceTier;
use serde::{Deserialize, Serialize};

/// Daemon status for the `status` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonStatus {
    pub version: String,
    pub pid: u32,
    pub uptime_secs: u64,
    pub score: u64,
    pub tier: ConfidenceTier,
    pub unlocked_count: usize,
    pub locked_count: usize,
    pub threshold_mode: ThresholdMode,
    /// Whether the most recent snapshot flush succeeded
    pub last_persist_ok: bool,
}

/// Progress detail for the `progress` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub score: u64,
    pub tier: ConfidenceTier,
    pub next_tier: Option<ConfidenceTier>,
    /// Points still needed for the next tier, None at the top
    pub points_to_next: Option<u64>,
    pub thresholds: Thresholds,
    pub profile: BehaviorProfile,
}

/// One catalog entry with its unlock state, for the `features` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tier: ConfidenceTier,
    pub unlocked: bool,
}

/// Full catalog view for the `features` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureList {
    pub tier: ConfidenceTier,
    pub features: Vec<FeatureEntry>,
}

impl FeatureList {
    /// Build the catalog view for a tier.
    pub fn for_tier(tier: ConfidenceTier) -> Self {
        let features = crate::feature::CATALOG
            .iter()
            .map(|f| FeatureEntry {
                id: f.id.to_string(),
                name: f.name.to_string(),
                description: f.description.to_string(),
                tier: f.tier,
                unlocked: f.tier <= tier,
            })
            .collect();
        Self { tier, features }
    }

    pub fn unlocked_count(&self) -> usize {
        self.features.iter().filter(|f| f.unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_list_for_tier() {
        let list = FeatureList::for_tier(ConfidenceTier::Intermediate);
        assert_eq!(list.features.len(), crate::feature::CATALOG.len());
        assert!(list
            .features
            .iter()
            .any(|f| f.id == "analytics" && f.unlocked));
        assert!(list.features.iter().any(|f| f.id == "defi" && !f.unlocked));
    }

    #[test]
    fn test_feature_list_serde_roundtrip() {
        let list = FeatureList::for_tier(ConfidenceTier::Advanced);
        let json = serde_json::to_string(&list).unwrap();
        let parsed: FeatureList = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.unlocked_count(), parsed.features.len());
    }
}
