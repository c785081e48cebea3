//! Authoritative user progress state and its persisted snapshot.

use crate::feature::{self, FeatureId};
use crate::tier::ConfidenceTier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// In-memory progress state for a session.
///
/// Mutated only by the engine. The unlocked/locked partition is kept in
/// sync with the tier: together the two sets always cover the full
/// catalog and never overlap.
#[derive(Debug, Clone)]
pub struct ProgressState {
    pub score: u64,
    pub tier: ConfidenceTier,
    pub unlocked: Vec<FeatureId>,
    pub locked: Vec<FeatureId>,
}

impl ProgressState {
    pub fn new(score: u64, tier: ConfidenceTier) -> Self {
        let (unlocked, locked) = feature::apply_tier(tier);
        Self {
            score,
            tier,
            unlocked,
            locked,
        }
    }

    pub fn from_snapshot(snapshot: &ProgressSnapshot) -> Self {
        Self::new(snapshot.score, snapshot.tier)
    }

    /// Re-derive the partition after a tier change.
    pub fn set_tier(&mut self, tier: ConfidenceTier) {
        self.tier = tier;
        let (unlocked, locked) = feature::apply_tier(tier);
        self.unlocked = unlocked;
        self.locked = locked;
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            score: self.score,
            tier: self.tier,
            updated_at: Utc::now(),
        }
    }

    /// Partition invariant: every catalog feature is in exactly one set.
    pub fn partition_is_complete(&self) -> bool {
        self.unlocked.len() + self.locked.len() == feature::CATALOG.len()
            && self.unlocked.iter().all(|id| !self.locked.contains(id))
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(0, ConfidenceTier::Beginner)
    }
}

/// The durable snapshot written to the key-value store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub score: u64,
    pub tier: ConfidenceTier,
    pub updated_at: DateTime<Utc>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            score: 0,
            tier: ConfidenceTier::Beginner,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_beginner_zero() {
        let state = ProgressState::default();
        assert_eq!(state.score, 0);
        assert_eq!(state.tier, ConfidenceTier::Beginner);
        assert!(state.partition_is_complete());
    }

    #[test]
    fn test_set_tier_refreshes_partition() {
        let mut state = ProgressState::default();
        let beginner_unlocked = state.unlocked.len();

        state.set_tier(ConfidenceTier::Advanced);
        assert!(state.unlocked.len() > beginner_unlocked);
        assert!(state.locked.is_empty());
        assert!(state.partition_is_complete());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let state = ProgressState::new(1200, ConfidenceTier::Intermediate);
        let snapshot = state.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: ProgressSnapshot = serde_json::from_str(&json).unwrap();
        let restored = ProgressState::from_snapshot(&parsed);

        assert_eq!(restored.score, 1200);
        assert_eq!(restored.tier, ConfidenceTier::Intermediate);
        assert!(restored.partition_is_complete());
    }
}
