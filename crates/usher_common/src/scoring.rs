//! Score-to-tier evaluation.
//!
//! Three thresholds are configured but the shipped dashboard only ever
//! produced two transitions: the advanced threshold collapses into the
//! intermediate branch and only the expert threshold grants Advanced.
//! That behavior is preserved under [`ThresholdMode::Legacy`] (the
//! default); [`ThresholdMode::Distinct`] is the corrected reading where
//! each named threshold produces its own tier. Which one is right is a
//! product decision, so both stay implemented and tested.

use crate::tier::ConfidenceTier;
use serde::{Deserialize, Serialize};

/// How the three configured thresholds map to tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Shipped behavior: advanced folds into intermediate, expert grants Advanced.
    #[default]
    Legacy,
    /// Corrected behavior: intermediate and advanced each grant their tier.
    Distinct,
}

/// Tier thresholds plus the evaluation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub intermediate: u64,
    pub advanced: u64,
    pub expert: u64,
    pub mode: ThresholdMode,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            intermediate: 1000,
            advanced: 2500,
            expert: 5000,
            mode: ThresholdMode::default(),
        }
    }
}

impl Thresholds {
    /// Score at which Advanced is granted under the current mode.
    pub fn advanced_boundary(&self) -> u64 {
        match self.mode {
            ThresholdMode::Legacy => self.expert,
            ThresholdMode::Distinct => self.advanced,
        }
    }

    /// Score at which Intermediate is granted. Same in both modes: the
    /// legacy OR-branch is dominated by whichever threshold is lower.
    pub fn intermediate_boundary(&self) -> u64 {
        self.intermediate.min(self.advanced)
    }

    /// Points still needed to reach the next tier, None at the top.
    pub fn points_to_next(&self, score: u64) -> Option<u64> {
        let tier = evaluate_tier(score, self);
        match tier {
            ConfidenceTier::Beginner => Some(self.intermediate_boundary().saturating_sub(score)),
            ConfidenceTier::Intermediate => Some(self.advanced_boundary().saturating_sub(score)),
            ConfidenceTier::Advanced => None,
        }
    }
}

/// Map a score to a tier. Pure; monotonic non-decreasing in score for
/// both modes.
pub fn evaluate_tier(score: u64, thresholds: &Thresholds) -> ConfidenceTier {
    match thresholds.mode {
        ThresholdMode::Legacy => {
            if score >= thresholds.expert {
                ConfidenceTier::Advanced
            } else if score >= thresholds.advanced || score >= thresholds.intermediate {
                ConfidenceTier::Intermediate
            } else {
                ConfidenceTier::Beginner
            }
        }
        ThresholdMode::Distinct => {
            if score >= thresholds.advanced {
                ConfidenceTier::Advanced
            } else if score >= thresholds.intermediate {
                ConfidenceTier::Intermediate
            } else {
                ConfidenceTier::Beginner
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy() -> Thresholds {
        Thresholds::default()
    }

    fn distinct() -> Thresholds {
        Thresholds {
            mode: ThresholdMode::Distinct,
            ..Thresholds::default()
        }
    }

    #[test]
    fn test_default_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.intermediate, 1000);
        assert_eq!(t.advanced, 2500);
        assert_eq!(t.expert, 5000);
        assert_eq!(t.mode, ThresholdMode::Legacy);
    }

    #[test]
    fn test_exact_boundaries_legacy() {
        let t = legacy();
        assert_eq!(evaluate_tier(999, &t), ConfidenceTier::Beginner);
        assert_eq!(evaluate_tier(1000, &t), ConfidenceTier::Intermediate);
        assert_eq!(evaluate_tier(4999, &t), ConfidenceTier::Intermediate);
        assert_eq!(evaluate_tier(5000, &t), ConfidenceTier::Advanced);
    }

    #[test]
    fn test_legacy_advanced_threshold_is_dead_branch() {
        // Crossing the advanced threshold changes nothing in legacy mode.
        let t = legacy();
        assert_eq!(evaluate_tier(2499, &t), ConfidenceTier::Intermediate);
        assert_eq!(evaluate_tier(2500, &t), ConfidenceTier::Intermediate);
        assert_eq!(evaluate_tier(2501, &t), ConfidenceTier::Intermediate);
    }

    #[test]
    fn test_distinct_mode_three_transitions() {
        let t = distinct();
        assert_eq!(evaluate_tier(999, &t), ConfidenceTier::Beginner);
        assert_eq!(evaluate_tier(1000, &t), ConfidenceTier::Intermediate);
        assert_eq!(evaluate_tier(2499, &t), ConfidenceTier::Intermediate);
        assert_eq!(evaluate_tier(2500, &t), ConfidenceTier::Advanced);
    }

    #[test]
    fn test_monotonic_in_score_both_modes() {
        for t in [legacy(), distinct()] {
            let mut previous = ConfidenceTier::Beginner;
            for score in 0..6000 {
                let tier = evaluate_tier(score, &t);
                assert!(tier >= previous, "tier dropped at score {}", score);
                previous = tier;
            }
        }
    }

    #[test]
    fn test_points_to_next() {
        let t = legacy();
        assert_eq!(t.points_to_next(0), Some(1000));
        assert_eq!(t.points_to_next(250), Some(750));
        assert_eq!(t.points_to_next(1000), Some(4000));
        assert_eq!(t.points_to_next(5000), None);

        let d = distinct();
        assert_eq!(d.points_to_next(1000), Some(1500));
        assert_eq!(d.points_to_next(2500), None);
    }

    #[test]
    fn test_thresholds_toml_partial() {
        // Only one key given; the rest fill in from defaults.
        let t: Thresholds = toml::from_str("intermediate = 500").unwrap();
        assert_eq!(t.intermediate, 500);
        assert_eq!(t.expert, 5000);
        assert_eq!(t.mode, ThresholdMode::Legacy);
    }
}
