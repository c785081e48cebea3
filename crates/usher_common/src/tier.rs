//! Confidence tiers gating feature visibility.

use serde::{Deserialize, Serialize};

/// Discrete confidence level for a user session.
///
/// The derived ordering is load-bearing: feature gating and the
/// monotonicity guarantee both rely on Beginner < Intermediate < Advanced.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

impl ConfidenceTier {
    /// Parse a tier label. Returns None for anything unrecognized.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// The next tier up, or None at the top.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Beginner => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Advanced),
            Self::Advanced => None,
        }
    }

    pub fn all() -> [Self; 3] {
        [Self::Beginner, Self::Intermediate, Self::Advanced]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(ConfidenceTier::Beginner < ConfidenceTier::Intermediate);
        assert!(ConfidenceTier::Intermediate < ConfidenceTier::Advanced);
    }

    #[test]
    fn test_tier_parse_roundtrip() {
        for tier in ConfidenceTier::all() {
            assert_eq!(ConfidenceTier::parse(&tier.to_string()), Some(tier));
        }
        assert_eq!(ConfidenceTier::parse("expert"), None);
    }

    #[test]
    fn test_tier_next() {
        assert_eq!(
            ConfidenceTier::Beginner.next(),
            Some(ConfidenceTier::Intermediate)
        );
        assert_eq!(ConfidenceTier::Advanced.next(), None);
    }

    #[test]
    fn test_tier_serde_snake_case() {
        let json = serde_json::to_string(&ConfidenceTier::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }
}
