//! Interaction events and their score values.
//!
//! UI event handlers report interactions by label; each known kind carries
//! a fixed score value. Unknown labels are tolerated, not rejected: they
//! score [`DEFAULT_POINTS`] and keep their raw label in the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score contribution for labels not in the table.
pub const DEFAULT_POINTS: u64 = 1;

/// Known interaction kinds reported by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Navigation,
    Purchase,
    LearnComplete,
    PortfolioView,
    SettingsChange,
    HelpRequest,
    MascotInteraction,
}

impl InteractionKind {
    /// Parse a label. Returns None for anything unrecognized.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "navigation" => Some(Self::Navigation),
            "purchase" => Some(Self::Purchase),
            "learn_complete" => Some(Self::LearnComplete),
            "portfolio_view" => Some(Self::PortfolioView),
            "settings_change" => Some(Self::SettingsChange),
            "help_request" => Some(Self::HelpRequest),
            "mascot_interaction" => Some(Self::MascotInteraction),
            _ => None,
        }
    }

    /// Fixed score value for this kind.
    pub fn points(self) -> u64 {
        match self {
            Self::Navigation => 1,
            Self::Purchase => 50,
            Self::LearnComplete => 25,
            Self::PortfolioView => 5,
            Self::SettingsChange => 10,
            Self::HelpRequest => 2,
            Self::MascotInteraction => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Purchase => "purchase",
            Self::LearnComplete => "learn_complete",
            Self::PortfolioView => "portfolio_view",
            Self::SettingsChange => "settings_change",
            Self::HelpRequest => "help_request",
            Self::MascotInteraction => "mascot_interaction",
        }
    }

    pub fn all() -> [Self; 7] {
        [
            Self::Navigation,
            Self::Purchase,
            Self::LearnComplete,
            Self::PortfolioView,
            Self::SettingsChange,
            Self::HelpRequest,
            Self::MascotInteraction,
        ]
    }
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Score value for a raw label; unknown labels fall back to [`DEFAULT_POINTS`].
pub fn points_for(label: &str) -> u64 {
    InteractionKind::parse(label)
        .map(|kind| kind.points())
        .unwrap_or(DEFAULT_POINTS)
}

/// A single recorded interaction: the log row and history element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub timestamp: DateTime<Utc>,
    /// Raw label as reported by the caller
    pub kind: String,
    pub points: u64,
}

impl InteractionRecord {
    pub fn new(label: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: label.to_string(),
            points: points_for(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_roundtrip() {
        for kind in InteractionKind::all() {
            assert_eq!(InteractionKind::parse(kind.label()), Some(kind));
        }
    }

    #[test]
    fn test_known_point_values() {
        assert_eq!(points_for("purchase"), 50);
        assert_eq!(points_for("learn_complete"), 25);
        assert_eq!(points_for("navigation"), 1);
    }

    #[test]
    fn test_unknown_label_scores_default() {
        assert_eq!(points_for("wallet_export"), DEFAULT_POINTS);
        assert_eq!(points_for(""), DEFAULT_POINTS);
    }

    #[test]
    fn test_record_keeps_raw_label() {
        let record = InteractionRecord::new("wallet_export");
        assert_eq!(record.kind, "wallet_export");
        assert_eq!(record.points, DEFAULT_POINTS);
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let record = InteractionRecord::new("purchase");
        let json = serde_json::to_string(&record).unwrap();
        let parsed: InteractionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, "purchase");
        assert_eq!(parsed.points, 50);
    }
}
