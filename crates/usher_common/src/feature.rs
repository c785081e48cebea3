//! Dashboard feature catalog and tier gating.
//!
//! Every feature the dashboard can show is declared here, statically
//! partitioned into the three tiers. Unlocking is a pure function of the
//! current tier: beginner features are always visible, intermediate
//! features appear at intermediate and above, advanced features only at
//! advanced.

use crate::tier::ConfidenceTier;
use serde::Serialize;

/// Opaque feature identifier as used by the dashboard.
pub type FeatureId = &'static str;

/// A gated dashboard feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Unique identifier
    pub id: FeatureId,
    /// Short name
    pub name: &'static str,
    /// What the user gets once it is visible
    pub description: &'static str,
    /// Minimum tier at which the feature unlocks
    pub tier: ConfidenceTier,
}

impl Feature {
    const fn new(
        id: FeatureId,
        name: &'static str,
        description: &'static str,
        tier: ConfidenceTier,
    ) -> Self {
        Self {
            id,
            name,
            description,
            tier,
        }
    }
}

/// The full feature universe, in display order.
pub const CATALOG: [Feature; 12] = [
    // Beginner tier: the starter dashboard
    Feature::new(
        "portfolio",
        "Portfolio",
        "Holdings overview and total balance",
        ConfidenceTier::Beginner,
    ),
    Feature::new(
        "buy",
        "Simple Buy",
        "One-click purchases with guided flow",
        ConfidenceTier::Beginner,
    ),
    Feature::new(
        "learn",
        "Learn Hub",
        "Guided lessons and glossary",
        ConfidenceTier::Beginner,
    ),
    Feature::new(
        "price_alerts",
        "Price Alerts",
        "Notifications on price moves",
        ConfidenceTier::Beginner,
    ),

    // Intermediate tier: analysis tools
    Feature::new(
        "analytics",
        "Analytics",
        "Performance breakdown and allocation charts",
        ConfidenceTier::Intermediate,
    ),
    Feature::new(
        "advanced_charts",
        "Advanced Charts",
        "Candlesticks, indicators, drawing tools",
        ConfidenceTier::Intermediate,
    ),
    Feature::new(
        "recurring_buys",
        "Recurring Buys",
        "Scheduled automatic purchases",
        ConfidenceTier::Intermediate,
    ),
    Feature::new(
        "tax_reports",
        "Tax Reports",
        "Exportable gain/loss statements",
        ConfidenceTier::Intermediate,
    ),

    // Advanced tier: power-user surface
    Feature::new(
        "defi",
        "DeFi Access",
        "Connect to decentralized protocols",
        ConfidenceTier::Advanced,
    ),
    Feature::new(
        "staking",
        "Staking",
        "Stake supported assets for yield",
        ConfidenceTier::Advanced,
    ),
    Feature::new(
        "api_access",
        "API Access",
        "Personal API keys for programmatic trading",
        ConfidenceTier::Advanced,
    ),
    Feature::new(
        "limit_orders",
        "Limit Orders",
        "Orders that execute at a target price",
        ConfidenceTier::Advanced,
    ),
];

/// Partition the catalog for a tier: (unlocked, locked).
///
/// Together the two sets always cover the whole catalog and never overlap.
pub fn apply_tier(tier: ConfidenceTier) -> (Vec<FeatureId>, Vec<FeatureId>) {
    let mut unlocked = Vec::new();
    let mut locked = Vec::new();
    for feature in &CATALOG {
        if feature.tier <= tier {
            unlocked.push(feature.id);
        } else {
            locked.push(feature.id);
        }
    }
    (unlocked, locked)
}

/// Features visible at a tier.
pub fn unlocked_features(tier: ConfidenceTier) -> Vec<Feature> {
    CATALOG.iter().filter(|f| f.tier <= tier).copied().collect()
}

/// Features newly visible when moving from `old` to `new`.
pub fn newly_unlocked(old: ConfidenceTier, new: ConfidenceTier) -> Vec<Feature> {
    CATALOG
        .iter()
        .filter(|f| f.tier > old && f.tier <= new)
        .copied()
        .collect()
}

/// Look up a feature by id.
pub fn find(id: &str) -> Option<Feature> {
    CATALOG.iter().find(|f| f.id == id).copied()
}
