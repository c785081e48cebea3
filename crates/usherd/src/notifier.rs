//! Tier-change notifications.
//!
//! The engine announces promotions here; delivery is a structured log
//! line plus formatted celebration copy. UI layers wanting their own
//! fanfare subscribe to the engine's broadcast channel instead.

use crate::engine::TierChange;
use tracing::info;
use usher_common::feature::{self, Feature};
use usher_common::tier::ConfidenceTier;

/// Celebration copy for a newly reached tier.
pub fn tier_message(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::Beginner => "Welcome! The guided dashboard is ready.",
        ConfidenceTier::Intermediate => {
            "Analysis tools unlocked. Charts and insights are now on your dashboard."
        }
        ConfidenceTier::Advanced => "Full platform access unlocked. Trade carefully out there.",
    }
}

/// Format a single feature unlock line.
pub fn format_unlock(feature: &Feature) -> String {
    format!(
        "[+] Feature unlocked: {} - {}",
        feature.name, feature.description
    )
}

/// Log a promotion with its newly visible features.
pub fn celebrate(change: &TierChange) {
    info!(
        old = %change.old,
        new = %change.new,
        score = change.score,
        "confidence tier changed"
    );
    info!("{}", tier_message(change.new));
    for feature in feature::newly_unlocked(change.old, change.new) {
        info!("{}", format_unlock(&feature));
    }
}
