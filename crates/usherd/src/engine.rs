//! Progressive disclosure engine.
//!
//! Owns the authoritative progress state for the session: folds
//! interactions into the score, maps the score to a confidence tier, and
//! keeps the unlocked/locked feature partition in sync. Entry points are
//! infallible; persistence problems degrade to warnings and the in-memory
//! state stays authoritative until the next flush succeeds.

use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use usher_common::config::UsherConfig;
use usher_common::history::{BehaviorProfile, RecentHistory};
use usher_common::interaction::{InteractionKind, InteractionRecord};
use usher_common::rpc::RecordResult;
use usher_common::scoring::{evaluate_tier, Thresholds};
use usher_common::state::ProgressState;
use usher_common::status::{DaemonStatus, FeatureList, ProgressReport};
use usher_common::store::{InteractionLog, SnapshotStore};
use usher_common::tier::ConfidenceTier;

/// A tier transition, broadcast to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierChange {
    pub old: ConfidenceTier,
    pub new: ConfidenceTier,
    pub score: u64,
}

struct EngineInner {
    state: ProgressState,
    history: RecentHistory,
    profile: BehaviorProfile,
    /// Snapshot has changes not yet flushed
    dirty: bool,
    last_persist_ok: bool,
}

pub struct DisclosureEngine {
    inner: RwLock<EngineInner>,
    snapshots: SnapshotStore,
    log: InteractionLog,
    thresholds: Thresholds,
    changes: broadcast::Sender<TierChange>,
}

impl DisclosureEngine {
    pub fn new(config: &UsherConfig) -> Self {
        Self::with_stores(
            config,
            SnapshotStore::at_dir(&config.state_dir),
            InteractionLog::new(config.log_path(), config.max_log_entries),
        )
    }

    /// Build with explicit stores (tests inject failing ones here).
    pub fn with_stores(config: &UsherConfig, snapshots: SnapshotStore, log: InteractionLog) -> Self {
        let snapshot = snapshots.load();
        let mut state = ProgressState::from_snapshot(&snapshot);

        // The stored tier may predate a threshold or mode change; the
        // score is the source of truth.
        let tier = evaluate_tier(state.score, &config.thresholds);
        if tier != state.tier {
            state.set_tier(tier);
        }

        info!(score = state.score, tier = %state.tier, "progress restored");

        // Warm the recent buffer from the log so the behavior profile
        // survives restarts.
        let mut history = RecentHistory::new(config.history_cap);
        match log.read_recent(7) {
            Ok(records) => {
                for record in records {
                    history.push(record);
                }
            }
            Err(e) => warn!("interaction log unreadable, starting empty: {}", e),
        }
        let profile = history.profile();

        let (changes, _) = broadcast::channel(32);
        Self {
            inner: RwLock::new(EngineInner {
                state,
                history,
                profile,
                dirty: true,
                last_persist_ok: true,
            }),
            snapshots,
            log,
            thresholds: config.thresholds,
            changes,
        }
    }

    /// Subscribe to tier transitions.
    pub fn subscribe(&self) -> broadcast::Receiver<TierChange> {
        self.changes.subscribe()
    }

    /// Fold one interaction into the score.
    ///
    /// Never fails: unknown kinds score the minimum, and log/store errors
    /// are swallowed after a warning. Runs inside UI-facing request
    /// handling, so nothing here may propagate.
    pub async fn record_interaction(&self, label: &str) -> RecordResult {
        if InteractionKind::parse(label).is_none() {
            debug!(label, "unknown interaction kind, scoring minimum");
        }
        let record = InteractionRecord::new(label);
        let points = record.points;

        if let Err(e) = self.log.append(&record) {
            warn!("interaction log append failed: {}", e);
        }

        let mut inner = self.inner.write().await;
        inner.state.score += points;
        inner.history.push(record);
        inner.dirty = true;

        let change = self.reevaluate_locked(&mut inner);
        let result = RecordResult {
            score: inner.state.score,
            tier: inner.state.tier,
            points_added: points,
            tier_changed: change.is_some(),
        };
        drop(inner);

        if let Some(change) = change {
            self.announce(change).await;
        }
        result
    }

    /// Periodic re-evaluation: re-applies the tier for the current score
    /// even with no new interaction, self-healing exposed state.
    /// Idempotent at a given score; a repeat at the same score never
    /// re-fires the notification.
    pub async fn reevaluate(&self) {
        let change = {
            let mut inner = self.inner.write().await;
            self.reevaluate_locked(&mut inner)
        };
        if let Some(change) = change {
            self.announce(change).await;
        }
    }

    fn reevaluate_locked(&self, inner: &mut EngineInner) -> Option<TierChange> {
        let tier = evaluate_tier(inner.state.score, &self.thresholds);
        if tier == inner.state.tier {
            return None;
        }
        let old = inner.state.tier;
        inner.state.set_tier(tier);
        inner.dirty = true;
        Some(TierChange {
            old,
            new: tier,
            score: inner.state.score,
        })
    }

    async fn announce(&self, change: TierChange) {
        crate::notifier::celebrate(&change);
        let _ = self.changes.send(change);
        // Tier changes flush immediately rather than waiting for the timer.
        self.persist().await;
    }

    /// Flush the snapshot if anything changed since the last flush.
    /// Returns false when the store write failed; the state stays dirty
    /// and the next cycle retries.
    pub async fn persist(&self) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.dirty {
            return true;
        }
        let snapshot = inner.state.snapshot();
        match self.snapshots.save(&snapshot) {
            Ok(()) => {
                inner.dirty = false;
                inner.last_persist_ok = true;
                debug!(score = snapshot.score, "progress persisted");
                true
            }
            Err(e) => {
                warn!("progress persist failed: {}", e);
                inner.last_persist_ok = false;
                false
            }
        }
    }

    /// Recompute the behavior profile from the recent buffer.
    pub async fn analyze(&self) {
        let mut inner = self.inner.write().await;
        inner.profile = inner.history.profile();
        debug!(
            sample = inner.profile.sample_size,
            style = %inner.profile.style,
            "behavior profile updated"
        );
    }

    /// External reset: back to beginner/0. The only downward transition.
    /// Subscribers get the transition so exposed state re-syncs, but no
    /// celebration fires.
    pub async fn reset(&self) {
        let old = {
            let mut inner = self.inner.write().await;
            let old = inner.state.tier;
            inner.state = ProgressState::default();
            inner.history.clear();
            inner.profile = BehaviorProfile::default();
            inner.dirty = true;
            old
        };
        info!(%old, "progress reset to beginner");
        if old != ConfidenceTier::Beginner {
            let _ = self.changes.send(TierChange {
                old,
                new: ConfidenceTier::Beginner,
                score: 0,
            });
        }
        self.persist().await;
    }

    pub async fn status(&self, version: &str, uptime_secs: u64) -> DaemonStatus {
        let inner = self.inner.read().await;
        DaemonStatus {
            version: version.to_string(),
            pid: std::process::id(),
            uptime_secs,
            score: inner.state.score,
            tier: inner.state.tier,
            unlocked_count: inner.state.unlocked.len(),
            locked_count: inner.state.locked.len(),
            threshold_mode: self.thresholds.mode,
            last_persist_ok: inner.last_persist_ok,
        }
    }

    pub async fn progress_report(&self) -> ProgressReport {
        let inner = self.inner.read().await;
        ProgressReport {
            score: inner.state.score,
            tier: inner.state.tier,
            next_tier: inner.state.tier.next(),
            points_to_next: self.thresholds.points_to_next(inner.state.score),
            thresholds: self.thresholds,
            profile: inner.profile.clone(),
        }
    }

    pub async fn feature_list(&self) -> FeatureList {
        let inner = self.inner.read().await;
        FeatureList::for_tier(inner.state.tier)
    }
}
