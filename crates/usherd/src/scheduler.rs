//! Periodic engine tasks.
//!
//! Three independent timers: behavior analysis, tier re-evaluation, and
//! persistence flush. Their relative ordering is not guaranteed and must
//! not matter; every tick is idempotent given the current score. All
//! three stop together through one shutdown signal.

use crate::engine::DisclosureEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use usher_common::config::UsherConfig;

#[derive(Debug, Clone, Copy)]
enum Task {
    Analyze,
    Evaluate,
    Persist,
}

impl Task {
    fn name(self) -> &'static str {
        match self {
            Task::Analyze => "analyze",
            Task::Evaluate => "evaluate",
            Task::Persist => "persist",
        }
    }
}

pub struct Scheduler {
    handles: Vec<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl Scheduler {
    /// Spawn the periodic tasks for an engine.
    pub fn spawn(engine: Arc<DisclosureEngine>, config: &UsherConfig) -> Self {
        let (shutdown, _) = watch::channel(false);

        let handles = vec![
            spawn_task(
                engine.clone(),
                Task::Analyze,
                Duration::from_secs(config.analyze_interval_secs.max(1)),
                shutdown.subscribe(),
            ),
            spawn_task(
                engine.clone(),
                Task::Evaluate,
                Duration::from_secs(config.evaluate_interval_secs.max(1)),
                shutdown.subscribe(),
            ),
            spawn_task(
                engine,
                Task::Persist,
                Duration::from_secs(config.persist_interval_secs.max(1)),
                shutdown.subscribe(),
            ),
        ];

        Self { handles, shutdown }
    }

    /// Stop all periodic tasks as a unit and wait for them to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

fn spawn_task(
    engine: Arc<DisclosureEngine>,
    task: Task,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = ticker.tick() => match task {
                    Task::Analyze => engine.analyze().await,
                    Task::Evaluate => engine.reevaluate().await,
                    Task::Persist => {
                        engine.persist().await;
                    }
                },
                _ = shutdown.changed() => break,
            }
        }
        debug!(task = task.name(), "periodic task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use usher_common::store::SnapshotStore;

    fn fast_config(dir: &std::path::Path) -> UsherConfig {
        UsherConfig {
            state_dir: dir.to_path_buf(),
            analyze_interval_secs: 1,
            evaluate_interval_secs: 1,
            persist_interval_secs: 1,
            ..UsherConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_persist_flushes_dirty_state() {
        let dir = tempdir().unwrap();
        let config = fast_config(dir.path());
        let engine = Arc::new(DisclosureEngine::new(&config));
        let scheduler = Scheduler::spawn(engine.clone(), &config);

        engine.record_interaction("navigation").await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        scheduler.stop().await;

        let snapshot = SnapshotStore::at_dir(dir.path()).load();
        assert_eq!(snapshot.score, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_terminates_all_tasks() {
        let dir = tempdir().unwrap();
        let config = fast_config(dir.path());
        let engine = Arc::new(DisclosureEngine::new(&config));
        let scheduler = Scheduler::spawn(engine, &config);

        tokio::time::sleep(Duration::from_secs(2)).await;
        // Completes only if every task observed the shutdown signal.
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_analyze_refreshes_profile() {
        let dir = tempdir().unwrap();
        let config = fast_config(dir.path());
        let engine = Arc::new(DisclosureEngine::new(&config));
        let scheduler = Scheduler::spawn(engine.clone(), &config);

        engine.record_interaction("purchase").await;
        engine.record_interaction("purchase").await;
        tokio::time::sleep(Duration::from_secs(3)).await;
        scheduler.stop().await;

        let report = engine.progress_report().await;
        assert_eq!(report.profile.sample_size, 2);
    }
}
